//! Terminal chess
//!
//! Play against the minimax engine or pass the keyboard between two players.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chess_core::{color_name, parse_move_text, Color, Square};
use chess_play::render::render_board;
use chess_play::{GameSession, Mode, PlayConfig, SessionError, Side, Submitted};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess in the terminal", long_about = None)]
struct Args {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// pvp or ai
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Engine search depth in plies
    #[arg(short, long)]
    depth: Option<u8>,

    /// Colour the engine plays
    #[arg(long, value_enum)]
    engine_color: Option<Side>,

    /// Seed for the engine's tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Save file used by `save` and `load`
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// Start from this position instead of the initial one
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlayConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => PlayConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if let Some(side) = args.engine_color {
        config.engine_color = side;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(path) = args.save_path {
        config.save_path = path;
    }
    config.validate()?;
    info!(?config, "starting session");

    let mut session = GameSession::new(&config);
    if let Some(fen) = &args.fen {
        session.set_fen(fen).context("invalid --fen")?;
    }

    run(&mut session, &config)
}

fn print_help() {
    println!("Commands:");
    println!("  e2e4, e7e8q      make a move (promotion piece optional)");
    println!("  moves <square>   show where the piece on <square> can go");
    println!("  go               let the engine move now");
    println!("  undo / redo      step back or forward");
    println!("  save / load      write or read the save file");
    println!("  new              start a new game");
    println!("  flip             turn the board around");
    println!("  fen              print the current position");
    println!("  help / quit");
}

fn show(session: &GameSession, flipped: bool, marked: &[Square]) {
    println!();
    print!("{}", render_board(session.position(), flipped, marked));
    println!("{}", session.status());
}

fn engine_reply(session: &mut GameSession, delay: Duration) -> Result<()> {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    if session.engine_move()?.is_some() {
        if let Some(text) = session.last_move() {
            println!("{} plays {text}", color_name(session.engine_color()));
        }
    }
    Ok(())
}

fn run(session: &mut GameSession, config: &PlayConfig) -> Result<()> {
    let delay = Duration::from_millis(config.engine_delay_ms);
    let mut flipped = session.mode() == Mode::PlayerVsEngine && session.engine_color() == Color::White;

    println!("Type `help` for commands.");
    if session.is_engine_turn() {
        engine_reply(session, Duration::ZERO)?;
    }
    show(session, flipped, &[]);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if session.pending_promotion().is_some() {
            print!("promote to (q/r/b/n): ");
        } else {
            print!("> ");
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if session.pending_promotion().is_some() {
            match input.parse() {
                Ok(choice) => {
                    session.promote(choice)?;
                    if session.is_engine_turn() {
                        engine_reply(session, delay)?;
                    }
                    show(session, flipped, &[]);
                }
                Err(err) => {
                    println!("{err}; promotion cancelled");
                    session.cancel_promotion();
                }
            }
            continue;
        }

        let mut words = input.split_whitespace();
        let command = words.next().unwrap_or_default();
        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "board" => show(session, flipped, &[]),
            "flip" => {
                flipped = !flipped;
                show(session, flipped, &[]);
            }
            "fen" => println!("{}", session.position().fen()),
            "new" => {
                session.reset();
                if session.is_engine_turn() {
                    engine_reply(session, Duration::ZERO)?;
                }
                show(session, flipped, &[]);
            }
            "undo" => {
                if session.undo()? {
                    show(session, flipped, &[]);
                } else {
                    println!("nothing to undo");
                }
            }
            "redo" => {
                if session.redo()? {
                    show(session, flipped, &[]);
                } else {
                    println!("nothing to redo");
                }
            }
            "save" => match session.save(&config.save_path) {
                Ok(()) => println!("saved to {}", config.save_path.display()),
                Err(err) => {
                    warn!(%err, "save failed");
                    println!("{err}");
                }
            },
            "load" => match session.load(&config.save_path) {
                Ok(()) => show(session, flipped, &[]),
                Err(err @ SessionError::NoSavedGame(_)) => println!("{err}"),
                Err(err) => {
                    warn!(%err, "load failed");
                    println!("{err}");
                }
            },
            "go" => {
                engine_reply(session, Duration::ZERO)?;
                show(session, flipped, &[]);
            }
            "moves" => match words.next().map(|sq| sq.parse::<Square>()) {
                Some(Ok(sq)) => {
                    let targets = session.legal_targets(sq);
                    if targets.is_empty() {
                        println!("no moves from {sq}");
                    } else {
                        show(session, flipped, &targets);
                    }
                }
                _ => println!("usage: moves <square>"),
            },
            text => {
                if parse_move_text(text).is_err() {
                    println!("unknown command `{text}`, try `help`");
                    continue;
                }
                match session.submit(text) {
                    Ok(Submitted::Played(_)) => {
                        if session.is_engine_turn() {
                            show(session, flipped, &[]);
                            engine_reply(session, delay)?;
                        }
                        show(session, flipped, &[]);
                    }
                    Ok(Submitted::NeedsPromotion { .. }) => {}
                    Err(SessionError::EngineTurn) => {
                        println!("it is the engine's turn, type `go` to let it move");
                    }
                    Err(err) => println!("{err}"),
                }
            }
        }
    }
    Ok(())
}
