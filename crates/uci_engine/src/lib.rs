//! UCI protocol handling, kept apart from stdin/stdout so it can be driven
//! from tests.

use std::io::Write;

use chess_core::{move_to_uci, set_position_from_uci, Engine, Position, SearchLimits};
use minimax_engine::{MinimaxEngine, DEFAULT_DEPTH};
use tracing::{debug, warn};

/// Deepest search a `Depth` option or `go depth` may ask for.
pub const MAX_DEPTH: u8 = 8;

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct UciHandler<E: Engine = MinimaxEngine> {
    engine: E,
    pos: Position,
    depth: u8,
}

impl Default for UciHandler<MinimaxEngine> {
    fn default() -> Self {
        Self::new(MinimaxEngine::new())
    }
}

impl<E: Engine> UciHandler<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            pos: Position::startpos(),
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Handles one command line, writing any replies to `out`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> std::io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(
                    out,
                    "option name Depth type spin default {DEFAULT_DEPTH} min 1 max {MAX_DEPTH}"
                )?;
                writeln!(out, "option name Seed type string default")?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(&parts[1..]),
            "ucinewgame" => {
                self.pos = Position::startpos();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = set_position_from_uci(&mut self.pos, &parts[1..]) {
                    warn!(%err, "ignoring position command");
                }
            }
            "go" => {
                let depth = go_depth(&parts[1..]).unwrap_or(self.depth);
                let result = self.engine.search(&self.pos, SearchLimits::depth(depth));
                match result.best_move {
                    Some(mv) => {
                        writeln!(
                            out,
                            "info depth {} score cp {} nodes {}",
                            result.depth,
                            result.score * 100,
                            result.nodes
                        )?;
                        writeln!(out, "bestmove {}", move_to_uci(&self.pos, mv))?;
                    }
                    None => writeln!(out, "bestmove 0000")?,
                }
            }
            "quit" => return Ok(Flow::Quit),
            other => debug!(command = other, "unknown command ignored"),
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    /// `setoption name <name> [value <value>]`; names may contain spaces.
    fn set_option(&mut self, args: &[&str]) {
        let Some(name_at) = args.iter().position(|&t| t == "name") else {
            warn!(?args, "malformed setoption");
            return;
        };
        let value_at = args.iter().position(|&t| t == "value").unwrap_or(args.len());
        if value_at <= name_at {
            warn!(?args, "malformed setoption");
            return;
        }
        let name = args[name_at + 1..value_at].join(" ");
        let value = args.get(value_at + 1..).unwrap_or_default().join(" ");

        if name.eq_ignore_ascii_case("depth") {
            match value.parse::<u8>() {
                Ok(d) => self.depth = d.clamp(1, MAX_DEPTH),
                Err(_) => warn!(%value, "invalid Depth value"),
            }
        } else if name.eq_ignore_ascii_case("seed") {
            // An empty value keeps the current seed
            if !value.is_empty() && !self.engine.set_option(&name, &value) {
                warn!(%value, "invalid Seed value");
            }
        } else if !self.engine.set_option(&name, &value) {
            debug!(%name, "unknown option ignored");
        }
    }
}

/// The `depth N` argument of a `go` command, if present and valid.
fn go_depth(args: &[&str]) -> Option<u8> {
    let at = args.iter().position(|&t| t == "depth")?;
    let depth = args.get(at + 1)?.parse::<u8>().ok()?;
    Some(depth.clamp(1, MAX_DEPTH))
}
