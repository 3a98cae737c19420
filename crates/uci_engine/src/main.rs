//! UCI engine binary
//!
//! Speaks UCI on stdin/stdout; logs go to stderr (`RUST_LOG` to adjust).

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uci_engine::{Flow, UciHandler};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let mut handler = UciHandler::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if handler.handle(line.trim(), &mut stdout)? == Flow::Quit {
            break;
        }
    }
    info!("uci loop finished");
    Ok(())
}
