//! Terminal chess session around the minimax engine
//!
//! - `config`: TOML settings (mode, depth, engine colour, save file)
//! - `session`: game state, move entry, undo/redo, save/load
//! - `render`: plain-text board

pub mod config;
pub mod render;
pub mod session;

pub use config::{ConfigError, Mode, PlayConfig, Side};
pub use session::{GameSession, SavedGame, SessionError, Submitted};
