pub mod error;
pub mod perft;
pub mod position;
pub mod rules;
pub mod types;
pub mod uci;

pub use error::ChessError;
pub use perft::perft;
pub use position::{Outcome, Position, START_FEN};
pub use rules::Rules;
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine trait — implemented by move-selection engines
// =============================================================================

/// How far an engine may search. Searches are fixed-depth and run to
/// completion; there is no clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Search depth in plies (half-moves)
    pub depth: u8,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self { depth }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(3)
    }
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The move to play (None if no legal moves)
    pub best_move: Option<Move>,
    /// Score of the chosen move from the engine's perspective
    pub score: i32,
    /// Search depth used
    pub depth: u8,
    /// Number of nodes searched (for stats)
    pub nodes: u64,
}

/// Trait that all engines must implement.
pub trait Engine: Send {
    /// Search the position with the given limits.
    ///
    /// The position is only read; engines search a private copy.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "chess-minimax"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Optional: Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
