//! Minimax Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a material-only
//! evaluation. Among root moves tied for the best score one is picked at
//! random, so the engine does not repeat itself game after game.

pub mod eval;
pub mod promotion;
pub mod search;

use chess_core::{move_to_uci, Engine, Position, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

pub use eval::{evaluate, piece_value, Score};
pub use promotion::{auto_promote, is_promotion_move, shape_promotion, PromotionChoice};
pub use search::{choose_move, minimax, pick, search_root, Choice, RootSearch, SearchStats, SCORE_INFINITY};

/// Depth the engine plays at when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 3;

/// Engine wrapper around [`search_root`] and [`pick`].
///
/// Owns the random source used for tie-breaking. A seeded engine makes the
/// same choices for the same sequence of positions.
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    rng: StdRng,
    /// Seed in use, if the engine was seeded explicitly
    seed: Option<u64>,
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimaxEngine {
    /// An engine with a nondeterministic seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// An engine whose tie-breaking is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let mut work = pos.clone();
        let mut stats = SearchStats::default();

        let root = search_root(&mut work, limits.depth, &mut stats);
        debug_assert_eq!(work.applied_len(), pos.applied_len());
        let choice = pick(&work, &root, &mut self.rng);

        if let Some(choice) = choice {
            info!(
                mv = %move_to_uci(pos, choice.mv),
                score = choice.score,
                tied = choice.tied,
                nodes = stats.nodes,
                cutoffs = stats.cutoffs,
                depth = limits.depth,
                "engine move chosen"
            );
        } else {
            info!(depth = limits.depth, "no legal move available");
        }

        SearchResult {
            best_move: choice.map(|c| c.mv),
            score: choice.map(|c| c.score).unwrap_or(0),
            depth: limits.depth,
            nodes: stats.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        if !name.eq_ignore_ascii_case("seed") {
            return false;
        }
        match value.trim().parse::<u64>() {
            Ok(seed) => {
                *self = Self::with_seed(seed);
                true
            }
            Err(_) => false,
        }
    }
}
