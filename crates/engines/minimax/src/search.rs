//! Minimax search with alpha-beta pruning
//!
//! The tree is walked in place: every move is applied to the position,
//! searched, and undone before the next sibling is tried. Scores are always
//! from the perspective of the side that was to move at the root.

use chess_core::{Color, Move, Rules};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::eval::{evaluate, Score};
use crate::promotion::auto_promote;

/// Window bound larger than any reachable material score.
pub const SCORE_INFINITY: Score = 9999;

/// Counters collected over one root search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited below the root
    pub nodes: u64,
    /// Moves applied to the position
    pub applied: u64,
    /// Moves taken back
    pub undone: u64,
    /// Siblings skipped because the window closed
    pub cutoffs: u64,
}

impl SearchStats {
    /// Every apply has been matched by an undo.
    pub fn is_balanced(&self) -> bool {
        self.applied == self.undone
    }

    fn apply<R: Rules>(&mut self, pos: &mut R, mv: Move) {
        pos.apply(mv);
        self.applied += 1;
    }

    fn undo<R: Rules>(&mut self, pos: &mut R) {
        let undone = pos.undo();
        debug_assert!(undone.is_some(), "undo without a matching apply");
        self.undone += 1;
    }
}

/// Recursive minimax with alpha-beta pruning.
///
/// `perspective` is fixed for the whole tree. At `maximizing` levels the
/// running maximum raises `alpha`, at minimizing levels the running minimum
/// lowers `beta`; once `beta <= alpha` the remaining siblings are skipped.
/// Depth exhaustion and game over are both leaves scored by `evaluate`;
/// a mate earns no bonus beyond the material on the board.
pub fn minimax<R: Rules>(
    pos: &mut R,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    perspective: Color,
    stats: &mut SearchStats,
) -> Score {
    stats.nodes += 1;

    if depth == 0 || pos.is_game_over() {
        return evaluate(pos, perspective);
    }

    let moves = pos.legal_moves();
    if moves.is_empty() {
        return evaluate(pos, perspective);
    }

    if maximizing {
        let mut best = -SCORE_INFINITY;
        for mv in moves {
            stats.apply(pos, mv);
            let score = minimax(pos, depth - 1, alpha, beta, false, perspective, stats);
            stats.undo(pos);

            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                stats.cutoffs += 1;
                trace!(depth, alpha, beta, "beta cutoff");
                break;
            }
        }
        best
    } else {
        let mut best = SCORE_INFINITY;
        for mv in moves {
            stats.apply(pos, mv);
            let score = minimax(pos, depth - 1, alpha, beta, true, perspective, stats);
            stats.undo(pos);

            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                stats.cutoffs += 1;
                trace!(depth, alpha, beta, "alpha cutoff");
                break;
            }
        }
        best
    }
}

/// Scores of every root move and the set tied for best.
#[derive(Debug, Clone, Default)]
pub struct RootSearch {
    /// Each legal root move with its score, in enumeration order
    pub scores: Vec<(Move, Score)>,
    /// Highest score among root moves (None if there are no legal moves)
    pub best_score: Option<Score>,
    /// All moves achieving `best_score`, in enumeration order
    pub best_moves: Vec<Move>,
}

/// Scores every legal root move for the side to move.
///
/// Each root move is searched to `depth - 1` with a full window and the
/// opponent minimizing. A requested depth of 0 behaves like depth 1.
pub fn search_root<R: Rules>(pos: &mut R, depth: u8, stats: &mut SearchStats) -> RootSearch {
    let perspective = pos.side_to_move();
    let child_depth = depth.saturating_sub(1);

    let mut root = RootSearch::default();
    let mut best_score = -SCORE_INFINITY;

    for mv in pos.legal_moves() {
        stats.apply(pos, mv);
        let score = minimax(
            pos,
            child_depth,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            false,
            perspective,
            stats,
        );
        stats.undo(pos);

        debug!(%mv, score, "root move scored");

        if score > best_score {
            best_score = score;
            root.best_moves.clear();
            root.best_moves.push(mv);
        } else if score == best_score {
            root.best_moves.push(mv);
        }
        root.scores.push((mv, score));
    }

    debug_assert!(
        stats.is_balanced(),
        "search left {} applied moves outstanding",
        stats.applied - stats.undone
    );

    if !root.best_moves.is_empty() {
        root.best_score = Some(best_score);
    }
    root
}

/// A move picked from a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// The move to play, promotion already shaped
    pub mv: Move,
    pub score: Score,
    /// How many root moves shared the best score
    pub tied: usize,
}

/// Picks uniformly at random among the moves tied for best, then applies
/// the engine's promotion policy.
pub fn pick<R: Rules, G: Rng + ?Sized>(pos: &R, root: &RootSearch, rng: &mut G) -> Option<Choice> {
    let score = root.best_score?;
    let mv = *root.best_moves.choose(rng)?;
    Some(Choice {
        mv: auto_promote(pos, mv),
        score,
        tied: root.best_moves.len(),
    })
}

/// Chooses a move for the side to move, or `None` when there is no legal move.
///
/// The position is searched in place and left exactly as it was given.
pub fn choose_move<R: Rules, G: Rng + ?Sized>(pos: &mut R, depth: u8, rng: &mut G) -> Option<Move> {
    let mut stats = SearchStats::default();
    let root = search_root(pos, depth, &mut stats);
    pick(pos, &root, rng).map(|choice| choice.mv)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
