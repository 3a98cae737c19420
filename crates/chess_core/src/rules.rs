//! The rules-engine contract the search is written against.

use crate::types::{Color, Move, Piece, Square};

/// A mutable game position that can enumerate, apply and take back moves.
///
/// `apply` and `undo` form a stack: every `undo` takes back the most recent
/// outstanding `apply` and restores the previous state exactly. Searchers
/// rely on this to explore the tree in place instead of cloning per branch.
pub trait Rules {
    fn side_to_move(&self) -> Color;

    /// Clears `moves` and fills it with every legal move for the side to move.
    fn legal_moves_into(&self, moves: &mut Vec<Move>);

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.legal_moves_into(&mut moves);
        moves
    }

    /// Plays a move previously produced by `legal_moves_into`.
    fn apply(&mut self, mv: Move);

    /// Takes back the most recent `apply`, returning the move it played.
    fn undo(&mut self) -> Option<Move>;

    fn piece_at(&self, sq: Square) -> Option<Piece>;

    /// True for checkmate, stalemate, or any other rule that ends the game.
    fn is_game_over(&self) -> bool;

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;
}
