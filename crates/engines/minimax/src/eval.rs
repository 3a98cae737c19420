//! Material-only position evaluation

use chess_core::{Color, PieceKind, Rules, Square};

/// Signed score from a fixed perspective; positive favors that side.
pub type Score = i32;

/// Returns the material value of a piece kind.
///
/// The king's value dwarfs any achievable material swing, so losing it is
/// never outweighed by captures elsewhere.
#[inline]
pub fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 1000,
    }
}

/// Evaluates the position from `perspective`'s point of view.
///
/// Sums the value of every piece on the board, counting `perspective`'s
/// pieces positively and the opponent's negatively. No mobility, king
/// safety or structure terms.
pub fn evaluate<R: Rules + ?Sized>(pos: &R, perspective: Color) -> Score {
    Square::ALL
        .iter()
        .filter_map(|&sq| pos.piece_at(sq))
        .map(|pc| {
            let v = piece_value(pc.kind);
            if pc.color == perspective {
                v
            } else {
                -v
            }
        })
        .sum()
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
