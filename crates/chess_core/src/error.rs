//! Errors reported by the rules layer.

use thiserror::Error;

use crate::types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("malformed move text '{0}' (expected e.g. e2e4 or e7e8q)")]
    MalformedMove(String),

    #[error("illegal move '{0}' in this position")]
    IllegalMove(String),

    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}
