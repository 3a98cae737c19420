//! Rewriting pawn moves that reach the last rank into explicit promotions.
//!
//! The engine always promotes to a queen. Moves entered by a person carry
//! whatever piece they picked, which must be one of the four promotable kinds.

use std::str::FromStr;

use chess_core::{promotion_rank, ChessError, Move, PieceKind, Rules};

/// Promotable kinds, strongest first.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// What the engine promotes to. A policy, not a rule of the game.
pub const ENGINE_PROMOTION: PieceKind = PieceKind::Queen;

/// A validated promotion piece chosen by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionChoice(PieceKind);

impl PromotionChoice {
    pub fn new(kind: PieceKind) -> Result<Self, ChessError> {
        if PROMOTION_KINDS.contains(&kind) {
            Ok(Self(kind))
        } else {
            Err(ChessError::InvalidPromotion(kind))
        }
    }

    pub fn kind(self) -> PieceKind {
        self.0
    }
}

impl FromStr for PromotionChoice {
    type Err = ChessError;

    /// Accepts `q`, `queen`, `r`, `rook`, `b`, `bishop`, `n`, `knight`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "q" | "queen" => PieceKind::Queen,
            "r" | "rook" => PieceKind::Rook,
            "b" | "bishop" => PieceKind::Bishop,
            "n" | "knight" => PieceKind::Knight,
            "k" | "king" => return Err(ChessError::InvalidPromotion(PieceKind::King)),
            "p" | "pawn" => return Err(ChessError::InvalidPromotion(PieceKind::Pawn)),
            _ => return Err(ChessError::MalformedMove(s.to_string())),
        };
        Ok(Self(kind))
    }
}

/// True when `mv` moves a pawn onto its final rank.
pub fn is_promotion_move<R: Rules + ?Sized>(pos: &R, mv: Move) -> bool {
    match pos.piece_at(mv.from) {
        Some(pc) if pc.kind == PieceKind::Pawn => mv.to.rank() == promotion_rank(pc.color),
        _ => false,
    }
}

/// Gives a last-rank pawn move the chosen promotion piece. Other moves pass
/// through untouched.
pub fn shape_promotion<R: Rules + ?Sized>(pos: &R, mv: Move, choice: PromotionChoice) -> Move {
    if is_promotion_move(pos, mv) {
        Move {
            promotion: Some(choice.kind()),
            ..mv
        }
    } else {
        mv
    }
}

/// The engine's own promotion policy: always a queen.
pub fn auto_promote<R: Rules + ?Sized>(pos: &R, mv: Move) -> Move {
    shape_promotion(pos, mv, PromotionChoice(ENGINE_PROMOTION))
}

#[cfg(test)]
#[path = "promotion_tests.rs"]
mod promotion_tests;
