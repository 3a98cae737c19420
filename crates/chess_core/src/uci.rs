//! Long algebraic move text as used by the UCI protocol.

use crate::error::ChessError;
use crate::position::Position;
use crate::rules::Rules;
use crate::types::*;

/// Formats a move as `e2e4` / `e7e8q`, with castling as the king's two-square step.
pub fn move_to_uci(pos: &Position, mv: Move) -> String {
    let to = if pos.is_castle(mv) {
        let file = if mv.to.file() as u8 > mv.from.file() as u8 {
            File::G
        } else {
            File::C
        };
        Square::new(file, mv.from.rank())
    } else {
        mv.to
    };

    let mut s = format!("{}{}", mv.from, to);
    if let Some(kind) = mv.promotion {
        s.push(kind_to_char(kind));
    }
    s
}

/// Splits move text into its squares and optional promotion suffix without
/// consulting a position.
pub fn parse_move_text(text: &str) -> Result<(Square, Square, Option<PieceKind>), ChessError> {
    let malformed = || ChessError::MalformedMove(text.to_string());

    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(malformed());
    }
    let from: Square = text[0..2].to_ascii_lowercase().parse().map_err(|_| malformed())?;
    let to: Square = text[2..4].to_ascii_lowercase().parse().map_err(|_| malformed())?;
    let promo = match text[4..].chars().next() {
        None => None,
        Some(c) => match kind_from_char(c) {
            Some(kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => {
                Some(kind)
            }
            _ => return Err(malformed()),
        },
    };
    Ok((from, to, promo))
}

/// Resolves move text against the legal moves of `pos`.
pub fn parse_uci_move(pos: &Position, text: &str) -> Result<Move, ChessError> {
    let (from, to, promo) = parse_move_text(text)?;
    let mut wanted = format!("{from}{to}");
    if let Some(kind) = promo {
        wanted.push(kind_to_char(kind));
    }

    pos.legal_moves()
        .into_iter()
        .find(|&mv| move_to_uci(pos, mv) == wanted)
        .ok_or_else(|| ChessError::IllegalMove(text.trim().to_string()))
}

/// Applies the arguments of a UCI `position` command:
/// `startpos | fen <fields...>` followed by an optional `moves ...` list.
///
/// `pos` is only replaced when the whole command is valid.
pub fn set_position_from_uci(pos: &mut Position, args: &[&str]) -> Result<(), ChessError> {
    let moves_at = args.iter().position(|&t| t == "moves").unwrap_or(args.len());

    let mut next = match args.first() {
        Some(&"fen") => Position::from_fen(&args[1..moves_at].join(" "))?,
        _ => Position::startpos(),
    };

    for text in args.iter().skip(moves_at + 1) {
        let mv = parse_uci_move(&next, text)?;
        next.apply(mv);
    }

    *pos = next;
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
