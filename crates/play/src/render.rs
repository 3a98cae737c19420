//! Plain-text board for the terminal.

use chess_core::{kind_to_char, Color, File, Position, Rank, Rules, Square};

/// Piece letter as in FEN: uppercase for White, lowercase for Black.
fn piece_letter(pos: &Position, sq: Square) -> char {
    match pos.piece_at(sq) {
        Some(pc) if pc.color == Color::White => kind_to_char(pc.kind).to_ascii_uppercase(),
        Some(pc) => kind_to_char(pc.kind),
        None => '.',
    }
}

/// Draws the board with rank and file labels. `flipped` puts Black at the bottom.
///
/// Squares in `marked` are drawn as `*` when empty, for showing move targets.
pub fn render_board(pos: &Position, flipped: bool, marked: &[Square]) -> String {
    let mut ranks: Vec<Rank> = Rank::ALL.to_vec();
    let mut files: Vec<File> = File::ALL.to_vec();
    if flipped {
        files.reverse();
    } else {
        ranks.reverse();
    }

    let mut out = String::new();
    for &rank in &ranks {
        out.push(rank_char(rank));
        out.push(' ');
        for &file in &files {
            let sq = Square::new(file, rank);
            let c = match piece_letter(pos, sq) {
                '.' if marked.contains(&sq) => '*',
                c => c,
            };
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }

    out.push_str("  ");
    for &file in &files {
        out.push(' ');
        out.push(file_char(file));
    }
    out.push('\n');
    out
}

fn rank_char(rank: Rank) -> char {
    (b'1' + rank as u8) as char
}

fn file_char(file: File) -> char {
    (b'a' + file as u8) as char
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
