use cozy_chess::Board;

use crate::error::ChessError;
use crate::rules::Rules;
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Plies without a capture or pawn move after which the game is drawn.
const SEVENTY_FIVE_MOVE_PLIES: u16 = 150;

/// Largest halfmove clock a FEN may carry.
const MAX_FEN_HALFMOVE_CLOCK: u16 = 100;

/// Occurrences of one position that end the game by repetition.
const FIVEFOLD: usize = 5;

/// Why a game is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

/// What `undo` needs to restore the position before a move.
#[derive(Clone, Debug)]
struct Undo {
    board: Board,
    mv: Move,
    quiet_plies: u16,
}

/// A board plus the stack of boards it came from.
///
/// Each `apply` pushes the previous board, each `undo` pops it back, so the
/// position is restored exactly no matter how deep a search went.
///
/// The board's own halfmove clock stops at 100, so plies since the last
/// capture or pawn move are counted here instead.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    quiet_plies: u16,
    history: Vec<Undo>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            quiet_plies: u16::from(board.halfmove_clock()),
            board,
            history: Vec::new(),
        }
    }

    /// Overrides the quiet-ply count taken from the FEN halfmove clock,
    /// for positions restored from a snapshot whose clock was capped.
    pub fn with_quiet_plies(mut self, quiet_plies: u16) -> Self {
        self.quiet_plies = quiet_plies;
        self
    }

    /// Parses a FEN string. The halfmove and fullmove counters may be omitted.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let full = match fields.len() {
            4 => format!("{} 0 1", fields.join(" ")),
            5 => format!("{} 1", fields.join(" ")),
            _ => fields.join(" "),
        };
        let board = Board::from_fen(&full, false).map_err(|e| ChessError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e:?}"),
        })?;
        Ok(Self::from_board(board))
    }

    /// FEN of the board. The halfmove field never exceeds 100, the most a
    /// FEN parser accepts; [`Position::quiet_plies`] holds the true count.
    pub fn fen(&self) -> String {
        let fen = self.board.to_string();
        let over = fen
            .split(' ')
            .nth(4)
            .and_then(|clock| clock.parse::<u16>().ok())
            .is_some_and(|clock| clock > MAX_FEN_HALFMOVE_CLOCK);
        if !over {
            return fen;
        }

        let capped = MAX_FEN_HALFMOVE_CLOCK.to_string();
        fen.split(' ')
            .enumerate()
            .map(|(i, field)| if i == 4 { capped.as_str() } else { field })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of applied moves not yet taken back.
    pub fn applied_len(&self) -> usize {
        self.history.len()
    }

    /// Plies since the last capture or pawn move, uncapped.
    pub fn quiet_plies(&self) -> u16 {
        self.quiet_plies
    }

    /// The piece standing on the move's source square.
    pub fn moved_piece(&self, mv: Move) -> Option<Piece> {
        self.piece_at(mv.from)
    }

    /// A capture or pawn move, which resets the quiet-ply count.
    pub fn is_irreversible(&self, mv: Move) -> bool {
        self.moved_piece(mv).is_some_and(|pc| pc.kind == PieceKind::Pawn)
            || self.board.color_on(mv.to) == Some(opponent(self.board.side_to_move()))
    }

    /// Castling is encoded as the king capturing its own rook.
    pub fn is_castle(&self, mv: Move) -> bool {
        self.board.piece_on(mv.from) == Some(PieceKind::King)
            && self.board.color_on(mv.to) == Some(self.board.side_to_move())
    }

    /// Plays a move supplied from outside the search, rejecting illegal ones.
    pub fn try_apply(&mut self, mv: Move) -> Result<(), ChessError> {
        if !self.board.is_legal(mv) {
            return Err(ChessError::IllegalMove(mv.to_string()));
        }
        self.apply(mv);
        Ok(())
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|_| true)
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or bishops that all stand on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(PieceKind::Pawn) | b.pieces(PieceKind::Rook) | b.pieces(PieceKind::Queen);
        if !heavy.is_empty() {
            return false;
        }

        let knights = b.pieces(PieceKind::Knight);
        let bishops = b.pieces(PieceKind::Bishop);
        if (knights | bishops).into_iter().count() <= 1 {
            return true;
        }
        if !knights.is_empty() {
            return false;
        }

        let mut shades = bishops
            .into_iter()
            .map(|sq| (sq.file() as usize + sq.rank() as usize) % 2);
        let first = shades.next();
        shades.all(|shade| Some(shade) == first)
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.quiet_plies >= SEVENTY_FIVE_MOVE_PLIES
    }

    /// How many times the current position occurred since this `Position`
    /// was set up, counting the current occurrence.
    pub fn repetitions(&self) -> usize {
        let key = self.board.hash();
        1 + self
            .history
            .iter()
            .filter(|undo| undo.board.hash() == key)
            .count()
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetitions() >= FIVEFOLD
    }

    /// The reason the game is over, if it is. Mate and stalemate take
    /// precedence over the draw rules.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.has_legal_moves() {
            return Some(if self.is_check() {
                Outcome::Checkmate {
                    winner: opponent(self.side_to_move()),
                }
            } else {
                Outcome::Stalemate
            });
        }
        if self.is_insufficient_material() {
            Some(Outcome::InsufficientMaterial)
        } else if self.is_seventyfive_moves() {
            Some(Outcome::SeventyFiveMoves)
        } else if self.is_fivefold_repetition() {
            Some(Outcome::FivefoldRepetition)
        } else {
            None
        }
    }
}

impl Rules for Position {
    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    fn legal_moves_into(&self, moves: &mut Vec<Move>) {
        moves.clear();
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
    }

    fn apply(&mut self, mv: Move) {
        debug_assert!(self.board.is_legal(mv), "apply called with illegal move {mv}");
        let quiet_plies = if self.is_irreversible(mv) {
            0
        } else {
            self.quiet_plies.saturating_add(1)
        };
        self.history.push(Undo {
            board: self.board.clone(),
            mv,
            quiet_plies: self.quiet_plies,
        });
        self.board.play_unchecked(mv);
        self.quiet_plies = quiet_plies;
    }

    fn undo(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        self.board = undo.board;
        self.quiet_plies = undo.quiet_plies;
        Some(undo.mv)
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        let kind = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some(Piece::new(color, kind))
    }

    fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    fn is_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves()
    }

    fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves()
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
