//! One game at the board: move entry, engine replies, undo/redo, save/load.
//!
//! Undo and redo work on FEN snapshots rather than the position's move
//! stack, so a loaded game can be stepped back to what was on the board
//! before the load.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chess_core::{
    color_name, move_to_uci, parse_move_text, parse_uci_move, ChessError, Color, Engine, Move, Outcome,
    Position, Rules, SearchLimits, Square,
};
use minimax_engine::{is_promotion_move, shape_promotion, MinimaxEngine, PromotionChoice};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Mode, PlayConfig};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Chess(#[from] ChessError),

    #[error("the game is over")]
    GameOver,

    #[error("it is the engine's turn")]
    EngineTurn,

    #[error("no promotion is waiting for a piece")]
    NoPendingPromotion,

    #[error("choose a promotion piece for {from}{to} first")]
    PromotionPending { from: Square, to: Square },

    #[error("no saved game at {}", .0.display())]
    NoSavedGame(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("save file {} is not valid: {source}", path.display())]
    SaveFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk form of a saved game, also kept on the undo and redo stacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub fen: String,
    /// Plies since the last capture or pawn move, which the FEN clock
    /// cannot carry past 100. Older saves without it use the FEN clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiet_plies: Option<u16>,
}

impl SavedGame {
    pub fn of(pos: &Position) -> Self {
        Self {
            fen: pos.fen(),
            quiet_plies: Some(pos.quiet_plies()),
        }
    }

    pub fn restore(&self) -> Result<Position, ChessError> {
        let pos = Position::from_fen(&self.fen)?;
        Ok(match self.quiet_plies {
            Some(quiet_plies) => pos.with_quiet_plies(quiet_plies),
            None => pos,
        })
    }
}

/// What happened to a submitted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Played(Move),
    /// A pawn reached the last rank; call [`GameSession::promote`] next.
    NeedsPromotion { from: Square, to: Square },
}

pub struct GameSession {
    position: Position,
    mode: Mode,
    engine: MinimaxEngine,
    engine_color: Color,
    depth: u8,
    undo_stack: Vec<SavedGame>,
    redo_stack: Vec<SavedGame>,
    pending_promotion: Option<(Square, Square)>,
    /// Long algebraic text of the move that produced the current position
    last_move: Option<String>,
}

impl GameSession {
    pub fn new(config: &PlayConfig) -> Self {
        let engine = match config.seed {
            Some(seed) => MinimaxEngine::with_seed(seed),
            None => MinimaxEngine::new(),
        };
        Self {
            position: Position::startpos(),
            mode: config.mode,
            engine,
            engine_color: config.engine_color.into(),
            depth: config.depth,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending_promotion: None,
            last_move: None,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn engine_color(&self) -> Color {
        self.engine_color
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn pending_promotion(&self) -> Option<(Square, Square)> {
        self.pending_promotion
    }

    pub fn last_move(&self) -> Option<&str> {
        self.last_move.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.position.outcome()
    }

    /// The engine is seated and has the move in a game still in progress.
    pub fn is_engine_turn(&self) -> bool {
        self.mode == Mode::PlayerVsEngine
            && self.position.side_to_move() == self.engine_color
            && self.outcome().is_none()
    }

    /// Starts over from the initial position with empty history.
    pub fn reset(&mut self) {
        self.position = Position::startpos();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending_promotion = None;
        self.last_move = None;
        self.engine.new_game();
        info!("new game");
    }

    /// Replaces the board with `fen`, keeping the old board on the undo stack.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), SessionError> {
        let next = Position::from_fen(fen)?;
        self.jump_to(next);
        Ok(())
    }

    /// Squares the piece on `from` can legally move to, castling shown as
    /// the king's two-square step. Empty for an empty square or the
    /// opponent's piece.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = Vec::new();
        for mv in self.position.legal_moves().into_iter().filter(|mv| mv.from == from) {
            let text = move_to_uci(&self.position, mv);
            if let Ok((_, to, _)) = parse_move_text(&text) {
                if !targets.contains(&to) {
                    targets.push(to);
                }
            }
        }
        targets
    }

    /// Plays a move typed by a person.
    ///
    /// A pawn move to the last rank without a promotion suffix is held back
    /// until [`GameSession::promote`] supplies the piece.
    pub fn submit(&mut self, text: &str) -> Result<Submitted, SessionError> {
        if let Some((from, to)) = self.pending_promotion {
            return Err(SessionError::PromotionPending { from, to });
        }
        if self.outcome().is_some() {
            return Err(SessionError::GameOver);
        }
        if self.is_engine_turn() {
            return Err(SessionError::EngineTurn);
        }

        let (from, to, promotion) = parse_move_text(text)?;
        if promotion.is_none() {
            let bare = Move {
                from,
                to,
                promotion: None,
            };
            if is_promotion_move(&self.position, bare) {
                let reachable = self
                    .position
                    .legal_moves()
                    .iter()
                    .any(|mv| mv.from == from && mv.to == to);
                if !reachable {
                    return Err(ChessError::IllegalMove(text.trim().to_string()).into());
                }
                debug!(%from, %to, "waiting for promotion piece");
                self.pending_promotion = Some((from, to));
                return Ok(Submitted::NeedsPromotion { from, to });
            }
        }

        let mv = parse_uci_move(&self.position, text)?;
        self.play(mv)?;
        Ok(Submitted::Played(mv))
    }

    /// Completes a held-back promotion with the chosen piece.
    pub fn promote(&mut self, choice: PromotionChoice) -> Result<Move, SessionError> {
        let (from, to) = self
            .pending_promotion
            .take()
            .ok_or(SessionError::NoPendingPromotion)?;
        let bare = Move {
            from,
            to,
            promotion: None,
        };
        let mv = shape_promotion(&self.position, bare, choice);
        self.play(mv)?;
        Ok(mv)
    }

    pub fn cancel_promotion(&mut self) {
        if self.pending_promotion.take().is_some() {
            debug!("promotion cancelled");
        }
    }

    /// Lets the engine move for the side to move. `None` when the game is over.
    pub fn engine_move(&mut self) -> Result<Option<Move>, SessionError> {
        if self.outcome().is_some() {
            return Ok(None);
        }
        let result = self.engine.search(&self.position, SearchLimits::depth(self.depth));
        match result.best_move {
            Some(mv) => {
                self.play(mv)?;
                Ok(Some(mv))
            }
            None => {
                warn!(fen = %self.position.fen(), "engine found no move");
                Ok(None)
            }
        }
    }

    /// Steps back one position. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        let Some(snapshot) = self.undo_stack.pop() else {
            return Ok(false);
        };
        let previous = snapshot.restore()?;
        self.redo_stack.push(SavedGame::of(&self.position));
        self.position = previous;
        self.pending_promotion = None;
        self.last_move = None;
        info!(fen = %snapshot.fen, "undo");
        Ok(true)
    }

    /// Re-applies the last undone position. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool, SessionError> {
        let Some(snapshot) = self.redo_stack.pop() else {
            return Ok(false);
        };
        let next = snapshot.restore()?;
        self.undo_stack.push(SavedGame::of(&self.position));
        self.position = next;
        self.pending_promotion = None;
        self.last_move = None;
        info!(fen = %snapshot.fen, "redo");
        Ok(true)
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let saved = SavedGame::of(&self.position);
        let json = serde_json::to_string_pretty(&saved).map_err(|source| SessionError::SaveFormat {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "game saved");
        Ok(())
    }

    /// Restores a saved game. A missing file is reported as
    /// [`SessionError::NoSavedGame`] and leaves the board untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), SessionError> {
        let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SessionError::NoSavedGame(path.to_path_buf()),
            _ => SessionError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let saved: SavedGame = serde_json::from_str(&contents).map_err(|source| SessionError::SaveFormat {
            path: path.to_path_buf(),
            source,
        })?;
        let next = saved.restore()?;
        self.jump_to(next);
        info!(path = %path.display(), "game loaded");
        Ok(())
    }

    /// Short description of the game state for the status line.
    pub fn status(&self) -> String {
        match self.outcome() {
            Some(Outcome::Checkmate { winner }) => format!("Checkmate! {} Wins!", color_name(winner)),
            Some(Outcome::Stalemate) => "Stalemate! Draw!".to_string(),
            Some(Outcome::InsufficientMaterial) => "Draw by insufficient material!".to_string(),
            Some(Outcome::SeventyFiveMoves) => "Draw by the seventy-five-move rule!".to_string(),
            Some(Outcome::FivefoldRepetition) => "Draw by fivefold repetition!".to_string(),
            None => {
                let side = color_name(self.position.side_to_move());
                if self.position.is_check() {
                    format!("{side} to move (in check)")
                } else {
                    format!("{side} to move")
                }
            }
        }
    }

    fn play(&mut self, mv: Move) -> Result<(), SessionError> {
        let before = SavedGame::of(&self.position);
        let text = move_to_uci(&self.position, mv);
        self.position.try_apply(mv)?;
        self.undo_stack.push(before);
        self.redo_stack.clear();
        info!(mv = %text, "move played");
        self.last_move = Some(text);
        Ok(())
    }

    fn jump_to(&mut self, next: Position) {
        self.undo_stack.push(SavedGame::of(&self.position));
        self.redo_stack.clear();
        self.position = next;
        self.pending_promotion = None;
        self.last_move = None;
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
