//! Tests for game-over detection
//!
//! Covers every way a game can end:
//! - Checkmate
//! - Stalemate
//! - Insufficient material
//! - Seventy-five-move rule
//! - Fivefold repetition

use chess_core::{parse_uci_move, Color, Outcome, Position, Rules};

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, White queen on b6, White king on c7
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();

    assert!(pos.legal_moves().is_empty());
    assert!(!pos.is_check());
    assert!(pos.is_stalemate());
    assert!(!pos.is_checkmate());
    assert_eq!(pos.outcome(), Some(Outcome::Stalemate));
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let pos = Position::from_fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(pos.is_stalemate());
    assert!(pos.is_game_over());
}

// =============================================================================
// Checkmate Tests
// =============================================================================

#[test]
fn test_back_rank_mate() {
    let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert!(pos.is_checkmate());
    assert_eq!(pos.outcome().and_then(Outcome::winner), Some(Color::White));
}

// =============================================================================
// Insufficient Material Tests
// =============================================================================

#[test]
fn test_bare_kings() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    assert!(pos.is_insufficient_material());
    assert_eq!(pos.outcome(), Some(Outcome::InsufficientMaterial));
}

#[test]
fn test_single_minor_piece() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/5B2 w - - 0 1").unwrap();
    assert!(pos.is_insufficient_material());
}

#[test]
fn test_same_shade_bishops() {
    let pos = Position::from_fen("8/8/8/4k3/8/b3K3/8/2B1B3 w - - 0 1").unwrap();
    assert!(pos.is_insufficient_material());
}

#[test]
fn test_opposite_shade_bishops_can_mate() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/2B2B2 w - - 0 1").unwrap();
    assert!(!pos.is_insufficient_material());
}

#[test]
fn test_rook_is_sufficient() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/R7 w - - 0 1").unwrap();
    assert!(!pos.is_insufficient_material());
    assert!(!pos.is_game_over());
}

// =============================================================================
// Seventy-Five-Move Rule Tests
// =============================================================================

#[test]
fn test_seventy_five_move_rule() {
    // Fifty moves already on the clock, then fifty more quiet plies
    let mut pos = Position::from_fen("8/8/8/4k3/8/4K3/8/R7 w - - 100 80").unwrap();
    let shuffle = ["a1a2", "e5d5", "a2a1", "d5e5"];

    for ply in 0..50 {
        assert!(!pos.is_seventyfive_moves(), "ended early at ply {ply}");
        let mv = parse_uci_move(&pos, shuffle[ply % 4]).unwrap();
        pos.apply(mv);
    }

    assert_eq!(pos.quiet_plies(), 150);
    assert!(pos.is_seventyfive_moves());
    assert_eq!(pos.outcome(), Some(Outcome::SeventyFiveMoves));

    // The FEN clock stays within what a FEN parser accepts
    assert!(Position::from_fen(&pos.fen()).is_ok());

    pos.undo();
    assert_eq!(pos.quiet_plies(), 149);
    assert!(!pos.is_seventyfive_moves());
}

#[test]
fn test_pawn_move_resets_seventy_five_move_count() {
    let mut pos = Position::from_fen("8/8/8/4k3/8/4K3/P7/1R6 w - - 100 80").unwrap();
    let mv = parse_uci_move(&pos, "a2a3").unwrap();
    pos.apply(mv);
    assert_eq!(pos.quiet_plies(), 0);
    assert!(!pos.is_game_over());
}

#[test]
fn test_fifty_moves_is_not_game_over() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/R7 w - - 100 80").unwrap();
    assert!(!pos.is_game_over());
}

// =============================================================================
// Repetition Tests
// =============================================================================

#[test]
fn test_fivefold_repetition() {
    let mut pos = Position::startpos();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    for round in 1..=4 {
        for text in shuffle {
            let mv = parse_uci_move(&pos, text).unwrap();
            pos.apply(mv);
        }
        assert_eq!(pos.repetitions(), round + 1);
    }

    assert!(pos.is_fivefold_repetition());
    assert_eq!(pos.outcome(), Some(Outcome::FivefoldRepetition));

    pos.undo();
    assert!(!pos.is_fivefold_repetition());
}
