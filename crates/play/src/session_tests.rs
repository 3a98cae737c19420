use super::*;
use crate::config::Side;
use chess_core::PieceKind;

const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
const STALEMATE: &str = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1";
const PROMOTION: &str = "7k/P7/8/8/8/8/8/K7 w - - 0 1";
const CASTLING: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

fn pvp() -> GameSession {
    GameSession::new(&PlayConfig {
        mode: Mode::PlayerVsPlayer,
        ..PlayConfig::default()
    })
}

fn vs_engine(engine_color: Side) -> GameSession {
    GameSession::new(&PlayConfig {
        mode: Mode::PlayerVsEngine,
        engine_color,
        depth: 2,
        seed: Some(5),
        ..PlayConfig::default()
    })
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("chess_play_{}_{name}.json", std::process::id()))
}

#[test]
fn test_new_session() {
    let session = pvp();
    assert_eq!(session.position().fen(), chess_core::START_FEN);
    assert_eq!(session.status(), "White to move");
    assert!(!session.can_undo());
    assert!(!session.can_redo());
    assert!(!session.is_engine_turn());
}

#[test]
fn test_undo_redo() {
    let mut session = pvp();
    let start = session.position().fen();

    assert!(matches!(session.submit("e2e4").unwrap(), Submitted::Played(_)));
    let after_e4 = session.position().fen();
    assert_eq!(session.status(), "Black to move");

    assert!(session.undo().unwrap());
    assert_eq!(session.position().fen(), start);
    assert!(!session.undo().unwrap());

    assert!(session.redo().unwrap());
    assert_eq!(session.position().fen(), after_e4);
    assert!(!session.redo().unwrap());
}

#[test]
fn test_new_move_clears_redo() {
    let mut session = pvp();
    session.submit("e2e4").unwrap();
    session.undo().unwrap();
    assert!(session.can_redo());

    session.submit("d2d4").unwrap();
    assert!(!session.can_redo());
}

#[test]
fn test_illegal_and_malformed_moves() {
    let mut session = pvp();
    assert!(matches!(
        session.submit("e2e5"),
        Err(SessionError::Chess(ChessError::IllegalMove(_)))
    ));
    assert!(matches!(
        session.submit("hello"),
        Err(SessionError::Chess(ChessError::MalformedMove(_)))
    ));
    assert_eq!(session.position().fen(), chess_core::START_FEN);
    assert!(!session.can_undo());
}

#[test]
fn test_promotion_waits_for_choice() {
    let mut session = pvp();
    session.set_fen(PROMOTION).unwrap();

    let submitted = session.submit("a7a8").unwrap();
    assert_eq!(
        submitted,
        Submitted::NeedsPromotion {
            from: Square::A7,
            to: Square::A8
        }
    );
    assert!(matches!(
        session.submit("a1b1"),
        Err(SessionError::PromotionPending { .. })
    ));

    let mv = session.promote("n".parse().unwrap()).unwrap();
    assert_eq!(mv.promotion, Some(PieceKind::Knight));
    assert_eq!(
        session.position().piece_at(Square::A8).map(|pc| pc.kind),
        Some(PieceKind::Knight)
    );
    assert_eq!(session.pending_promotion(), None);
}

#[test]
fn test_promotion_with_suffix_plays_directly() {
    let mut session = pvp();
    session.set_fen(PROMOTION).unwrap();

    let Submitted::Played(mv) = session.submit("a7a8r").unwrap() else {
        panic!("expected the move to be played");
    };
    assert_eq!(mv.promotion, Some(PieceKind::Rook));
}

#[test]
fn test_cancelled_promotion_leaves_board() {
    let mut session = pvp();
    session.set_fen(PROMOTION).unwrap();
    let before = session.position().fen();

    session.submit("a7a8").unwrap();
    session.cancel_promotion();

    assert_eq!(session.position().fen(), before);
    assert!(matches!(session.promote("q".parse().unwrap()), Err(SessionError::NoPendingPromotion)));
}

#[test]
fn test_promote_without_pending() {
    let mut session = pvp();
    assert!(matches!(
        session.promote("q".parse().unwrap()),
        Err(SessionError::NoPendingPromotion)
    ));
}

#[test]
fn test_engine_replies_as_black() {
    let mut session = vs_engine(Side::Black);
    assert!(!session.is_engine_turn());

    session.submit("e2e4").unwrap();
    assert!(session.is_engine_turn());
    assert!(matches!(session.submit("d2d4"), Err(SessionError::EngineTurn)));

    let reply = session.engine_move().unwrap();
    assert!(reply.is_some());
    assert_eq!(session.position().side_to_move(), Color::White);
    assert!(!session.is_engine_turn());
}

#[test]
fn test_engine_opens_as_white() {
    let mut session = vs_engine(Side::White);
    assert!(session.is_engine_turn());
    assert!(matches!(session.submit("e2e4"), Err(SessionError::EngineTurn)));

    session.engine_move().unwrap();
    assert_eq!(session.position().side_to_move(), Color::Black);
}

#[test]
fn test_engine_takes_hanging_queen() {
    let mut session = vs_engine(Side::White);
    session.set_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();

    let mv = session.engine_move().unwrap().unwrap();
    assert_eq!((mv.from, mv.to), (Square::E4, Square::D5));
}

#[test]
fn test_game_over_statuses() {
    let mut session = vs_engine(Side::White);
    session.set_fen(FOOLS_MATE).unwrap();
    assert_eq!(session.status(), "Checkmate! Black Wins!");
    assert!(!session.is_engine_turn());
    assert_eq!(session.engine_move().unwrap(), None);
    assert!(matches!(session.submit("e2e4"), Err(SessionError::GameOver)));

    session.set_fen(STALEMATE).unwrap();
    assert_eq!(session.status(), "Stalemate! Draw!");

    session.set_fen("8/8/4k3/8/8/2K5/8/8 w - - 0 1").unwrap();
    assert_eq!(session.status(), "Draw by insufficient material!");
}

#[test]
fn test_status_reports_check() {
    let mut session = pvp();
    session.set_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
    assert_eq!(session.status(), "White to move (in check)");
}

#[test]
fn test_legal_targets() {
    let session = pvp();
    let targets = session.legal_targets(Square::E2);
    assert_eq!(targets.len(), 2);
    assert!(targets.contains(&Square::E3));
    assert!(targets.contains(&Square::E4));
    assert_eq!(session.legal_targets(Square::G1).len(), 2);
    assert!(session.legal_targets(Square::E4).is_empty());
    assert!(session.legal_targets(Square::E7).is_empty());
}

#[test]
fn test_legal_targets_castling_and_promotion() {
    let mut session = pvp();
    session.set_fen(CASTLING).unwrap();
    let king = session.legal_targets(Square::E1);
    assert!(king.contains(&Square::G1));
    assert!(king.contains(&Square::C1));
    assert!(!king.contains(&Square::H1));
    assert!(!king.contains(&Square::A1));

    session.set_fen(PROMOTION).unwrap();
    assert_eq!(session.legal_targets(Square::A7), vec![Square::A8]);
}

#[test]
fn test_save_and_load() {
    let path = temp_path("save_and_load");
    let mut session = pvp();
    session.submit("e2e4").unwrap();
    session.submit("c7c5").unwrap();
    let saved_fen = session.position().fen();
    session.save(&path).unwrap();

    let mut other = pvp();
    other.load(&path).unwrap();
    assert_eq!(other.position().fen(), saved_fen);

    // the position before the load is one undo away
    assert!(other.undo().unwrap());
    assert_eq!(other.position().fen(), chess_core::START_FEN);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_missing_file() {
    let path = temp_path("missing");
    let mut session = pvp();
    session.submit("e2e4").unwrap();
    let before = session.position().fen();

    assert!(matches!(session.load(&path), Err(SessionError::NoSavedGame(_))));
    assert_eq!(session.position().fen(), before);
}

#[test]
fn test_load_rejects_bad_contents() {
    let path = temp_path("bad_contents");
    let mut session = pvp();

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(session.load(&path), Err(SessionError::SaveFormat { .. })));

    std::fs::write(&path, r#"{"fen": "not a fen"}"#).unwrap();
    assert!(matches!(
        session.load(&path),
        Err(SessionError::Chess(ChessError::InvalidFen { .. }))
    ));
    assert_eq!(session.position().fen(), chess_core::START_FEN);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_reset() {
    let mut session = pvp();
    session.submit("e2e4").unwrap();
    session.reset();

    assert_eq!(session.position().fen(), chess_core::START_FEN);
    assert!(!session.can_undo());
    assert!(!session.can_redo());
}

#[test]
fn test_last_move_uses_king_step_for_castling() {
    let mut session = pvp();
    session.set_fen(CASTLING).unwrap();
    assert_eq!(session.last_move(), None);

    session.submit("e1g1").unwrap();
    assert_eq!(session.last_move(), Some("e1g1"));
    assert_eq!(
        session.position().piece_at(Square::F1).map(|pc| pc.kind),
        Some(PieceKind::Rook)
    );

    session.undo().unwrap();
    assert_eq!(session.last_move(), None);
}

#[test]
fn test_quiet_plies_survive_undo_redo_and_save() {
    let path = temp_path("quiet_plies");
    let mut session = pvp();
    session.set_fen("8/8/8/4k3/8/4K3/8/R7 w - - 100 80").unwrap();

    session.submit("a1a2").unwrap();
    session.submit("e5d5").unwrap();
    assert_eq!(session.position().quiet_plies(), 102);
    assert!(session.position().fen().contains(" 100 "));

    assert!(session.undo().unwrap());
    assert_eq!(session.position().quiet_plies(), 101);
    assert!(session.redo().unwrap());
    assert_eq!(session.position().quiet_plies(), 102);

    session.save(&path).unwrap();
    let mut other = pvp();
    other.load(&path).unwrap();
    assert_eq!(other.position().quiet_plies(), 102);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_save_without_quiet_plies() {
    let path = temp_path("fen_only");
    std::fs::write(&path, r#"{"fen": "8/8/8/4k3/8/4K3/8/R7 w - - 12 40"}"#).unwrap();

    let mut session = pvp();
    session.load(&path).unwrap();
    assert_eq!(session.position().quiet_plies(), 12);

    std::fs::remove_file(&path).unwrap();
}
