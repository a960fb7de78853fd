use arrocco::{FenError, FenRecord, Position, PositionError, START_FEN};

const FENS: [&str; 6] = [
    START_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
];

#[test]
fn descriptors_round_trip_through_positions() {
    for fen in FENS {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);

        let again = Position::from_fen(&pos.to_fen()).unwrap();
        assert_eq!(again.board(), pos.board());
        assert_eq!(again.side_to_move(), pos.side_to_move());
        assert_eq!(again.castling(), pos.castling());
        assert_eq!(again.en_passant(), pos.en_passant());
        assert_eq!(again.halfmove_clock(), pos.halfmove_clock());
        assert_eq!(again.key(), pos.key());
    }
}

#[test]
fn children_round_trip_too() {
    let root = Position::from_fen(FENS[1]).unwrap();
    for mv in root.legal_moves() {
        let child = root.apply(mv);
        let reparsed = Position::from_fen(&child.to_fen()).unwrap();
        assert_eq!(reparsed.board(), child.board(), "{mv}");
        assert_eq!(reparsed.castling(), child.castling(), "{mv}");
        assert_eq!(reparsed.en_passant(), child.en_passant(), "{mv}");
        assert_eq!(reparsed.key(), child.key(), "{mv}");
        assert_eq!(reparsed.legal_moves().len(), child.legal_moves().len(), "{mv}");
    }
}

#[test]
fn malformed_descriptors_are_rejected() {
    assert_eq!(
        FenRecord::parse("8/8/8/8/8/8/8/8 w - -"),
        Err(FenError::FieldCount { found: 4 })
    );
    assert!(matches!(
        FenRecord::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"),
        Err(FenError::InvalidPieceChar { ch: 'X' })
    ));
    assert!(matches!(
        FenRecord::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
        Err(FenError::InvalidSide(_))
    ));
    assert!(matches!(
        FenRecord::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkz - 0 1"),
        Err(FenError::InvalidCastling(_))
    ));
    assert!(matches!(
        FenRecord::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1"),
        Err(FenError::InvalidEnPassant(_))
    ));
    // target on the mover's own side of the board
    assert!(matches!(
        FenRecord::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1"),
        Err(FenError::InvalidEnPassant(_))
    ));
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/3pP3/K7 w - d3 0 1"),
        Err(PositionError::Fen(FenError::InvalidEnPassant(_)))
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1"),
        Err(PositionError::Fen(FenError::RankCount { found: 7 }))
    ));
}

#[test]
fn full_move_number_advances_after_black() {
    let root = Position::from_fen(START_FEN).unwrap();
    let after_white = root.apply(&root.parse_uci_move("e2e4").unwrap());
    assert_eq!(after_white.fullmove_number(), 1);
    let after_black = after_white.apply(&after_white.parse_uci_move("c7c5").unwrap());
    assert_eq!(after_black.fullmove_number(), 2);
    assert_eq!(
        after_black.to_fen(),
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
    );
}
