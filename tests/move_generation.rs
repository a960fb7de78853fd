use std::collections::HashMap;

use arrocco::{Color, PieceKind, Position, Square, START_FEN};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn start_position_has_twenty_moves() {
    let pos = Position::from_fen(START_FEN).unwrap();
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.legal_moves().len(), 20);
}

#[test]
fn king_facing_rook_on_open_file() {
    let pos = Position::from_fen("4r2k/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(pos.in_check());
    let king_moves: Vec<String> = pos
        .legal_moves()
        .iter()
        .filter(|m| m.piece.kind == PieceKind::King)
        .map(|m| m.to.to_string())
        .collect();
    assert!(!king_moves.is_empty());
    assert!(king_moves.iter().all(|to| !to.starts_with('e')), "{:?}", king_moves);
}

#[test]
fn en_passant_target_is_offered() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    let pawn_moves: Vec<_> = pos
        .legal_moves()
        .iter()
        .filter(|m| m.from() == sq("e5"))
        .collect();
    assert!(pawn_moves.iter().any(|m| m.to == sq("d6") && m.is_capture()));

    // without the target square there is no diagonal move
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2").unwrap();
    assert!(pos.legal_moves().iter().all(|m| m.to != sq("d6")));
}

#[test]
fn back_rank_mate_is_terminal() {
    let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").unwrap();
    assert!(pos.is_terminal());
    assert!(pos.in_check());
    assert!(pos.is_checkmate());
    assert!(pos.legal_moves().is_empty());
}

#[test]
fn bare_kings_are_terminal_without_check() {
    let pos = Position::from_fen("8/8/4k3/8/8/3K4/8/8 w - - 0 1").unwrap();
    assert!(pos.is_terminal());
    assert!(!pos.in_check());
}

#[test]
fn promotions_always_fan_out_to_four() {
    let fens = [
        "n1n5/P5P1/8/2k5/8/8/8/4K3 w - - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "4k3/8/8/8/8/8/1p6/R3K3 b - - 0 1",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        let mut per_destination: HashMap<(Square, Square), Vec<PieceKind>> = HashMap::new();
        for mv in pos.legal_moves() {
            if mv.piece.kind != PieceKind::Pawn || mv.to.rank() != pos.side_to_move().promotion_rank() {
                continue;
            }
            let kind = mv.promotion.expect("plain move onto the last rank");
            per_destination.entry((mv.from(), mv.to)).or_default().push(kind);
        }
        assert!(!per_destination.is_empty(), "{fen}");
        for (key, kinds) in per_destination {
            assert_eq!(kinds.len(), 4, "{fen} {:?}", key);
            for kind in PieceKind::PROMOTIONS {
                assert!(kinds.contains(&kind));
            }
        }
    }
}

#[test]
fn piece_count_never_grows() {
    let root = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let before = root.board().count();
    for mv in root.legal_moves() {
        let child = root.apply(mv);
        let after = child.board().count();
        let expected = if mv.is_capture() { before - 1 } else { before };
        assert_eq!(after, expected, "{mv}");
        assert_eq!(
            child.friendly_pieces().len() + child.enemy_pieces().len(),
            after,
            "{mv}"
        );
    }
}

#[test]
fn parent_grid_is_independent_of_children() {
    let root = Position::from_fen(START_FEN).unwrap();
    let snapshot = *root.board();
    let children: Vec<Position> = root.legal_moves().iter().map(|m| root.apply(m)).collect();
    assert_eq!(*root.board(), snapshot);
    for (child, mv) in children.iter().zip(root.legal_moves()) {
        assert!(child.board().is_empty(mv.from()));
        assert_eq!(child.board().get(mv.to), Some(mv.piece.marker()));
    }
}

#[test]
fn castling_rights_follow_king_and_rooks() {
    let root = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castles: Vec<String> = root
        .legal_moves()
        .iter()
        .filter(|m| m.is_castle())
        .map(|m| m.to_uci())
        .collect();
    assert_eq!(castles.len(), 2);

    let king_walk = root.apply(&root.parse_uci_move("e1e2").unwrap());
    assert_eq!(king_walk.castling().to_string(), "kq");
    let back = king_walk.apply(&king_walk.parse_uci_move("e8e7").unwrap());
    let home = back.apply(&back.parse_uci_move("e2e1").unwrap());
    assert!(home.castling().is_empty());
    assert!(home.legal_moves().iter().all(|m| !m.is_castle()));
    let reply = home.apply(&home.parse_uci_move("e7e8").unwrap());
    assert!(reply.legal_moves().iter().all(|m| !m.is_castle()));
}
