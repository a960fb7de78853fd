//! Attack detection on a bare grid.
//!
//! Works on a [`Board`] rather than a full position so the legality filter can
//! test a hypothetical grid without building a position for it.

use crate::board::{Board, Color, Marker, PieceKind, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-1, -2),
    (1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (1, -1),
    (-1, 0),
    (-1, 1),
    (-1, -1),
    (0, 1),
    (0, -1),
];

pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

fn holds(board: &Board, sq: Option<Square>, marker: Marker) -> bool {
    sq.map_or(false, |s| board.get(s) == Some(marker))
}

/// First occupied square along a ray, or `None` if the ray leaves the board.
fn first_blocker(board: &Board, from: Square, df: i8, dr: i8) -> Option<Marker> {
    let mut cur = from;
    while let Some(next) = cur.offset(df, dr) {
        if let Some(marker) = board.get(next) {
            return Some(marker);
        }
        cur = next;
    }
    None
}

/// Is `sq` attacked by any piece of colour `by`?
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    let knight = Marker::new(by, PieceKind::Knight);
    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(board, sq.offset(df, dr), knight))
    {
        return true;
    }

    // An attacking pawn stands one step "behind" sq from its own point of view
    let pawn = Marker::new(by, PieceKind::Pawn);
    let dr = -by.forward();
    if holds(board, sq.offset(-1, dr), pawn) || holds(board, sq.offset(1, dr), pawn) {
        return true;
    }

    let queen = Marker::new(by, PieceKind::Queen);
    let rook = Marker::new(by, PieceKind::Rook);
    let bishop = Marker::new(by, PieceKind::Bishop);
    for &(df, dr) in ORTHOGONALS.iter() {
        if let Some(m) = first_blocker(board, sq, df, dr) {
            if m == rook || m == queen {
                return true;
            }
        }
    }
    for &(df, dr) in DIAGONALS.iter() {
        if let Some(m) = first_blocker(board, sq, df, dr) {
            if m == bishop || m == queen {
                return true;
            }
        }
    }

    let king = Marker::new(by, PieceKind::King);
    KING_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(board, sq.offset(df, dr), king))
}
