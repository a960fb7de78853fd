//! Static evaluation: material values plus piece-square tables.
//!
//! Every table below is written from White's point of view in display order:
//! the first row is rank 8, the last row is rank 1, files run a..h left to right.
//! Black tables are the vertical mirror, so a Black pawn on e7 reads the same
//! bonus as a White pawn on e2.

use crate::board::{Color, PieceKind, Square};

// ============================================================================
// MATERIAL (centipawns)
// ============================================================================
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 333;
pub const ROOK_VALUE: i32 = 510;
pub const QUEEN_VALUE: i32 = 880;
pub const KING_VALUE: i32 = 200_000;

/// Which king table applies. Evaluation currently always uses the midgame
/// profile; the endgame table is exposed for callers that want to switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Midgame,
    Endgame,
}

pub fn material_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================
type Table = [i32; 64];

const fn mirror(table: &Table) -> Table {
    let mut out = [0; 64];
    let mut i = 0;
    while i < 64 {
        let row = i / 8;
        let file = i % 8;
        out[i] = table[(7 - row) * 8 + file];
        i += 1;
    }
    out
}

#[rustfmt::skip]
const WHITE_PAWN: Table = [
     0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
     5,   5,  10,  25,  25,  10,   5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     5,  10,  10, -20, -20,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const WHITE_KNIGHT: Table = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const WHITE_BISHOP: Table = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const WHITE_ROOK: Table = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10,  10,  10,  10,  10,   5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const WHITE_QUEEN: Table = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,   5,   5,   5,   0, -10,
    -5,   0,   5,   5,   5,   5,   0,  -5,
     0,   0,   5,   5,   5,   5,   0,  -5,
   -10,   5,   5,   5,   5,   5,   0, -10,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

// Midgame: stay behind the pawn shield, preferably castled
#[rustfmt::skip]
const WHITE_KING_MIDGAME: Table = [
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -10, -20, -20, -20, -20, -20, -20, -10,
    20,  20,   0,   0,   0,   0,  20,  20,
    20,  30,  10,   0,   0,  10,  30,  20,
];

// Endgame: centralise
#[rustfmt::skip]
const WHITE_KING_ENDGAME: Table = [
   -50, -40, -30, -20, -20, -30, -40, -50,
   -30, -20, -10,   0,   0, -10, -20, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -30,   0,   0,   0,   0, -30, -30,
   -50, -30, -30, -30, -30, -30, -30, -50,
];

const BLACK_PAWN: Table = mirror(&WHITE_PAWN);
const BLACK_KNIGHT: Table = mirror(&WHITE_KNIGHT);
const BLACK_BISHOP: Table = mirror(&WHITE_BISHOP);
const BLACK_ROOK: Table = mirror(&WHITE_ROOK);
const BLACK_QUEEN: Table = mirror(&WHITE_QUEEN);
const BLACK_KING_MIDGAME: Table = mirror(&WHITE_KING_MIDGAME);
const BLACK_KING_ENDGAME: Table = mirror(&WHITE_KING_ENDGAME);

fn table(kind: PieceKind, color: Color, phase: GamePhase) -> &'static Table {
    match (color, kind, phase) {
        (Color::White, PieceKind::Pawn, _) => &WHITE_PAWN,
        (Color::White, PieceKind::Knight, _) => &WHITE_KNIGHT,
        (Color::White, PieceKind::Bishop, _) => &WHITE_BISHOP,
        (Color::White, PieceKind::Rook, _) => &WHITE_ROOK,
        (Color::White, PieceKind::Queen, _) => &WHITE_QUEEN,
        (Color::White, PieceKind::King, GamePhase::Midgame) => &WHITE_KING_MIDGAME,
        (Color::White, PieceKind::King, GamePhase::Endgame) => &WHITE_KING_ENDGAME,
        (Color::Black, PieceKind::Pawn, _) => &BLACK_PAWN,
        (Color::Black, PieceKind::Knight, _) => &BLACK_KNIGHT,
        (Color::Black, PieceKind::Bishop, _) => &BLACK_BISHOP,
        (Color::Black, PieceKind::Rook, _) => &BLACK_ROOK,
        (Color::Black, PieceKind::Queen, _) => &BLACK_QUEEN,
        (Color::Black, PieceKind::King, GamePhase::Midgame) => &BLACK_KING_MIDGAME,
        (Color::Black, PieceKind::King, GamePhase::Endgame) => &BLACK_KING_ENDGAME,
    }
}

/// Positional bonus for a piece of `kind`/`color` standing on `sq`.
pub fn positional_bonus(kind: PieceKind, color: Color, sq: Square, phase: GamePhase) -> i32 {
    let row = 7 - sq.rank() as usize;
    table(kind, color, phase)[row * 8 + sq.file() as usize]
}

/// Material plus midgame positional bonus.
pub fn piece_value(kind: PieceKind, color: Color, sq: Square) -> i32 {
    material_value(kind) + positional_bonus(kind, color, sq, GamePhase::Midgame)
}
