//! Piece values with a stable identity across positions.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::board::{Color, Marker, PieceKind, Square};
use crate::eval;

/// Identity assigned once when a piece enters the game. Children of a
/// position carry the same id for the same piece, even though every piece is
/// a fresh value in every position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece on (or just taken off) the board.
///
/// Equality and hashing look only at [`PieceId`].
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
    pub has_moved: bool,
    pub captured: bool,
}

impl Piece {
    pub fn new(id: PieceId, color: Color, kind: PieceKind, square: Square) -> Self {
        Self {
            id,
            color,
            kind,
            square,
            has_moved: false,
            captured: false,
        }
    }

    pub fn with_moved(mut self, has_moved: bool) -> Self {
        self.has_moved = has_moved;
        self
    }

    pub fn marker(&self) -> Marker {
        Marker::new(self.color, self.kind)
    }

    /// Material plus positional bonus for the square it stands on.
    pub fn value(&self) -> i32 {
        eval::piece_value(self.kind, self.color, self.square)
    }

    /// Best guess at the has-moved flag when all we know is the square:
    /// pawns off their home rank, kings and rooks off their initial squares.
    pub fn infer_has_moved(color: Color, kind: PieceKind, square: Square) -> bool {
        match kind {
            PieceKind::Pawn => square.rank() != color.pawn_home_rank(),
            PieceKind::King => square != Square::new(4, color.back_rank()),
            PieceKind::Rook => {
                square.rank() != color.back_rank() || (square.file() != 0 && square.file() != 7)
            }
            _ => false,
        }
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.marker().to_char(), self.square, self.id)
    }
}
