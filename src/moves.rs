use std::fmt;
use std::hash::{Hash, Hasher};

use crate::board::{Marker, PieceKind, Square};
use crate::piece::Piece;

/// A candidate move: which piece, where to, optional promotion and the
/// marker it takes (for en passant, the bypassed pawn).
///
/// `piece` is a snapshot from the position the move was generated in, so
/// `piece.square` is the origin square. Two moves are equal when the piece
/// identity, origin, destination, promotion and captured marker all agree.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub piece: Piece,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub capture: Option<Marker>,
}

impl Move {
    pub fn new(piece: Piece, to: Square) -> Self {
        Self {
            piece,
            to,
            promotion: None,
            capture: None,
        }
    }

    pub fn capturing(mut self, marker: Marker) -> Self {
        self.capture = Some(marker);
        self
    }

    pub fn promoting(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    pub fn from(&self) -> Square {
        self.piece.square
    }

    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// King stepping two files: castling.
    pub fn is_castle(&self) -> bool {
        self.piece.kind == PieceKind::King && self.from().file().abs_diff(self.to.file()) == 2
    }

    /// Long algebraic form, e.g. `e2e4`, `e7e8q`.
    pub fn to_uci(&self) -> String {
        let mut out = format!("{}{}", self.from(), self.to);
        if let Some(kind) = self.promotion {
            out.push(kind.letter());
        }
        out
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece.id == other.piece.id
            && self.from() == other.from()
            && self.to == other.to
            && self.promotion == other.promotion
            && self.capture == other.capture
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.piece.id.hash(state);
        self.from().hash(state);
        self.to.hash(state);
        self.promotion.hash(state);
        self.capture.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::piece::PieceId;

    #[test]
    fn uci_text() {
        let pawn = Piece::new(PieceId(1), Color::White, PieceKind::Pawn, Square::new(4, 6));
        let mv = Move::new(pawn, Square::new(4, 7)).promoting(PieceKind::Queen);
        assert_eq!(mv.to_uci(), "e7e8q");

        let king = Piece::new(PieceId(2), Color::Black, PieceKind::King, Square::new(4, 7));
        let castle = Move::new(king, Square::new(6, 7));
        assert!(castle.is_castle());
        assert_eq!(castle.to_string(), "e8g8");
    }

    #[test]
    fn promotion_choices_are_distinct_moves() {
        let pawn = Piece::new(PieceId(1), Color::White, PieceKind::Pawn, Square::new(0, 6));
        let base = Move::new(pawn, Square::new(0, 7));
        let queen = base.promoting(PieceKind::Queen);
        let knight = base.promoting(PieceKind::Knight);
        assert_ne!(queen, knight);
        assert_ne!(queen, base);
    }

    #[test]
    fn same_piece_from_another_square_is_another_move() {
        let pawn = Piece::new(PieceId(5), Color::White, PieceKind::Pawn, Square::new(4, 1));
        let mut advanced = pawn;
        advanced.square = Square::new(4, 2);
        let from_home = Move::new(pawn, Square::new(4, 3));
        let from_e3 = Move::new(advanced, Square::new(4, 3));
        assert_ne!(from_home, from_e3);
        assert_eq!(from_home, Move::new(pawn, Square::new(4, 3)));
    }
}
