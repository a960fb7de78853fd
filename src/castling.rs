//! Castling rights: a subset of {K, Q, k, q}.

use std::fmt;

use crate::board::{Color, Square};
use crate::error::FenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    KingSide,
    QueenSide,
}

impl Wing {
    /// File the rook starts on.
    pub fn rook_file(self) -> u8 {
        match self {
            Wing::KingSide => 7,
            Wing::QueenSide => 0,
        }
    }

    /// File the rook lands on after castling.
    pub fn rook_target_file(self) -> u8 {
        match self {
            Wing::KingSide => 5,
            Wing::QueenSide => 3,
        }
    }

    /// File the king lands on after castling.
    pub fn king_target_file(self) -> u8 {
        match self {
            Wing::KingSide => 6,
            Wing::QueenSide => 2,
        }
    }
}

/// Bit layout mirrors the descriptor order: bit 3=K, bit 2=Q, bit 1=k, bit 0=q.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    fn bit(color: Color, wing: Wing) -> u8 {
        match (color, wing) {
            (Color::White, Wing::KingSide) => 0b1000,
            (Color::White, Wing::QueenSide) => 0b0100,
            (Color::Black, Wing::KingSide) => 0b0010,
            (Color::Black, Wing::QueenSide) => 0b0001,
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn has(self, color: Color, wing: Wing) -> bool {
        self.0 & Self::bit(color, wing) != 0
    }

    pub fn insert(&mut self, color: Color, wing: Wing) {
        self.0 |= Self::bit(color, wing);
    }

    pub fn revoke(&mut self, color: Color, wing: Wing) {
        self.0 &= !Self::bit(color, wing);
    }

    pub fn revoke_color(&mut self, color: Color) {
        self.revoke(color, Wing::KingSide);
        self.revoke(color, Wing::QueenSide);
    }

    /// Drops the right tied to a rook's initial square, if `sq` is one.
    /// Used both when that rook moves away and when it is captured there.
    pub fn revoke_rook_square(&mut self, sq: Square) {
        for color in [Color::White, Color::Black] {
            if sq.rank() != color.back_rank() {
                continue;
            }
            for wing in [Wing::KingSide, Wing::QueenSide] {
                if sq.file() == wing.rook_file() {
                    self.revoke(color, wing);
                }
            }
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn parse(field: &str) -> Result<Self, FenError> {
        if field == "-" {
            return Ok(Self::NONE);
        }
        let mut rights = Self::NONE;
        for ch in field.chars() {
            let (color, wing) = match ch {
                'K' => (Color::White, Wing::KingSide),
                'Q' => (Color::White, Wing::QueenSide),
                'k' => (Color::Black, Wing::KingSide),
                'q' => (Color::Black, Wing::QueenSide),
                _ => return Err(FenError::InvalidCastling(field.to_string())),
            };
            if rights.has(color, wing) {
                return Err(FenError::InvalidCastling(field.to_string()));
            }
            rights.insert(color, wing);
        }
        if rights.is_empty() {
            return Err(FenError::InvalidCastling(field.to_string()));
        }
        Ok(rights)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let flags = [
            (Color::White, Wing::KingSide, 'K'),
            (Color::White, Wing::QueenSide, 'Q'),
            (Color::Black, Wing::KingSide, 'k'),
            (Color::Black, Wing::QueenSide, 'q'),
        ];
        for (color, wing, ch) in flags {
            if self.has(color, wing) {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format() {
        let rights = CastlingRights::parse("Kq").unwrap();
        assert!(rights.has(Color::White, Wing::KingSide));
        assert!(!rights.has(Color::White, Wing::QueenSide));
        assert!(rights.has(Color::Black, Wing::QueenSide));
        assert_eq!(rights.to_string(), "Kq");
        assert_eq!(CastlingRights::parse("-").unwrap().to_string(), "-");
        assert!(CastlingRights::parse("KX").is_err());
        assert!(CastlingRights::parse("KK").is_err());
        assert!(CastlingRights::parse("").is_err());
    }

    #[test]
    fn rook_square_revocation() {
        let mut rights = CastlingRights::ALL;
        rights.revoke_rook_square(Square::new(7, 7)); // h8
        assert_eq!(rights.to_string(), "KQq");
        rights.revoke_rook_square(Square::new(0, 0)); // a1
        assert_eq!(rights.to_string(), "Kq");
        rights.revoke_rook_square(Square::new(4, 0)); // e1: not a rook corner
        assert_eq!(rights.to_string(), "Kq");
    }
}
