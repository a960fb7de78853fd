//! Position codec: FEN-style descriptors to and from a grid plus side,
//! castling rights, en-passant target and move counters.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Color, Marker, Square};
use crate::castling::CastlingRights;
use crate::error::FenError;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Decoded content of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    pub board: Board,
    pub side: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl FenRecord {
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount {
                found: fields.len(),
            });
        }

        let board = parse_placement(fields[0])?;

        let side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        let castling = CastlingRights::parse(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            s => {
                let sq: Square = s
                    .parse()
                    .map_err(|_| FenError::InvalidEnPassant(s.to_string()))?;
                // The square the opponent's last double push skipped over
                let expected = match side {
                    Color::White => 5,
                    Color::Black => 2,
                };
                if sq.rank() != expected {
                    return Err(FenError::InvalidEnPassant(s.to_string()));
                }
                Some(sq)
            }
        };

        let halfmove_clock = fields[4]
            .parse()
            .map_err(|_| FenError::InvalidHalfmove(fields[4].to_string()))?;
        let fullmove_number = fields[5]
            .parse()
            .map_err(|_| FenError::InvalidFullmove(fields[5].to_string()))?;

        Ok(Self {
            board,
            side,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    pub fn to_fen(&self) -> String {
        let side = match self.side {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {} {} {}",
            placement(&self.board),
            side,
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for FenRecord {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FenRecord::parse(s)
    }
}

impl fmt::Display for FenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

/// Parses the placement field: ranks 8 down to 1, '/' separated, digits for empty runs.
pub fn parse_placement(field: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    let mut board = Board::empty();
    for (i, rank_part) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0usize;
        for ch in rank_part.chars() {
            if let Some(run) = ch.to_digit(10) {
                if run == 0 || run > 8 {
                    return Err(FenError::InvalidPieceChar { ch });
                }
                file += run as usize;
            } else {
                let marker = Marker::from_char(ch).ok_or(FenError::InvalidPieceChar { ch })?;
                if file < 8 {
                    board.set(Square::new(file as u8, rank), Some(marker));
                }
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth {
                    rank: rank + 1,
                    width: file,
                });
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth {
                rank: rank + 1,
                width: file,
            });
        }
    }
    Ok(board)
}

/// Encodes the grid as a placement field.
pub fn placement(board: &Board) -> String {
    let mut out = String::with_capacity(72);
    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            match board.get(Square::new(file, rank)) {
                Some(marker) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(marker.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_fields() {
        let rec = FenRecord::parse(START_FEN).unwrap();
        assert_eq!(rec.side, Color::White);
        assert_eq!(rec.castling, CastlingRights::ALL);
        assert_eq!(rec.en_passant, None);
        assert_eq!(rec.halfmove_clock, 0);
        assert_eq!(rec.fullmove_number, 1);
        assert_eq!(rec.board.count(), 32);
        assert_eq!(rec.board.get(Square::new(4, 0)), Marker::from_char('K'));
        assert_eq!(rec.board.get(Square::new(3, 7)), Marker::from_char('q'));
        assert_eq!(rec.to_fen(), START_FEN);
    }

    #[test]
    fn rejects_malformed_descriptors() {
        assert_eq!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w - -"),
            Err(FenError::FieldCount { found: 4 })
        );
        assert_eq!(
            FenRecord::parse("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::RankCount { found: 7 })
        );
        assert_eq!(
            FenRecord::parse("8/8/8/8/8/8/8/7 w - - 0 1"),
            Err(FenError::RankWidth { rank: 1, width: 7 })
        );
        assert_eq!(
            FenRecord::parse("8/8/8/8/8/8/8/4x3 w - - 0 1"),
            Err(FenError::InvalidPieceChar { ch: 'x' })
        );
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(FenError::InvalidSide(_))
        ));
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w - e4 0 1"),
            Err(FenError::InvalidEnPassant(_))
        ));
        assert!(matches!(
            FenRecord::parse("4k3/8/8/8/8/8/3pP3/K7 w - d3 0 1"),
            Err(FenError::InvalidEnPassant(_))
        ));
        assert!(matches!(
            FenRecord::parse("4k3/3pP3/8/8/8/8/8/K7 b - d6 0 1"),
            Err(FenError::InvalidEnPassant(_))
        ));
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(FenError::InvalidHalfmove(_))
        ));
    }

    #[test]
    fn en_passant_target_round_trips() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let rec = FenRecord::parse(fen).unwrap();
        assert_eq!(rec.en_passant, Some(Square::new(5, 5)));
        assert_eq!(rec.to_fen(), fen);
    }
}
