// Zobrist keys with tables built once on first use
use std::sync::OnceLock;

use crate::board::{Board, Color, Square};
use crate::castling::CastlingRights;

struct ZobristKeys {
    piece: [[u64; 64]; 12],
    side: u64,
    castling: [u64; 16],
    ep_file: [u64; 8],
}

static KEYS: OnceLock<ZobristKeys> = OnceLock::new();

fn split_mix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

fn keys() -> &'static ZobristKeys {
    KEYS.get_or_init(|| {
        let mut piece = [[0u64; 64]; 12];
        for (i, row) in piece.iter_mut().enumerate() {
            for (j, key) in row.iter_mut().enumerate() {
                *key = split_mix64((i as u64).wrapping_mul(0xad3) + (j as u64).wrapping_mul(0x47a1));
            }
        }
        let mut castling = [0u64; 16];
        for (i, key) in castling.iter_mut().enumerate() {
            *key = split_mix64((i as u64).wrapping_mul(0x1234_abcd));
        }
        let mut ep_file = [0u64; 8];
        for (i, key) in ep_file.iter_mut().enumerate() {
            *key = split_mix64((i as u64 + 1).wrapping_mul(0x3333_5555));
        }
        ZobristKeys {
            piece,
            side: split_mix64(0xdeadbeefdeadbeef),
            castling,
            ep_file,
        }
    })
}

/// Identity key of a position: placement, side to move, castling rights and
/// en-passant file. Counters are deliberately left out.
pub fn position_key(
    board: &Board,
    side: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
) -> u64 {
    let keys = keys();
    let mut h = 0u64;
    for (sq, marker) in board.occupied() {
        let index = marker.color as usize * 6 + marker.kind as usize;
        h ^= keys.piece[index][sq.index()];
    }
    if side == Color::Black {
        h ^= keys.side;
    }
    h ^= keys.castling[castling.bits() as usize];
    if let Some(ep) = en_passant {
        h ^= keys.ep_file[ep.file() as usize];
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::{FenRecord, START_FEN};

    fn key_of(fen: &str) -> u64 {
        let rec = FenRecord::parse(fen).unwrap();
        position_key(&rec.board, rec.side, rec.castling, rec.en_passant)
    }

    #[test]
    fn counters_do_not_change_the_key() {
        assert_eq!(
            key_of(START_FEN),
            key_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 12 30")
        );
    }

    #[test]
    fn side_castling_and_ep_change_the_key() {
        let base = key_of(START_FEN);
        assert_ne!(base, key_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"));
        assert_ne!(base, key_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kkq - 0 1"));
        assert_ne!(
            key_of("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"),
            key_of("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        );
    }
}
