//! Legal move generation.
//!
//! Every candidate is tested against a hypothetical grid (mover relocated,
//! en-passant victim removed) before it is accepted, so the generator only
//! ever yields moves that leave the mover's king unattacked.

use crate::attacks::{self, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
use crate::board::{Marker, PieceKind, Square};
use crate::castling::Wing;
use crate::moves::Move;
use crate::piece::Piece;
use crate::position::Position;

/// What a piece finds on a destination square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SquareStatus {
    Open,
    Capturable(Marker),
    Blocked,
}

impl Position {
    pub(crate) fn generate_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for piece in self.friendly_pieces() {
            match piece.kind {
                PieceKind::Pawn => self.pawn_moves(piece, &mut moves),
                PieceKind::Knight => self.step_moves(piece, &KNIGHT_OFFSETS, &mut moves),
                PieceKind::Bishop => self.slider_moves(piece, &DIAGONALS, &mut moves),
                PieceKind::Rook => self.slider_moves(piece, &ORTHOGONALS, &mut moves),
                PieceKind::Queen => {
                    self.slider_moves(piece, &ORTHOGONALS, &mut moves);
                    self.slider_moves(piece, &DIAGONALS, &mut moves);
                }
                PieceKind::King => {
                    self.step_moves(piece, &KING_OFFSETS, &mut moves);
                    self.castling_moves(piece, &mut moves);
                }
            }
        }
        moves
    }

    pub(crate) fn square_status(&self, sq: Square) -> SquareStatus {
        match self.board().get(sq) {
            None => SquareStatus::Open,
            Some(marker) if marker.color != self.side_to_move() => {
                SquareStatus::Capturable(marker)
            }
            Some(_) => SquareStatus::Blocked,
        }
    }

    /// Would the mover's king be safe after `from` -> `to`?
    fn leaves_king_safe(&self, from: Square, to: Square, victim: Option<Square>) -> bool {
        let mut grid = *self.board();
        let king_moves = from == self.king_square();
        grid.relocate(from, to);
        if let Some(sq) = victim {
            grid.set(sq, None);
        }
        let king = if king_moves { to } else { self.king_square() };
        !attacks::is_square_attacked(&grid, king, self.side_to_move().opposite())
    }

    fn push_if_safe(&self, mv: Move, moves: &mut Vec<Move>) {
        if self.leaves_king_safe(mv.from(), mv.to, None) {
            moves.push(mv);
        }
    }

    /// Knights and kings: single steps along each offset.
    fn step_moves(&self, piece: &Piece, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in offsets {
            let Some(to) = piece.square.offset(df, dr) else {
                continue;
            };
            match self.square_status(to) {
                SquareStatus::Open => self.push_if_safe(Move::new(*piece, to), moves),
                SquareStatus::Capturable(m) => {
                    self.push_if_safe(Move::new(*piece, to).capturing(m), moves)
                }
                SquareStatus::Blocked => {}
            }
        }
    }

    /// Walks each ray until the edge, a capture, or a friendly blocker.
    fn slider_moves(&self, piece: &Piece, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in directions {
            let mut cur = piece.square;
            while let Some(to) = cur.offset(df, dr) {
                match self.square_status(to) {
                    SquareStatus::Open => self.push_if_safe(Move::new(*piece, to), moves),
                    SquareStatus::Capturable(m) => {
                        self.push_if_safe(Move::new(*piece, to).capturing(m), moves);
                        break;
                    }
                    SquareStatus::Blocked => break,
                }
                cur = to;
            }
        }
    }

    fn pawn_moves(&self, pawn: &Piece, moves: &mut Vec<Move>) {
        let side = self.side_to_move();
        let dir = side.forward();
        let from = pawn.square;

        if let Some(one) = from.offset(0, dir) {
            if self.board().is_empty(one) {
                if self.leaves_king_safe(from, one, None) {
                    self.push_pawn_move(Move::new(*pawn, one), moves);
                }
                if from.rank() == side.pawn_home_rank() {
                    if let Some(two) = from.offset(0, 2 * dir) {
                        if self.board().is_empty(two) && self.leaves_king_safe(from, two, None) {
                            moves.push(Move::new(*pawn, two));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(to) = from.offset(df, dir) else {
                continue;
            };
            match self.square_status(to) {
                SquareStatus::Capturable(m) => {
                    if self.leaves_king_safe(from, to, None) {
                        self.push_pawn_move(Move::new(*pawn, to).capturing(m), moves);
                    }
                }
                SquareStatus::Open if self.en_passant() == Some(to) => {
                    let victim = Square::new(to.file(), from.rank());
                    let enemy_pawn = Marker::new(side.opposite(), PieceKind::Pawn);
                    if self.board().get(victim) == Some(enemy_pawn)
                        && self.leaves_king_safe(from, to, Some(victim))
                    {
                        moves.push(Move::new(*pawn, to).capturing(enemy_pawn));
                    }
                }
                _ => {}
            }
        }
    }

    /// Fans a move onto the last rank out into one move per promotion kind.
    fn push_pawn_move(&self, mv: Move, moves: &mut Vec<Move>) {
        if mv.to.rank() == self.side_to_move().promotion_rank() {
            moves.extend(PieceKind::PROMOTIONS.iter().map(|&kind| mv.promoting(kind)));
        } else {
            moves.push(mv);
        }
    }

    fn castling_moves(&self, king: &Piece, moves: &mut Vec<Move>) {
        let side = self.side_to_move();
        let rank = side.back_rank();
        let home = Square::new(4, rank);
        if king.square != home || self.in_check() {
            return;
        }

        for wing in [Wing::KingSide, Wing::QueenSide] {
            if !self.castling().has(side, wing) {
                continue;
            }
            let rook_square = Square::new(wing.rook_file(), rank);
            if self.board().get(rook_square) != Some(Marker::new(side, PieceKind::Rook)) {
                continue;
            }
            // Squares that must be empty, and the ones the king crosses
            let (between, transit): (&[u8], &[u8]) = match wing {
                Wing::KingSide => (&[5, 6][..], &[5, 6][..]),
                Wing::QueenSide => (&[1, 2, 3][..], &[3, 2][..]),
            };
            if between
                .iter()
                .any(|&f| !self.board().is_empty(Square::new(f, rank)))
            {
                continue;
            }
            if transit
                .iter()
                .all(|&f| self.leaves_king_safe(home, Square::new(f, rank), None))
            {
                moves.push(Move::new(*king, Square::new(wing.king_target_file(), rank)));
            }
        }
    }
}
