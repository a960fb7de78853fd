//! Immutable game positions.
//!
//! A [`Position`] is built either from a descriptor (the root of a search) or
//! by applying a legal [`Move`] to a parent. Everything derived from the
//! position (legal moves, check, utility, outcome) is computed once in the
//! constructor and cached; nothing mutates a position afterwards.

use crate::attacks;
use crate::board::{Board, Color, Marker, PieceKind, Square};
use crate::castling::{CastlingRights, Wing};
use crate::error::PositionError;
use crate::fen::FenRecord;
use crate::moves::Move;
use crate::piece::{Piece, PieceId};
use crate::zobrist;

/// Half-moves without a capture or pawn move after which the game is drawn.
pub const DRAW_HALFMOVE_LIMIT: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Side to move is in check and has no legal move.
    Checkmate,
    /// Side to move is not in check and has no legal move.
    Stalemate,
    /// The half-move clock reached [`DRAW_HALFMOVE_LIMIT`].
    DrawCounter,
    /// Bare kings, or a lone minor piece against a bare king.
    InsufficientMaterial,
}

impl Outcome {
    pub fn is_draw(self) -> bool {
        !matches!(self, Outcome::Checkmate)
    }
}

#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    side: Color,
    friendly: Vec<Piece>,
    enemy: Vec<Piece>,
    en_passant: Option<Square>,
    castling: CastlingRights,
    halfmove_clock: u16,
    fullmove_number: u16,
    captured: Vec<Piece>,

    // Derived at construction
    key: u64,
    king_square: Square,
    in_check: bool,
    moves: Vec<Move>,
    utility: i32,
    outcome: Option<Outcome>,
}

/// Raw fields a position is assembled from.
struct Parts {
    board: Board,
    side: Color,
    friendly: Vec<Piece>,
    enemy: Vec<Piece>,
    en_passant: Option<Square>,
    castling: CastlingRights,
    halfmove_clock: u16,
    fullmove_number: u16,
    captured: Vec<Piece>,
}

impl Position {
    /// Parses a descriptor and assigns piece ids in a1..h8 scan order.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Self::from_record(FenRecord::parse(fen)?)
    }

    pub fn from_record(record: FenRecord) -> Result<Self, PositionError> {
        let pieces = record
            .board
            .occupied()
            .enumerate()
            .map(|(i, (sq, marker))| {
                Piece::new(PieceId(i as u32), marker.color, marker.kind, sq).with_moved(
                    Piece::infer_has_moved(marker.color, marker.kind, sq),
                )
            })
            .collect();
        Self::with_rosters(record, pieces)
    }

    /// Builds a position from a decoded descriptor and externally supplied
    /// pieces (ids and has-moved flags from the game session). Every piece
    /// must be live and sit on a square whose marker matches it, and every
    /// marker must be covered by exactly one piece.
    pub fn with_rosters(record: FenRecord, pieces: Vec<Piece>) -> Result<Self, PositionError> {
        let mut covered = Board::empty();
        for piece in &pieces {
            if piece.captured
                || record.board.get(piece.square) != Some(piece.marker())
                || !covered.is_empty(piece.square)
            {
                return Err(PositionError::RosterMismatch {
                    square: piece.square,
                });
            }
            covered.set(piece.square, Some(piece.marker()));
        }
        if let Some(square) = Square::all().find(|&sq| covered.get(sq) != record.board.get(sq)) {
            return Err(PositionError::RosterMismatch { square });
        }

        for color in [Color::White, Color::Black] {
            let count = pieces
                .iter()
                .filter(|p| p.color == color && p.kind == PieceKind::King)
                .count();
            match count {
                0 => return Err(PositionError::MissingKing { color }),
                1 => {}
                _ => return Err(PositionError::DuplicateKing { color, count }),
            }
        }

        let waiting = record.side.opposite();
        let waiting_king = pieces
            .iter()
            .find(|p| p.color == waiting && p.kind == PieceKind::King)
            .map(|p| p.square);
        if let Some(square) = waiting_king {
            if attacks::is_square_attacked(&record.board, square, record.side) {
                return Err(PositionError::OpponentInCheck { color: waiting });
            }
        }

        let (friendly, enemy): (Vec<Piece>, Vec<Piece>) =
            pieces.into_iter().partition(|p| p.color == record.side);

        Ok(Self::assemble(Parts {
            board: record.board,
            side: record.side,
            friendly,
            enemy,
            en_passant: record.en_passant,
            castling: record.castling,
            halfmove_clock: record.halfmove_clock,
            fullmove_number: record.fullmove_number,
            captured: Vec::new(),
        }))
    }

    fn assemble(parts: Parts) -> Self {
        let king_square = parts
            .friendly
            .iter()
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
            .expect("side to move has no king");
        let key = zobrist::position_key(&parts.board, parts.side, parts.castling, parts.en_passant);
        let in_check =
            attacks::is_square_attacked(&parts.board, king_square, parts.side.opposite());

        let mut position = Self {
            board: parts.board,
            side: parts.side,
            friendly: parts.friendly,
            enemy: parts.enemy,
            en_passant: parts.en_passant,
            castling: parts.castling,
            halfmove_clock: parts.halfmove_clock,
            fullmove_number: parts.fullmove_number,
            captured: parts.captured,
            key,
            king_square,
            in_check,
            moves: Vec::new(),
            utility: 0,
            outcome: None,
        };
        position.moves = position.generate_legal_moves();
        position.utility = position.compute_utility();
        position.outcome = position.classify();
        position
    }

    // ----------------- ACCESSORS -----------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side
    }

    /// Pieces of the side to move.
    pub fn friendly_pieces(&self) -> &[Piece] {
        &self.friendly
    }

    /// Pieces of the side not to move.
    pub fn enemy_pieces(&self) -> &[Piece] {
        &self.enemy
    }

    /// Pieces removed by captures on the way to this position.
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.friendly
            .iter()
            .chain(self.enemy.iter())
            .find(|p| p.id == id)
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Identity key used by the search's move history.
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn king_square(&self) -> Square {
        self.king_square
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Static utility from the side to move's point of view.
    pub fn utility(&self) -> i32 {
        self.utility
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_checkmate(&self) -> bool {
        self.outcome == Some(Outcome::Checkmate)
    }

    pub fn is_stalemate(&self) -> bool {
        self.outcome == Some(Outcome::Stalemate)
    }

    pub fn is_draw(&self) -> bool {
        self.outcome.map_or(false, Outcome::is_draw)
    }

    pub fn to_record(&self) -> FenRecord {
        FenRecord {
            board: self.board,
            side: self.side,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    pub fn to_fen(&self) -> String {
        self.to_record().to_fen()
    }

    // ----------------- TRANSITIONS -----------------

    /// Square of the pawn taken if `mv` is an en-passant capture.
    pub(crate) fn en_passant_victim(&self, mv: &Move) -> Option<Square> {
        let from = mv.from();
        if mv.piece.kind == PieceKind::Pawn
            && from.file() != mv.to.file()
            && self.board.is_empty(mv.to)
        {
            Some(Square::new(mv.to.file(), from.rank()))
        } else {
            None
        }
    }

    /// Derives the child position reached by `mv`. The parent is untouched.
    ///
    /// `mv` must be one of [`legal_moves`](Self::legal_moves); use
    /// [`try_apply`](Self::try_apply) for moves from outside.
    pub fn apply(&self, mv: &Move) -> Position {
        debug_assert!(self.moves.contains(mv), "applying illegal move {}", mv);

        let mover = mv.piece;
        let from = mv.from();
        let victim = self.en_passant_victim(mv);
        let castle_rook = if mv.is_castle() {
            let wing = if mv.to.file() > from.file() {
                Wing::KingSide
            } else {
                Wing::QueenSide
            };
            let rank = from.rank();
            Some((
                Square::new(wing.rook_file(), rank),
                Square::new(wing.rook_target_file(), rank),
            ))
        } else {
            None
        };

        let mut board = self.board;
        board.relocate(from, mv.to);
        if let Some(sq) = victim {
            board.set(sq, None);
        }
        if let Some(kind) = mv.promotion {
            board.set(mv.to, Some(Marker::new(mover.color, kind)));
        }
        if let Some((rook_from, rook_to)) = castle_rook {
            board.relocate(rook_from, rook_to);
        }

        // The mover's side becomes the enemy of the child
        let enemy: Vec<Piece> = self
            .friendly
            .iter()
            .map(|p| {
                let mut piece = *p;
                if piece.id == mover.id {
                    piece.square = mv.to;
                    piece.has_moved = true;
                    if let Some(kind) = mv.promotion {
                        piece.kind = kind;
                    }
                } else if let Some((rook_from, rook_to)) = castle_rook {
                    if piece.square == rook_from {
                        piece.square = rook_to;
                        piece.has_moved = true;
                    }
                }
                piece
            })
            .collect();

        let capture_square = victim.unwrap_or(mv.to);
        let mut captured = self.captured.clone();
        let mut friendly = Vec::with_capacity(self.enemy.len());
        for p in &self.enemy {
            if p.square == capture_square {
                let mut taken = *p;
                taken.captured = true;
                captured.push(taken);
            } else {
                friendly.push(*p);
            }
        }
        let took_piece = captured.len() > self.captured.len();

        let mut castling = self.castling;
        if mover.kind == PieceKind::King {
            castling.revoke_color(mover.color);
        }
        // A rook leaving its corner, or anything landing on a corner, ends that right
        castling.revoke_rook_square(from);
        castling.revoke_rook_square(mv.to);

        let en_passant = if mover.kind == PieceKind::Pawn && from.rank().abs_diff(mv.to.rank()) == 2
        {
            Some(Square::new(from.file(), (from.rank() + mv.to.rank()) / 2))
        } else {
            None
        };

        let halfmove_clock = if mover.kind == PieceKind::Pawn || took_piece {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        let fullmove_number = match self.side {
            Color::White => self.fullmove_number,
            Color::Black => self.fullmove_number.saturating_add(1),
        };

        Self::assemble(Parts {
            board,
            side: self.side.opposite(),
            friendly,
            enemy,
            en_passant,
            castling,
            halfmove_clock,
            fullmove_number,
            captured,
        })
    }

    /// Like [`apply`](Self::apply), but rejects moves that are not legal here.
    /// The position's own copy of the move is the one applied.
    pub fn try_apply(&self, mv: &Move) -> Result<Position, PositionError> {
        self.moves
            .iter()
            .find(|&legal| legal == mv)
            .map(|legal| self.apply(legal))
            .ok_or_else(|| PositionError::IllegalMove(mv.to_uci()))
    }

    /// Resolves long algebraic text (`e2e4`, `e7e8q`) against the legal moves.
    pub fn parse_uci_move(&self, text: &str) -> Result<Move, PositionError> {
        let syntax = || PositionError::MoveSyntax(text.to_string());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(syntax());
        }
        let from: Square = text[0..2].parse().map_err(|_| syntax())?;
        let to: Square = text[2..4].parse().map_err(|_| syntax())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(ch) => match PieceKind::from_letter(ch) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(syntax()),
            },
        };

        self.moves
            .iter()
            .find(|m| m.from() == from && m.to == to && m.promotion == promotion)
            .copied()
            .ok_or_else(|| PositionError::IllegalMove(text.to_string()))
    }

    // ----------------- EVALUATION -----------------

    fn compute_utility(&self) -> i32 {
        let own: i32 = self.friendly.iter().map(Piece::value).sum();
        let theirs: i32 = self.enemy.iter().map(Piece::value).sum();
        own - theirs
    }

    fn classify(&self) -> Option<Outcome> {
        if self.moves.is_empty() {
            return Some(if self.in_check {
                Outcome::Checkmate
            } else {
                Outcome::Stalemate
            });
        }
        if self.halfmove_clock >= DRAW_HALFMOVE_LIMIT {
            return Some(Outcome::DrawCounter);
        }
        if self.insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        None
    }

    /// K v K, or K + single minor v K. Other dead positions are not detected.
    fn insufficient_material(&self) -> bool {
        let lone_minor = |pieces: &[Piece]| {
            pieces.len() == 2
                && pieces
                    .iter()
                    .any(|p| matches!(p.kind, PieceKind::Knight | PieceKind::Bishop))
        };
        match (self.friendly.len(), self.enemy.len()) {
            (1, 1) => true,
            (1, 2) => lone_minor(&self.enemy),
            (2, 1) => lone_minor(&self.friendly),
            _ => false,
        }
    }
}

/// Counts leaf nodes of the legal move tree to `depth` plies.
pub fn perft(position: &Position, depth: u8) -> u64 {
    match depth {
        0 => 1,
        1 => position.legal_moves().len() as u64,
        _ => position
            .legal_moves()
            .iter()
            .map(|mv| perft(&position.apply(mv), depth - 1))
            .sum(),
    }
}

/// Per-root-move perft counts, in generation order.
pub fn divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    position
        .legal_moves()
        .iter()
        .map(|mv| (*mv, perft(&position.apply(mv), depth.saturating_sub(1))))
        .collect()
}
