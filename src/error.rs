//! Error types for descriptor parsing and position construction.

use thiserror::Error;

use crate::board::{Color, Square};

/// Errors raised while decoding a FEN-style position descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 space-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("invalid piece character '{ch}' in placement")]
    InvalidPieceChar { ch: char },

    #[error("placement must describe 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} describes {width} files instead of 8")]
    RankWidth { rank: u8, width: usize },

    #[error("invalid side to move '{0}'")]
    InvalidSide(String),

    #[error("invalid castling rights '{0}'")]
    InvalidCastling(String),

    #[error("invalid en-passant target '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid half-move clock '{0}'")]
    InvalidHalfmove(String),

    #[error("invalid full-move number '{0}'")]
    InvalidFullmove(String),
}

/// Errors raised while building a [`Position`](crate::position::Position) or
/// resolving a move against it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{color:?} has no king on the board")]
    MissingKing { color: Color },

    #[error("{color:?} has {count} kings on the board")]
    DuplicateKing { color: Color, count: usize },

    #[error("{color:?} is in check but it is not their move")]
    OpponentInCheck { color: Color },

    #[error("roster does not match the board at {square}")]
    RosterMismatch { square: Square },

    #[error("cannot parse move '{0}'")]
    MoveSyntax(String),

    #[error("move '{0}' is not legal in this position")]
    IllegalMove(String),
}
