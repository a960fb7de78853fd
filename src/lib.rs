//! arrocco: legal move generation and alpha-beta search over immutable
//! chess positions.

pub mod attacks;
pub mod board;
pub mod castling;
pub mod error;
pub mod eval;
pub mod fen;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod search;
pub mod time;
pub mod zobrist;

pub use board::{Board, Color, Marker, PieceKind, Square};
pub use castling::{CastlingRights, Wing};
pub use error::{FenError, PositionError};
pub use fen::{FenRecord, START_FEN};
pub use moves::Move;
pub use piece::{Piece, PieceId};
pub use position::{perft, Outcome, Position, DRAW_HALFMOVE_LIMIT};
pub use search::{Search, SearchParams, SearchResult, SearchStats};
pub use time::{GameClock, TimeManager};
