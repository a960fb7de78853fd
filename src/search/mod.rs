//! Search engine for arrocco
//!
//! Iterative deepening alpha-beta over immutable [`Position`](crate::Position)s,
//! with a move-history table for ordering and a wall-clock deadline.

pub mod history;
pub mod params;
pub mod search;
pub mod stats;

pub use self::history::MoveHistory;
pub use self::params::SearchParams;
pub use self::search::{Search, SearchResult, INFINITY, MATE_SCORE};
pub use self::stats::SearchStats;
pub use crate::moves::Move;
