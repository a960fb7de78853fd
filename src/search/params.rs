//! Search parameters
//!
//! Depth cap, per-search time limit and the move-history settings.

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Deepest iteration the depth loop will start, in plies
    pub max_depth: u8,

    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,

    /// Order moves by how often they were chosen before at the same position
    pub history_ordering: bool,

    /// Most (position, move) entries the history table keeps
    pub history_capacity: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 64,
            time_limit_ms: 5000,
            history_ordering: true,
            history_capacity: 1 << 16,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth in plies
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Set time limit in milliseconds
    pub fn time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn history_ordering(mut self, enable: bool) -> Self {
        self.history_ordering = enable;
        self
    }

    pub fn history_capacity(mut self, entries: usize) -> Self {
        self.history_capacity = entries.max(1);
        self
    }
}
