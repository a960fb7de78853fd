//! Search statistics
//!
//! Node and cutoff counters plus timing, owned by one [`Search`](super::Search)
//! and reset at the start of every search.

use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Positions visited, root included
    pub nodes: u64,

    /// Positions scored by static utility or terminal outcome
    pub leaves: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// Sibling enumerations abandoned at the deadline
    pub deadline_cutoffs: u64,

    /// Deepest iteration that ran to completion
    pub completed_depth: u8,

    pub start_time: Option<Instant>,
    pub search_time: Duration,
    pub nps: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Update elapsed time and nodes per second
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    pub fn inc_leaf(&mut self) {
        self.leaves += 1;
    }

    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    pub fn inc_deadline_cutoff(&mut self) {
        self.deadline_cutoffs += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn log_summary(&self) {
        log::info!(
            "search: depth {} nodes {} leaves {} cutoffs {} deadline cutoffs {} time {} ms nps {}",
            self.completed_depth,
            self.nodes,
            self.leaves,
            self.cutoffs,
            self.deadline_cutoffs,
            self.search_time.as_millis(),
            self.nps
        );
    }
}
