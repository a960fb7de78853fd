//! Move history: how often a move was chosen at a given position.
//!
//! Only used to order moves; a cold table changes the work done, never the
//! value a search returns. Counts are halved between searches and the table
//! never holds more than its capacity.

use std::collections::HashMap;

use crate::board::{PieceKind, Square};
use crate::moves::Move;
use crate::piece::PieceId;

type MoveKey = (PieceId, Square, Option<PieceKind>);

fn move_key(mv: &Move) -> MoveKey {
    (mv.piece.id, mv.to, mv.promotion)
}

pub const DEFAULT_CAPACITY: usize = 1 << 16;

#[derive(Debug, Clone)]
pub struct MoveHistory {
    counts: HashMap<(u64, MoveKey), u32>,
    capacity: usize,
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bumps the count for `mv` chosen at the position with key `position`.
    /// A full table is aged first, and emptied if aging frees nothing.
    pub fn record(&mut self, position: u64, mv: &Move) {
        let key = (position, move_key(mv));
        if self.counts.len() >= self.capacity && !self.counts.contains_key(&key) {
            self.age();
            if self.counts.len() >= self.capacity {
                self.counts.clear();
            }
        }
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Halves every count and drops the entries that reach zero.
    pub fn age(&mut self) {
        self.counts.retain(|_, count| {
            *count /= 2;
            *count > 0
        });
    }

    pub fn score(&self, position: u64, mv: &Move) -> u32 {
        self.counts
            .get(&(position, move_key(mv)))
            .copied()
            .unwrap_or(0)
    }

    /// Most-chosen moves first; equal counts keep generation order.
    pub fn order(&self, position: u64, moves: &mut [Move]) {
        if self.counts.is_empty() {
            return;
        }
        moves.sort_by_key(|mv| std::cmp::Reverse(self.score(position, mv)));
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
