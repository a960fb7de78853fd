//! Turn budgeting
//!
//! Turns the remaining game time handed over by the session into a per-turn
//! wall-clock budget for the search.

use std::time::Duration;

/// Clock state for the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameClock {
    /// Time left for the rest of the game
    pub remaining: Duration,
    /// Added after each move
    pub increment: Duration,
    /// Moves left until the next time control, if the session knows it
    pub moves_to_go: Option<u32>,
}

impl GameClock {
    pub fn new(remaining: Duration) -> Self {
        Self {
            remaining,
            ..Self::default()
        }
    }

    pub fn with_increment(mut self, increment: Duration) -> Self {
        self.increment = increment;
        self
    }

    pub fn with_moves_to_go(mut self, moves: u32) -> Self {
        self.moves_to_go = Some(moves);
        self
    }
}

#[derive(Debug, Clone)]
pub struct TimeManager {
    /// Expected remaining moves when the clock does not say
    pub moves_to_go: u32,
    /// Budget used when no game time is known at all
    pub msec_per_move: u64,
    /// Floor for any non-zero allowance
    pub min_budget_ms: u64,
}

impl Default for TimeManager {
    fn default() -> Self {
        Self {
            moves_to_go: 40,
            msec_per_move: 5000,
            min_budget_ms: 10,
        }
    }
}

impl TimeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves_to_go(mut self, moves: u32) -> Self {
        self.moves_to_go = moves.max(1);
        self
    }

    pub fn msec_per_move(mut self, ms: u64) -> Self {
        self.msec_per_move = ms;
        self
    }

    /// Budget for this turn: an equal share of the remaining time plus 80% of
    /// the increment, never below the floor and never more than what is left.
    pub fn allocate(&self, clock: &GameClock) -> Duration {
        let remaining_ms = clock.remaining.as_millis() as u64;
        if remaining_ms == 0 && clock.increment.is_zero() {
            return Duration::from_millis(self.msec_per_move);
        }

        let moves_to_go = clock.moves_to_go.unwrap_or(self.moves_to_go).max(1) as u64;
        let base = remaining_ms / moves_to_go;
        let increment_bonus = (clock.increment.as_millis() as u64 * 8) / 10;
        let budget = (base + increment_bonus).max(self.min_budget_ms);

        let ceiling = if remaining_ms > 0 {
            remaining_ms
        } else {
            increment_bonus.max(self.min_budget_ms)
        };
        Duration::from_millis(budget.min(ceiling))
    }
}
