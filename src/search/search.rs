//! Main search engine
//!
//! Iterative deepening minimax with alpha-beta pruning. The searching side
//! maximizes and the opponent minimizes; every value is expressed from the
//! searching side's point of view. The only cancellation is a wall-clock
//! deadline, checked before each sibling after the first.

use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use super::history::MoveHistory;
use super::params::SearchParams;
use super::stats::SearchStats;
use crate::board::Color;
use crate::moves::Move;
use crate::position::{Outcome, Position};
use crate::time::{GameClock, TimeManager};

/// Score of delivering mate at the root; mates further away score less.
pub const MATE_SCORE: i32 = 1_000_000;
pub const INFINITY: i32 = i32::MAX / 2;

/// Anything at least this large is a forced mate.
const MATE_THRESHOLD: i32 = MATE_SCORE - u8::MAX as i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Utility of `best_move` for the side that searched
    pub score: i32,
    /// Iteration the answer came from
    pub depth: u8,
}

impl SearchResult {
    pub fn is_mate(&self) -> bool {
        self.score.abs() >= MATE_THRESHOLD
    }
}

/// Search context: parameters, counters, move history and deadline for one
/// engine instance. Nothing here is global, so independent searches never
/// interfere.
pub struct Search {
    params: SearchParams,
    stats: SearchStats,
    history: MoveHistory,
    deadline: Option<Instant>,
    timed_out: bool,
    root_side: Color,
}

impl Search {
    pub fn new(params: SearchParams) -> Self {
        Self {
            history: MoveHistory::with_capacity(params.history_capacity),
            params,
            stats: SearchStats::new(),
            deadline: None,
            timed_out: false,
            root_side: Color::White,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SearchParams::default())
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Searches `root` within `params.time_limit_ms` (0 = no deadline).
    ///
    /// Returns `None` only when the side to move has no legal move.
    pub fn search(&mut self, root: &Position) -> Option<SearchResult> {
        let budget = match self.params.time_limit_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };
        self.run(root, budget)
    }

    /// Searches `root` with an explicit wall-clock budget.
    pub fn search_for(&mut self, root: &Position, budget: Duration) -> Option<SearchResult> {
        self.run(root, Some(budget))
    }

    /// Searches `root` with a budget derived from the game clock.
    pub fn search_with_clock(
        &mut self,
        root: &Position,
        clock: &GameClock,
        time_manager: &TimeManager,
    ) -> Option<SearchResult> {
        let budget = time_manager.allocate(clock);
        debug!("clock {:?} -> budget {} ms", clock, budget.as_millis());
        self.run(root, Some(budget))
    }

    fn run(&mut self, root: &Position, budget: Option<Duration>) -> Option<SearchResult> {
        self.stats.reset();
        self.stats.start_timing();
        self.deadline = budget.map(|b| Instant::now() + b);
        self.timed_out = false;
        self.root_side = root.side_to_move();

        if root.legal_moves().is_empty() {
            warn!("no legal moves in {}", root.to_fen());
            return None;
        }

        self.history.age();

        let max_depth = self.params.max_depth.max(1);
        let mut answer: Option<SearchResult> = None;
        for depth in 1..=max_depth {
            if answer.is_some() && self.deadline_passed() {
                break;
            }

            let (best_move, score) = self.search_root(root, depth);
            if let (true, Some(prev)) = (self.timed_out, answer) {
                debug!("depth {} interrupted, keeping depth {}", depth, prev.depth);
                break;
            }

            answer = Some(SearchResult {
                best_move,
                score,
                depth,
            });
            if self.timed_out {
                debug!("depth {} cut short: {} score {}", depth, best_move, score);
                break;
            }

            self.stats.completed_depth = depth;
            self.stats.update_timing();
            debug!(
                "depth {} best {} score {} nodes {} time {} ms",
                depth,
                best_move,
                score,
                self.stats.nodes,
                self.stats.search_time.as_millis()
            );
            if score.abs() >= MATE_THRESHOLD {
                break;
            }
        }

        self.stats.update_timing();
        self.stats.log_summary();
        if let Some(result) = &answer {
            info!(
                "bestmove {} score {} depth {}",
                result.best_move, result.score, result.depth
            );
        }
        answer
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.map_or(false, |d| Instant::now() >= d)
    }

    /// Checked before every sibling but the first; flags the search as cut short.
    fn out_of_time(&mut self, ply: u8) -> bool {
        if self.deadline_passed() {
            self.timed_out = true;
            self.stats.inc_deadline_cutoff();
            trace!("deadline reached at ply {}", ply);
            true
        } else {
            false
        }
    }

    fn ordered_moves(&self, position: &Position) -> Vec<Move> {
        let mut moves = position.legal_moves().to_vec();
        if self.params.history_ordering {
            self.history.order(position.key(), &mut moves);
        }
        moves
    }

    /// Flips a value from the position's own side to the searching side.
    fn perspective(&self, position: &Position, value: i32) -> i32 {
        if position.side_to_move() == self.root_side {
            value
        } else {
            -value
        }
    }

    /// Value of a terminal position or a position at the depth limit.
    fn leaf_value(&mut self, position: &Position, depth: u8, ply: u8) -> Option<i32> {
        let value = match position.outcome() {
            Some(Outcome::Checkmate) => self.perspective(position, -(MATE_SCORE - ply as i32)),
            Some(_) => 0,
            None if depth == 0 => self.perspective(position, position.utility()),
            None => return None,
        };
        self.stats.inc_leaf();
        Some(value)
    }

    fn search_root(&mut self, root: &Position, depth: u8) -> (Move, i32) {
        self.stats.inc_node();
        let moves = self.ordered_moves(root);

        let mut alpha = -INFINITY;
        let mut best_move = moves[0];
        let mut best_value = -INFINITY;
        for (i, mv) in moves.iter().enumerate() {
            if i > 0 && self.out_of_time(0) {
                break;
            }
            let child = root.apply(mv);
            let value = self.min_value(&child, depth - 1, alpha, INFINITY, 1);
            // Ties keep the earlier move
            if value > best_value {
                best_value = value;
                best_move = *mv;
            }
            alpha = alpha.max(best_value);
        }

        self.history.record(root.key(), &best_move);
        (best_move, best_value)
    }

    fn max_value(
        &mut self,
        position: &Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: u8,
    ) -> i32 {
        self.stats.inc_node();
        if let Some(value) = self.leaf_value(position, depth, ply) {
            return value;
        }

        let moves = self.ordered_moves(position);
        debug_assert!(!moves.is_empty(), "non-terminal position without moves");
        let mut best_move = moves[0];
        let mut best = -INFINITY;
        for (i, mv) in moves.iter().enumerate() {
            if i > 0 && self.out_of_time(ply) {
                break;
            }
            let value = self.min_value(&position.apply(mv), depth - 1, alpha, beta, ply + 1);
            if value > best {
                best = value;
                best_move = *mv;
            }
            if best >= beta {
                self.stats.inc_cutoff();
                break;
            }
            alpha = alpha.max(best);
        }

        self.history.record(position.key(), &best_move);
        best
    }

    fn min_value(
        &mut self,
        position: &Position,
        depth: u8,
        alpha: i32,
        mut beta: i32,
        ply: u8,
    ) -> i32 {
        self.stats.inc_node();
        if let Some(value) = self.leaf_value(position, depth, ply) {
            return value;
        }

        let moves = self.ordered_moves(position);
        debug_assert!(!moves.is_empty(), "non-terminal position without moves");
        let mut best_move = moves[0];
        let mut best = INFINITY;
        for (i, mv) in moves.iter().enumerate() {
            if i > 0 && self.out_of_time(ply) {
                break;
            }
            let value = self.max_value(&position.apply(mv), depth - 1, alpha, beta, ply + 1);
            if value < best {
                best = value;
                best_move = *mv;
            }
            if best <= alpha {
                self.stats.inc_cutoff();
                break;
            }
            beta = beta.min(best);
        }

        self.history.record(position.key(), &best_move);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::START_FEN;

    /// Unpruned reference: same leaf scoring, same tie rule.
    fn minimax(position: &Position, depth: u8, root_side: Color, ply: u8) -> i32 {
        let own = |v: i32| if position.side_to_move() == root_side { v } else { -v };
        match position.outcome() {
            Some(Outcome::Checkmate) => return own(-(MATE_SCORE - ply as i32)),
            Some(_) => return 0,
            None if depth == 0 => return own(position.utility()),
            None => {}
        }
        let values = position
            .legal_moves()
            .iter()
            .map(|mv| minimax(&position.apply(mv), depth - 1, root_side, ply + 1));
        if position.side_to_move() == root_side {
            values.max().unwrap()
        } else {
            values.min().unwrap()
        }
    }

    fn minimax_root(root: &Position, depth: u8) -> (Move, i32) {
        let mut best: Option<(Move, i32)> = None;
        for mv in root.legal_moves() {
            let value = minimax(&root.apply(mv), depth - 1, root.side_to_move(), 1);
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((*mv, value));
            }
        }
        best.unwrap()
    }

    fn fixed_depth(depth: u8) -> Search {
        Search::new(
            SearchParams::new()
                .max_depth(depth)
                .time_limit(0)
                .history_ordering(false),
        )
    }

    #[test]
    fn alpha_beta_matches_plain_minimax() {
        let cases = [
            (START_FEN, 3),
            ("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3", 3),
            ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 2),
            ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
        ];
        for (fen, depth) in cases {
            let root = Position::from_fen(fen).unwrap();
            let result = fixed_depth(depth).search(&root).unwrap();
            let (mv, value) = minimax_root(&root, depth);
            assert_eq!(result.depth, depth, "{fen}");
            assert_eq!(result.score, value, "{fen}");
            assert_eq!(result.best_move, mv, "{fen}");
        }
    }

    #[test]
    fn pruning_saves_work() {
        let root = Position::from_fen(START_FEN).unwrap();
        let mut search = fixed_depth(3);
        search.search(&root).unwrap();
        assert!(search.stats().cutoffs > 0);
        // an unpruned depth-3 tree has 8902 leaves
        assert!(search.stats().leaves < 8902);
    }

    #[test]
    fn finds_back_rank_mate() {
        let root = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let result = fixed_depth(3).search(&root).unwrap();
        assert_eq!(result.best_move.to_uci(), "a1a8");
        assert_eq!(result.score, MATE_SCORE - 1);
        assert!(result.is_mate());
        // mate stops deepening early
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn black_to_move_scores_for_black() {
        let root = Position::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 b - - 0 1").unwrap();
        let result = fixed_depth(1).search(&root).unwrap();
        assert!(result.score > 0);
    }

    #[test]
    fn history_fills_during_search() {
        let root = Position::from_fen(START_FEN).unwrap();
        let mut search = Search::new(SearchParams::new().max_depth(2).time_limit(0));
        let result = search.search(&root).unwrap();
        assert!(!search.history().is_empty());
        assert!(search.history().score(root.key(), &result.best_move) >= 1);
    }

    #[test]
    fn history_stays_bounded_over_a_game() {
        let mut search = Search::new(
            SearchParams::new()
                .max_depth(2)
                .time_limit(0)
                .history_capacity(256),
        );
        let mut position = Position::from_fen(START_FEN).unwrap();
        for _ in 0..12 {
            let result = search.search(&position).unwrap();
            assert!(search.history().len() <= 256);
            assert!(search.history().score(position.key(), &result.best_move) >= 1);
            position = position.apply(&result.best_move);
            if position.is_terminal() {
                break;
            }
        }
    }

    #[test]
    fn zero_depth_cap_still_searches_one_ply() {
        let root = Position::from_fen(START_FEN).unwrap();
        let mut params = SearchParams::default();
        params.max_depth = 0;
        let result = Search::new(params).search(&root).unwrap();
        assert_eq!(result.depth, 1);
        assert!(root.legal_moves().contains(&result.best_move));
    }

    #[test]
    fn no_moves_no_result() {
        let mated = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").unwrap();
        assert!(mated.is_checkmate());
        assert!(fixed_depth(2).search(&mated).is_none());
    }
}
