use crate::algorithm::{
    a_star_search, breadth_first_search, depth_first_search, greedy_best_first_search,
    SearchOutcome,
};
use crate::common::State;
use crate::stat::Stats;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Bfs,
    Dfs,
    Greedy,
    Astar,
}

impl Strategy {
    pub const ALL: [Self; 4] = [Self::Bfs, Self::Dfs, Self::Greedy, Self::Astar];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Greedy => "Greedy",
            Strategy::Astar => "A*",
        }
    }

    /// Run this strategy once. Callers must reject unsolvable states first:
    /// on those every strategy scans a whole parity class before giving up.
    pub fn search(self, initial: State, stats: &mut Stats) -> SearchOutcome {
        match self {
            Strategy::Bfs => breadth_first_search(initial, stats),
            Strategy::Dfs => depth_first_search(initial, stats),
            Strategy::Greedy => greedy_best_first_search(initial, stats),
            Strategy::Astar => a_star_search(initial, stats),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub trait Solver {
    fn solve(&mut self) -> SearchOutcome;
    fn stats(&self) -> &Stats;
}

pub struct StrategySolver {
    strategy: Strategy,
    initial: State,
    stats: Stats,
}

impl StrategySolver {
    pub fn new(strategy: Strategy, initial: State) -> Self {
        StrategySolver {
            strategy,
            initial,
            stats: Stats::default(),
        }
    }
}

impl Solver for StrategySolver {
    fn solve(&mut self) -> SearchOutcome {
        let solve_start_time = Instant::now();
        self.stats = Stats::default();

        let outcome = self.strategy.search(self.initial, &mut self.stats);

        self.stats.time_us = solve_start_time.elapsed().as_micros() as usize;
        self.stats.print(self.strategy.name());
        outcome
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::common::{Move, GOAL};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tracing_subscriber;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .try_init();
    }

    fn run(strategy: Strategy, initial: State) -> (SearchOutcome, Stats) {
        let mut solver = StrategySolver::new(strategy, initial);
        let outcome = solver.solve();
        (outcome, solver.stats().clone())
    }

    fn assert_reaches_goal(initial: State, moves: &[Move]) {
        let mut board = Board::from_state(initial);
        assert!(board.replay(moves), "illegal move in {moves:?}");
        assert!(board.is_goal());
    }

    #[test]
    fn test_already_solved() {
        init_tracing();
        for strategy in Strategy::ALL {
            let (outcome, stats) = run(strategy, GOAL);
            assert!(outcome.moves().is_empty(), "{strategy}");
            assert_eq!(stats.solution_depth, Some(0), "{strategy}");
            assert!(stats.visited_nodes <= 1, "{strategy}");
        }
    }

    #[test]
    fn test_two_moves_from_goal() {
        init_tracing();
        let initial: State = "1,2,3,4,5,6,0,7,8".parse().unwrap();
        for strategy in [Strategy::Bfs, Strategy::Astar] {
            let (outcome, stats) = run(strategy, initial);
            assert_eq!(stats.solution_depth, Some(2));
            assert_eq!(outcome.moves(), vec![Move::Right, Move::Right]);
            assert_reaches_goal(initial, &outcome.moves());
        }
    }

    #[test]
    fn test_a_star_matches_bfs_and_visits_less() {
        init_tracing();
        let initial: State = "2,5,3,1,0,6,4,7,8".parse().unwrap();
        let (bfs, bfs_stats) = run(Strategy::Bfs, initial);
        let (astar, astar_stats) = run(Strategy::Astar, initial);

        assert_eq!(bfs_stats.solution_depth, Some(6));
        assert_eq!(astar_stats.solution_depth, bfs_stats.solution_depth);
        assert!(astar_stats.visited_nodes <= bfs_stats.visited_nodes);
        assert_reaches_goal(initial, &bfs.moves());
        assert_reaches_goal(initial, &astar.moves());
    }

    #[test]
    fn test_unsolvable_is_filtered_before_search() {
        let initial: State = "1,2,3,4,5,6,8,7,0".parse().unwrap();
        assert!(!initial.is_solvable());
    }

    #[test]
    fn test_greedy_reports_cycle() {
        init_tracing();
        let initial: State = "4,2,3,5,1,6,7,8,0".parse().unwrap();
        assert!(initial.is_solvable());

        let (outcome, stats) = run(Strategy::Greedy, initial);
        assert!(matches!(outcome, SearchOutcome::CycleDetected { depth: 10 }));
        assert_eq!(outcome.label(), "cycle");
        assert_eq!(stats.solution_depth, None);

        // The other strategies still solve it.
        let (astar, _) = run(Strategy::Astar, initial);
        assert_reaches_goal(initial, &astar.moves());
    }

    #[test]
    fn test_random_states_round_trip() {
        init_tracing();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..8 {
            let mut board = Board::new();
            board.shuffle(20, &mut rng);
            let initial = board.current_state();

            let (bfs, bfs_stats) = run(Strategy::Bfs, initial);
            let (astar, astar_stats) = run(Strategy::Astar, initial);
            let (dfs, _) = run(Strategy::Dfs, initial);

            assert_eq!(astar_stats.solution_depth, bfs_stats.solution_depth);
            assert_eq!(astar.moves().len(), bfs.moves().len());
            assert_reaches_goal(initial, &bfs.moves());
            assert_reaches_goal(initial, &astar.moves());
            assert_reaches_goal(initial, &dfs.moves());

            let (greedy, _) = run(Strategy::Greedy, initial);
            if greedy.is_solved() {
                assert_reaches_goal(initial, &greedy.moves());
            }
        }
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::Astar.to_string(), "A*");
        assert_eq!(
            Strategy::from_str("greedy", true).unwrap(),
            Strategy::Greedy
        );
        assert_eq!(serde_json::to_string(&Strategy::Bfs).unwrap(), "\"bfs\"");
    }
}
