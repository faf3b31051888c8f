mod astar;
mod greedy;
mod uninformed;

pub use astar::a_star_search;
pub use greedy::greedy_best_first_search;
pub use uninformed::{breadth_first_search, depth_first_search};

use crate::common::{Move, SearchNode};

use std::rc::Rc;

/// How a search run ended. None of these is an error.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Solved(Rc<SearchNode>),
    /// The frontier emptied without reaching the goal.
    NotFound,
    /// Greedy popped a state it had already expanded, at this depth.
    CycleDetected { depth: usize },
}

impl SearchOutcome {
    pub fn node(&self) -> Option<&Rc<SearchNode>> {
        match self {
            SearchOutcome::Solved(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.node().is_some()
    }

    /// Solution moves in order; empty unless solved.
    pub fn moves(&self) -> Vec<Move> {
        self.node().map(|node| node.moves()).unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Solved(_) => "solved",
            SearchOutcome::NotFound => "not_found",
            SearchOutcome::CycleDetected { .. } => "cycle",
        }
    }
}
