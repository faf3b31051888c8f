use super::SearchOutcome;
use crate::common::{Frontier, PriorityFrontier, SearchNode, State};
use crate::heuristic::manhattan_distance;
use crate::stat::Stats;

use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// f = g + h, with g the depth of the node.
fn f_cost(node: &SearchNode) -> usize {
    node.depth() + manhattan_distance(node.state())
}

/// A* with the Manhattan heuristic. Goal test on pop; already explored states
/// are skipped. Optimal because the heuristic is consistent.
#[instrument(skip_all, name = "a_star", fields(initial = ?initial.cells()), level = "debug")]
pub fn a_star_search(initial: State, stats: &mut Stats) -> SearchOutcome {
    let root = SearchNode::root(initial);
    if initial.is_goal() {
        stats.solution_depth = Some(0);
        return SearchOutcome::Solved(root);
    }

    let mut open_list = PriorityFrontier::new(f_cost);
    let mut closed_list = HashSet::new();
    open_list.push(root);

    loop {
        stats.max_frontier = stats.max_frontier.max(open_list.len());
        let Some(current) = open_list.pop() else { break };
        stats.visited_nodes += 1;

        if !closed_list.insert(current.state().key()) {
            continue;
        }
        trace!(
            "expand node: {:?} g {} f {}",
            current.state().cells(),
            current.depth(),
            f_cost(&current)
        );

        if current.state().is_goal() {
            stats.explored_states = closed_list.len();
            stats.solution_depth = Some(current.depth());
            debug!("found goal at depth {}", current.depth());
            return SearchOutcome::Solved(current);
        }

        // Uniform cost: every successor is one move deeper.
        for (action, state) in current.state().successors() {
            if !closed_list.contains(&state.key()) {
                open_list.push(SearchNode::child(&current, action, state));
            }
        }
    }

    stats.explored_states = closed_list.len();
    debug!("cannot find solution");
    SearchOutcome::NotFound
}
