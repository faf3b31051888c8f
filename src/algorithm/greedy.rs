use super::SearchOutcome;
use crate::common::{Frontier, PriorityFrontier, SearchNode, State};
use crate::heuristic::manhattan_distance;
use crate::stat::Stats;

use std::collections::HashSet;
use tracing::{debug, instrument, trace};

fn heuristic_priority(node: &SearchNode) -> usize {
    manhattan_distance(node.state())
}

/// Best-first on h alone. Popping a state that was already expanded ends the
/// run with `CycleDetected` instead of skipping it.
#[instrument(skip_all, name = "greedy", fields(initial = ?initial.cells()), level = "debug")]
pub fn greedy_best_first_search(initial: State, stats: &mut Stats) -> SearchOutcome {
    let root = SearchNode::root(initial);
    if initial.is_goal() {
        stats.visited_nodes = 1;
        stats.solution_depth = Some(0);
        return SearchOutcome::Solved(root);
    }

    let mut frontier = PriorityFrontier::new(heuristic_priority);
    let mut explored = HashSet::new();
    frontier.push(root);

    loop {
        stats.max_frontier = stats.max_frontier.max(frontier.len());
        let Some(current) = frontier.pop() else { break };
        stats.visited_nodes += 1;

        if !explored.insert(current.state().key()) {
            stats.explored_states = explored.len();
            debug!("revisited {:?} at depth {}", current.state().cells(), current.depth());
            return SearchOutcome::CycleDetected {
                depth: current.depth(),
            };
        }
        trace!(
            "expand node: {:?} h {}",
            current.state().cells(),
            manhattan_distance(current.state())
        );

        if current.state().is_goal() {
            stats.explored_states = explored.len();
            stats.solution_depth = Some(current.depth());
            debug!("found goal at depth {}", current.depth());
            return SearchOutcome::Solved(current);
        }

        let successors = current.state().successors();
        if successors.is_empty() {
            stats.dead_ends.push(*current.state());
        }

        for (action, state) in successors {
            if !explored.contains(&state.key()) {
                frontier.push(SearchNode::child(&current, action, state));
            }
        }
    }

    stats.explored_states = explored.len();
    debug!("cannot find solution");
    SearchOutcome::NotFound
}
