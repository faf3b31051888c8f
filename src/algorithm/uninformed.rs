use super::SearchOutcome;
use crate::common::{FifoFrontier, Frontier, LifoFrontier, SearchNode, State};
use crate::stat::Stats;

use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// FIFO expansion: the first goal popped is at minimal depth.
#[instrument(skip_all, name = "bfs", fields(initial = ?initial.cells()), level = "debug")]
pub fn breadth_first_search(initial: State, stats: &mut Stats) -> SearchOutcome {
    uninformed_search(initial, FifoFrontier::default(), stats)
}

/// LIFO expansion. Terminates on the finite state graph thanks to the explored
/// set, but the returned path is usually far from the shortest.
#[instrument(skip_all, name = "dfs", fields(initial = ?initial.cells()), level = "debug")]
pub fn depth_first_search(initial: State, stats: &mut Stats) -> SearchOutcome {
    uninformed_search(initial, LifoFrontier::default(), stats)
}

fn uninformed_search(initial: State, mut frontier: impl Frontier, stats: &mut Stats) -> SearchOutcome {
    let mut explored = HashSet::new();
    frontier.push(SearchNode::root(initial));

    loop {
        stats.max_frontier = stats.max_frontier.max(frontier.len());
        let Some(current) = frontier.pop() else { break };
        stats.visited_nodes += 1;

        if !explored.insert(current.state().key()) {
            continue;
        }
        trace!("expand node: {:?} depth {}", current.state().cells(), current.depth());

        if current.state().is_goal() {
            stats.explored_states = explored.len();
            stats.solution_depth = Some(current.depth());
            debug!("found goal at depth {}", current.depth());
            return SearchOutcome::Solved(current);
        }

        for (action, state) in current.state().successors() {
            if !explored.contains(&state.key()) {
                frontier.push(SearchNode::child(&current, action, state));
            }
        }
    }

    stats.explored_states = explored.len();
    debug!("cannot find solution");
    SearchOutcome::NotFound
}
