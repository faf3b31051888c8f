mod frontier;
mod node;
mod state;

pub use frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
pub use node::SearchNode;
pub use state::{
    blank_index, coordinates, neighbor, Move, State, StateError, CELLS, GOAL, GOAL_CELLS, SIDE,
};
