use super::SearchNode;

use std::cmp::Ordering;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

/// Pending nodes of one search run. The pop order is what tells the
/// strategies apart.
pub trait Frontier {
    fn push(&mut self, node: Rc<SearchNode>);
    fn pop(&mut self) -> Option<Rc<SearchNode>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct FifoFrontier(VecDeque<Rc<SearchNode>>);

impl Frontier for FifoFrontier {
    fn push(&mut self, node: Rc<SearchNode>) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<Rc<SearchNode>> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Default)]
pub struct LifoFrontier(Vec<Rc<SearchNode>>);

impl Frontier for LifoFrontier {
    fn push(&mut self, node: Rc<SearchNode>) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<Rc<SearchNode>> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug)]
struct PriorityEntry {
    priority: usize,
    order: usize,
    node: Rc<SearchNode>,
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.order == other.order
    }
}

impl Eq for PriorityEntry {}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            // Earlier insertion wins among equal priorities.
            .then_with(|| self.order.cmp(&other.order))
    }
}

/// Lowest priority first, FIFO among equal priorities. The insertion counter
/// belongs to this frontier, so every run starts its tie-breaking from zero.
#[derive(Debug)]
pub struct PriorityFrontier {
    open: BTreeSet<PriorityEntry>,
    counter: usize,
    priority: fn(&SearchNode) -> usize,
}

impl PriorityFrontier {
    pub fn new(priority: fn(&SearchNode) -> usize) -> Self {
        PriorityFrontier {
            open: BTreeSet::new(),
            counter: 0,
            priority,
        }
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, node: Rc<SearchNode>) {
        let entry = PriorityEntry {
            priority: (self.priority)(&node),
            order: self.counter,
            node,
        };
        self.counter += 1;
        self.open.insert(entry);
    }

    fn pop(&mut self) -> Option<Rc<SearchNode>> {
        self.open.pop_first().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Move, GOAL};

    fn nodes() -> Vec<Rc<SearchNode>> {
        let root = SearchNode::root(GOAL);
        let mut nodes = vec![Rc::clone(&root)];
        for (mv, state) in GOAL.successors() {
            nodes.push(SearchNode::child(&root, mv, state));
        }
        nodes
    }

    fn drain(frontier: &mut impl Frontier) -> Vec<Option<Move>> {
        std::iter::from_fn(|| frontier.pop())
            .map(|node| node.action())
            .collect()
    }

    #[test]
    fn test_fifo_and_lifo() {
        let mut fifo = FifoFrontier::default();
        let mut lifo = LifoFrontier::default();
        for node in nodes() {
            fifo.push(Rc::clone(&node));
            lifo.push(node);
        }
        assert_eq!(fifo.len(), 3);
        assert_eq!(drain(&mut fifo), vec![None, Some(Move::Up), Some(Move::Left)]);
        assert_eq!(drain(&mut lifo), vec![Some(Move::Left), Some(Move::Up), None]);
        assert!(fifo.is_empty());
    }

    #[test]
    fn test_priority_ties_pop_in_insertion_order() {
        let mut frontier = PriorityFrontier::new(|node| node.depth());
        let mut nodes = nodes();
        // Children first, then the root: the root still pops first on priority,
        // the children keep insertion order.
        let root = nodes.remove(0);
        for node in nodes {
            frontier.push(node);
        }
        frontier.push(root);

        assert_eq!(
            drain(&mut frontier),
            vec![None, Some(Move::Up), Some(Move::Left)]
        );
    }

    #[test]
    fn test_priority_allows_duplicate_states() {
        let mut frontier = PriorityFrontier::new(|_| 0);
        frontier.push(SearchNode::root(GOAL));
        frontier.push(SearchNode::root(GOAL));
        assert_eq!(frontier.len(), 2);
    }
}
