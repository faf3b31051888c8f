use super::{Move, State};

use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A state in the search tree. The parent link is shared and read-only, so
/// the nodes of one run form a tree rooted at the initial state.
#[derive(Debug)]
pub struct SearchNode {
    state: State,
    action: Option<Move>,
    parent: Option<Rc<SearchNode>>,
    depth: usize,
}

impl SearchNode {
    pub fn root(state: State) -> Rc<Self> {
        Rc::new(SearchNode {
            state,
            action: None,
            parent: None,
            depth: 0,
        })
    }

    pub fn child(parent: &Rc<Self>, action: Move, state: State) -> Rc<Self> {
        Rc::new(SearchNode {
            state,
            action: Some(action),
            parent: Some(Rc::clone(parent)),
            depth: parent.depth + 1,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn action(&self) -> Option<Move> {
        self.action
    }

    pub fn parent(&self) -> Option<&Rc<SearchNode>> {
        self.parent.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Nodes from the root to `self`, inclusive.
    pub fn path(self: &Rc<Self>) -> Vec<Rc<SearchNode>> {
        let mut path: Vec<_> =
            std::iter::successors(Some(Rc::clone(self)), |node| node.parent.clone()).collect();
        path.reverse();
        path
    }

    /// Actions of every non-root node on the path, root first.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves: Vec<_> = std::iter::successors(Some(self), |node| node.parent.as_deref())
            .filter_map(|node| node.action)
            .collect();
        moves.reverse();
        moves
    }
}

// Identity for visited-tracking is the state alone.
impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl Eq for SearchNode {}

impl Hash for SearchNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.hash(state);
    }
}

// Depth-first runs build chains tens of thousands of nodes long; unlink them
// iteratively instead of recursing through `Rc` drops.
impl Drop for SearchNode {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            parent = match Rc::try_unwrap(node) {
                Ok(mut node) => node.parent.take(),
                Err(_) => None,
            };
        }
    }
}
