use crate::common::{neighbor, Move, State, GOAL, SIDE};

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt::{self, Display, Formatter};
use tracing::debug;

/// The live, mutable puzzle. Search never touches it; callers snapshot it
/// with `current_state` and replay solutions back onto it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    state: State,
}

impl Board {
    pub fn new() -> Self {
        Board { state: GOAL }
    }

    pub fn from_state(state: State) -> Self {
        Board { state }
    }

    pub fn current_state(&self) -> State {
        self.state
    }

    pub fn possible_moves(&self) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|&mv| neighbor(self.state.blank_index(), mv).is_some())
            .collect()
    }

    /// Move the blank; false if that would leave the grid.
    pub fn apply(&mut self, mv: Move) -> bool {
        match self.state.apply(mv) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Slide the tile at (`row`, `col`) into the blank; false unless it is adjacent.
    pub fn move_piece(&mut self, row: usize, col: usize) -> bool {
        if row >= SIDE || col >= SIDE {
            return false;
        }
        let blank = self.state.blank_index();
        let target = row * SIDE + col;
        Move::ALL
            .into_iter()
            .find(|&mv| neighbor(blank, mv) == Some(target))
            .is_some_and(|mv| self.apply(mv))
    }

    pub fn is_goal(&self) -> bool {
        self.state.is_goal()
    }

    pub fn is_solvable(&self) -> bool {
        self.state.is_solvable()
    }

    /// Random legal blank moves, so the board stays solvable.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, moves: usize, rng: &mut R) {
        for _ in 0..moves {
            if let Some(&mv) = self.possible_moves().choose(rng) {
                self.apply(mv);
            }
        }
        debug!("shuffled board: {:?}", self.state.cells());
    }

    pub fn reset(&mut self) {
        self.state = GOAL;
    }

    /// Replace the grid; false (board unchanged) unless `cells` is a permutation of 0..=8.
    pub fn set_state(&mut self, cells: &[u8]) -> bool {
        match State::try_from(cells) {
            Ok(state) => {
                self.state = state;
                true
            }
            Err(err) => {
                debug!("rejected state {cells:?}: {err}");
                false
            }
        }
    }

    /// Apply `moves` in order, stopping at the first illegal one.
    pub fn replay(&mut self, moves: &[Move]) -> bool {
        moves.iter().all(|&mv| self.apply(mv))
    }
}

impl From<State> for Board {
    fn from(state: State) -> Self {
        Board::from_state(state)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}
