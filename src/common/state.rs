use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

pub const SIDE: usize = 3;
pub const CELLS: usize = SIDE * SIDE;

pub const GOAL_CELLS: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// The fixed goal configuration, blank in the bottom-right corner.
pub const GOAL: State = State {
    cells: GOAL_CELLS,
    blank: 8,
};

/// Direction the blank travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Successor generation order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    WrongCellCount(usize),
    MissingBlank,
    MultipleBlanks(usize),
    ValueOutOfRange(u8),
    DuplicateValue(u8),
    Unparsable(String),
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StateError::WrongCellCount(count) => {
                write!(f, "invalid state: expected {CELLS} cells, got {count}")
            }
            StateError::MissingBlank => write!(f, "invalid state: no blank cell (0)"),
            StateError::MultipleBlanks(count) => {
                write!(f, "invalid state: {count} blank cells, expected exactly one")
            }
            StateError::ValueOutOfRange(value) => {
                write!(f, "invalid state: value {value} is outside 0..={}", CELLS - 1)
            }
            StateError::DuplicateValue(value) => {
                write!(f, "invalid state: value {value} appears more than once")
            }
            StateError::Unparsable(token) => write!(f, "invalid state: cannot parse {token:?}"),
        }
    }
}

impl Error for StateError {}

/// Locate the single blank in a raw row-major cell sequence.
pub fn blank_index(cells: &[u8]) -> Result<usize, StateError> {
    if cells.len() != CELLS {
        return Err(StateError::WrongCellCount(cells.len()));
    }

    let mut blanks = cells
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value == 0)
        .map(|(idx, _)| idx);

    match (blanks.next(), blanks.count()) {
        (None, _) => Err(StateError::MissingBlank),
        (Some(idx), 0) => Ok(idx),
        (Some(_), rest) => Err(StateError::MultipleBlanks(rest + 1)),
    }
}

pub fn coordinates(index: usize) -> (usize, usize) {
    (index / SIDE, index % SIDE)
}

/// Index reached by displacing `index` one cell in the direction of `mv`, if it stays on the grid.
pub fn neighbor(index: usize, mv: Move) -> Option<usize> {
    let (row, col) = coordinates(index);
    let (d_row, d_col) = mv.offset();
    let row = row.checked_add_signed(d_row).filter(|&row| row < SIDE)?;
    let col = col.checked_add_signed(d_col).filter(|&col| col < SIDE)?;
    Some(row * SIDE + col)
}

/// An immutable, validated 3x3 configuration. `0` is the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct State {
    cells: [u8; CELLS],
    // Derived from `cells`, cached for O(1) successor generation.
    blank: u8,
}

impl State {
    pub fn new(cells: [u8; CELLS]) -> Result<Self, StateError> {
        let blank = blank_index(&cells)?;

        let mut seen = [false; CELLS];
        for &value in &cells {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(StateError::ValueOutOfRange(value))?;
            if *slot {
                return Err(StateError::DuplicateValue(value));
            }
            *slot = true;
        }

        Ok(State {
            cells,
            blank: blank as u8,
        })
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// Canonical key: the nine cells packed four bits each.
    pub fn key(&self) -> u64 {
        self.cells
            .iter()
            .fold(0u64, |key, &value| (key << 4) | value as u64)
    }

    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    pub fn is_goal(&self) -> bool {
        *self == GOAL
    }

    /// Number of out-of-order pairs among the non-blank tiles, read row-major.
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.cells.iter().copied().filter(|&v| v != 0).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, &value)| tiles[i + 1..].iter().filter(|&&next| next < value).count())
            .sum()
    }

    /// Odd-width grid: solvable iff the inversion count is even, like the goal's.
    pub fn is_solvable(&self) -> bool {
        self.inversions() % 2 == 0
    }

    /// The state after moving the blank, or `None` if the move leaves the grid.
    pub fn apply(&self, mv: Move) -> Option<State> {
        let target = neighbor(self.blank_index(), mv)?;
        let mut cells = self.cells;
        cells.swap(self.blank_index(), target);
        Some(State {
            cells,
            blank: target as u8,
        })
    }

    pub fn successors(&self) -> Vec<(Move, State)> {
        Move::ALL
            .into_iter()
            .filter_map(|mv| self.apply(mv).map(|state| (mv, state)))
            .collect()
    }
}

impl Default for State {
    fn default() -> Self {
        GOAL
    }
}

impl TryFrom<&[u8]> for State {
    type Error = StateError;

    fn try_from(cells: &[u8]) -> Result<Self, Self::Error> {
        let cells: [u8; CELLS] = cells
            .try_into()
            .map_err(|_| StateError::WrongCellCount(cells.len()))?;
        State::new(cells)
    }
}

impl TryFrom<Vec<u8>> for State {
    type Error = StateError;

    fn try_from(cells: Vec<u8>) -> Result<Self, Self::Error> {
        State::try_from(cells.as_slice())
    }
}

impl From<State> for Vec<u8> {
    fn from(state: State) -> Self {
        state.cells.to_vec()
    }
}

impl FromStr for State {
    type Err = StateError;

    /// Accepts cells separated by commas and/or whitespace, e.g. `"1,2,3,4,5,6,7,8,0"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| StateError::Unparsable(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        State::try_from(cells)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(SIDE).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = cells
                .iter()
                .map(|&value| match value {
                    0 => " ".to_string(),
                    value => value.to_string(),
                })
                .collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn state(cells: [u8; CELLS]) -> State {
        State::new(cells).unwrap()
    }

    #[test]
    fn test_blank_index_rejects_bad_shapes() {
        assert_eq!(blank_index(&[1, 2, 3]), Err(StateError::WrongCellCount(3)));
        assert_eq!(
            blank_index(&[1, 2, 3, 4, 5, 6, 7, 8, 9]),
            Err(StateError::MissingBlank)
        );
        assert_eq!(
            blank_index(&[0, 2, 3, 4, 0, 6, 7, 8, 0]),
            Err(StateError::MultipleBlanks(3))
        );
        assert_eq!(blank_index(&[1, 2, 3, 4, 0, 6, 7, 8, 5]), Ok(4));
    }

    #[test]
    fn test_new_rejects_non_permutations() {
        assert_eq!(
            State::new([1, 2, 3, 4, 5, 6, 7, 9, 0]),
            Err(StateError::ValueOutOfRange(9))
        );
        assert_eq!(
            State::new([1, 1, 3, 4, 5, 6, 7, 8, 0]),
            Err(StateError::DuplicateValue(1))
        );
        assert!(State::try_from(&[1u8, 2, 3, 0][..]).is_err());
    }

    #[test]
    fn test_goal() {
        assert!(GOAL.is_goal());
        assert_eq!(blank_index(&GOAL_CELLS), Ok(GOAL.blank_index()));
        assert_eq!(state(GOAL_CELLS), GOAL);
        assert!(!state([1, 2, 3, 4, 5, 6, 7, 0, 8]).is_goal());
    }

    #[test]
    fn test_parse() {
        let parsed: State = "2,5,3, 1 0 6,4,7,8".parse().unwrap();
        assert_eq!(parsed, state([2, 5, 3, 1, 0, 6, 4, 7, 8]));
        assert_eq!(
            "1,2,x".parse::<State>(),
            Err(StateError::Unparsable("x".to_string()))
        );
        assert_eq!(
            "1,2,3".parse::<State>(),
            Err(StateError::WrongCellCount(3))
        );
    }

    #[test]
    fn test_solvable() {
        assert!(GOAL.is_solvable());
        assert!(state([2, 5, 3, 1, 0, 6, 4, 7, 8]).is_solvable());

        let swapped = state([1, 2, 3, 4, 5, 6, 8, 7, 0]);
        assert_eq!(swapped.inversions(), 1);
        assert!(!swapped.is_solvable());
    }

    #[test]
    fn test_successor_counts_follow_grid_adjacency() {
        // Corner: 2, edge: 3, center: 4.
        let expected = [2, 3, 2, 3, 4, 3, 2, 3, 2];
        for (blank, &count) in expected.iter().enumerate() {
            let mut cells = [1, 2, 3, 4, 5, 6, 7, 8, 0];
            cells.swap(blank, 8);
            let current = state(cells);
            let successors = current.successors();
            assert_eq!(successors.len(), count, "blank at {blank}");

            for (mv, next) in successors {
                let (row, col) = coordinates(current.blank_index());
                let (next_row, next_col) = coordinates(next.blank_index());
                assert_eq!(row.abs_diff(next_row) + col.abs_diff(next_col), 1);
                assert_eq!(next.apply(mv.opposite()), Some(current));
                // The input is never modified.
                assert_eq!(current.cells(), &cells);
            }
        }
    }

    #[test]
    fn test_apply_labels_follow_the_blank() {
        let center = state([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(center.apply(Move::Up).unwrap().blank_index(), 1);
        assert_eq!(center.apply(Move::Down).unwrap().blank_index(), 7);
        assert_eq!(center.apply(Move::Left).unwrap().blank_index(), 3);
        assert_eq!(center.apply(Move::Right).unwrap().blank_index(), 5);
        assert_eq!(GOAL.apply(Move::Down), None);
        assert_eq!(GOAL.apply(Move::Right), None);
    }

    #[test]
    fn test_moves_preserve_parity() {
        let mut frontier = vec![GOAL, state([1, 2, 3, 4, 5, 6, 8, 7, 0])];
        let mut seen = HashSet::new();
        while let Some(current) = frontier.pop() {
            if seen.len() > 2000 || !seen.insert(current) {
                continue;
            }
            for (_, next) in current.successors() {
                assert_eq!(current.is_solvable(), next.is_solvable());
                frontier.push(next);
            }
        }
    }

    #[test]
    fn test_key_is_canonical() {
        let a = state([2, 5, 3, 1, 0, 6, 4, 7, 8]);
        let b = a;
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), GOAL.key());

        let keys: HashSet<u64> = GOAL
            .successors()
            .iter()
            .flat_map(|(_, s)| s.successors())
            .map(|(_, s)| s.key())
            .collect();
        assert!(keys.contains(&GOAL.key()));
    }

    #[test]
    fn test_display() {
        assert_eq!(GOAL.to_string(), "1 2 3\n4 5 6\n7 8  ");
        assert_eq!(Move::Left.to_string(), "LEFT");
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let json = serde_json::to_string(&GOAL).unwrap();
        assert_eq!(json, "[1,2,3,4,5,6,7,8,0]");
        assert_eq!(serde_json::from_str::<State>(&json).unwrap(), GOAL);
        assert!(serde_json::from_str::<State>("[1,1,3,4,5,6,7,8,0]").is_err());
        assert_eq!(serde_json::to_string(&Move::Up).unwrap(), "\"UP\"");
    }
}
