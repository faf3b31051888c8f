use crate::common::{coordinates, State, CELLS, GOAL_CELLS};

/// Goal index of every tile value.
const GOAL_POSITIONS: [usize; CELLS] = {
    let mut positions = [0; CELLS];
    let mut idx = 0;
    while idx < CELLS {
        positions[GOAL_CELLS[idx] as usize] = idx;
        idx += 1;
    }
    positions
};

/// Sum of the grid distances of every tile from its goal cell; the blank is
/// not counted. Admissible and consistent: one move shifts one tile by one cell.
pub fn manhattan_distance(state: &State) -> usize {
    state
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .map(|(idx, &value)| {
            let (row, col) = coordinates(idx);
            let (goal_row, goal_col) = coordinates(GOAL_POSITIONS[value as usize]);
            row.abs_diff(goal_row) + col.abs_diff(goal_col)
        })
        .sum()
}
