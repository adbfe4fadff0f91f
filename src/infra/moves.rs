use crate::infra::{Direction, Position};
use crate::state::Grid;

/// Direction that takes `from` to `to`, `None` when they aren't one step apart.
pub fn step_direction(from: Position, to: Position) -> Direction {
    let delta = (to.row - from.row, to.col - from.col);
    match delta {
        (0, -1) => Direction::Left,
        (0, 1) => Direction::Right,
        (-1, 0) => Direction::Up,
        (1, 0) => Direction::Down,
        _ => Direction::None,
    }
}

/// One move per consecutive pair of cells in `route`.
pub fn route_to_moves(grid: &Grid, route: &[usize]) -> Vec<Direction> {
    route
        .windows(2)
        .map(|pair| step_direction(grid.position(pair[0]), grid.position(pair[1])))
        .collect()
}

/// Cells visited by applying `moves` from `start`, start included.
pub fn apply_moves(grid: &Grid, start: usize, moves: &[Direction]) -> Vec<usize> {
    let mut cells = Vec::with_capacity(moves.len() + 1);
    let mut current = start;
    cells.push(current);
    for &direction in moves {
        if let Some(next) = grid.neighbor(current, direction) {
            current = next;
        }
        cells.push(current);
    }
    cells
}
