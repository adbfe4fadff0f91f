use rand::Rng;

use crate::state::{Grid, WALL};

const MAX_REWARD: i32 = 9;

/// Random maze: each cell is a wall with `wall_percent` odds, otherwise a
/// reward in `0..=9`. Both starting corners stay open.
pub fn generate<R: Rng>(width: i32, height: i32, wall_percent: u32, rng: &mut R) -> Grid {
    let mut grid = Grid::filled(width, height, 0);
    let wall_percent = wall_percent.min(100);

    for index in 0..grid.len() {
        let value = if rng.random_range(0..100) < wall_percent {
            WALL
        } else {
            rng.random_range(0..=MAX_REWARD)
        };
        grid.set(index, value);
    }

    if !grid.is_empty() {
        grid.set(0, 0);
        let last = grid.len() - 1;
        grid.set(last, 0);
    }
    grid
}
