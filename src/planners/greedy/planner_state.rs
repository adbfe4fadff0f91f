use crate::config::StalePolicy;
use crate::infra::{Direction, Route, route_to_moves};
use crate::state::Grid;

/// A route turned into moves, with a cursor at the next move to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    route: Route,
    moves: Vec<Direction>,
    cursor: usize,
}

impl Plan {
    pub fn new(grid: &Grid, route: Route) -> Self {
        let moves = route_to_moves(grid, &route.cells);
        Self {
            route,
            moves,
            cursor: 0,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.moves.len()
    }

    pub fn next_move(&self) -> Option<Direction> {
        self.moves.get(self.cursor).copied()
    }

    /// Cell the next move enters.
    pub fn next_destination(&self) -> Option<usize> {
        self.route.cells.get(self.cursor + 1).copied()
    }

    /// Cell the agent stands on after the executed moves.
    pub fn current_cell(&self) -> Option<usize> {
        self.route.cells.get(self.cursor).copied()
    }

    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.cursor += 1;
        }
    }

    /// Reward still on the stored route according to the current grid.
    pub fn remaining_reward(&self, grid: &Grid, policy: StalePolicy) -> i32 {
        let cells = match policy {
            StalePolicy::FullPath => &self.route.cells[..],
            StalePolicy::RemainingSuffix => self
                .route
                .cells
                .get(self.cursor + 1..)
                .unwrap_or(&[]),
        };
        // agent sentinels and walls count as 0, not their raw values
        cells
            .iter()
            .filter(|&&cell| cell < grid.len())
            .map(|&cell| grid.reward(cell))
            .sum()
    }
}
