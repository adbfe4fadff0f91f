use tracing::{debug, warn};

use crate::infra::{AgentId, Direction};
use crate::state::grid::{Cell, Grid, GridError};
use crate::state::player_state::PlayerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Stayed,
    Moved { reward: i32 },
    Blocked,
}

/// Everything the local engine tracks for a match.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub grid: Grid,
    pub turn: i32,
    pub remaining_turns: i32,
    pub players: [PlayerState; 2],
}

impl WorldState {
    /// Places agent one on the first cell and agent two on the last, overwriting
    /// whatever the grid held there.
    pub fn new(mut grid: Grid, turns: i32) -> Result<Self, GridError> {
        if grid.len() < 2 {
            return Err(GridError::TooSmall { cells: grid.len() });
        }

        let players = [AgentId::First, AgentId::Second].map(|agent| {
            let position = grid.starting_cell(agent);
            grid.set(position, agent.sentinel());
            PlayerState::new(agent, position)
        });

        Ok(Self {
            grid,
            turn: 0,
            remaining_turns: turns.max(0),
            players,
        })
    }

    pub fn player(&self, agent: AgentId) -> &PlayerState {
        &self.players[Self::slot(agent)]
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_turns <= 0
    }

    pub fn reward_left(&self) -> i32 {
        self.grid.total_reward()
    }

    /// Moves `agent` one step if the destination is open, collecting its reward.
    pub fn apply_move(&mut self, agent: AgentId, direction: Direction) -> MoveOutcome {
        let slot = Self::slot(agent);
        let from = self.players[slot].position;

        if direction == Direction::None {
            self.players[slot].waits += 1;
            return MoveOutcome::Stayed;
        }

        let target = match self.grid.neighbor(from, direction) {
            Some(target) => target,
            None => {
                warn!("{:?} tried to leave the grid from {}", agent, from);
                self.players[slot].blocked_moves += 1;
                return MoveOutcome::Blocked;
            }
        };

        let Cell::Open(reward) = self.grid.cell(target) else {
            debug!(from, target, "{:?} blocked by {:?}", agent, self.grid.cell(target));
            self.players[slot].blocked_moves += 1;
            return MoveOutcome::Blocked;
        };

        self.grid.set(from, 0);
        self.grid.set(target, agent.sentinel());
        let player = &mut self.players[slot];
        player.position = target;
        player.score += reward;
        MoveOutcome::Moved { reward }
    }

    pub fn end_turn(&mut self) {
        self.turn += 1;
        self.remaining_turns = (self.remaining_turns - 1).max(0);
    }

    fn slot(agent: AgentId) -> usize {
        match agent {
            AgentId::First => 0,
            AgentId::Second => 1,
        }
    }
}
