use crate::infra::Direction;
use crate::state::{MoveOutcome, WorldState};

/// Trait for observing match events during execution
pub trait GameObserver {
    /// Called once the agents are placed, before the first turn
    fn on_match_start(&mut self, seed: Option<u64>, world: &WorldState);

    /// Called after both agents acted and the turn was closed
    fn on_turn(&mut self, moves: [(Direction, MoveOutcome); 2], world: &WorldState);

    /// Called when the turn budget is spent
    fn on_match_finished(&mut self, world: &WorldState);
}
