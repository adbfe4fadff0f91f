use crate::infra::{AgentId, Direction};
use crate::planners::greedy::planner_state::Plan;
use crate::state::Grid;

/// Emits the queued moves of a plan, one per turn
pub struct MoveExecutor;

impl MoveExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Next move of `plan`, or `Direction::None` when the plan is exhausted or
    /// the opponent stands on the destination. The cursor only advances when a
    /// move is emitted.
    pub fn execute(&self, plan: &mut Plan, grid: &Grid, opponent: AgentId) -> Direction {
        let (Some(direction), Some(destination)) = (plan.next_move(), plan.next_destination())
        else {
            return Direction::None;
        };

        if destination < grid.len() && grid.is_occupied_by(destination, opponent) {
            tracing::debug!(
                destination,
                move_index = plan.cursor(),
                "Destination occupied by {:?}, waiting",
                opponent
            );
            return Direction::None;
        }

        plan.advance();
        direction
    }
}

impl Default for MoveExecutor {
    fn default() -> Self {
        Self::new()
    }
}
