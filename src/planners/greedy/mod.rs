mod executor;
mod planner;
mod planner_state;

pub use executor::MoveExecutor;
pub use planner::{Bot, ReplanReason};
pub use planner_state::Plan;
