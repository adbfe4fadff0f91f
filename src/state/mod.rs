mod grid;
mod player_state;
mod world_state;

pub use grid::{Cell, Grid, GridError, WALL};
pub use player_state::PlayerState;
pub use world_state::{MoveOutcome, WorldState};
