mod default_observer;
mod game_observer;
mod graph;
mod moves;
mod pathfinding;
mod replay;
mod types;

pub use default_observer::DefaultObserver;
pub use game_observer::GameObserver;
pub use graph::{Edge, EdgeWeight, Graph};
pub use moves::{apply_moves, route_to_moves, step_direction};
pub use pathfinding::{Route, RouteSearch, SearchState};
pub use replay::ReplayFile;
pub use types::{AgentId, AgentIdError, Direction, Position};
