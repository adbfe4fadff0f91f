pub mod config;
pub mod infra;
pub mod planners;
pub mod sim;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{BotConfig, StalePolicy};
pub use infra::{AgentId, Direction, Route, RouteSearch};
pub use planners::greedy::Bot;
pub use state::Grid;
