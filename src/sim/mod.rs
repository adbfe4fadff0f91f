mod game;
pub mod maze;

pub use game::Game;
