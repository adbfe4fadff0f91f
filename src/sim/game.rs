use std::time::Instant;

use tracing::{info, warn};

use crate::config::BotConfig;
use crate::infra::{AgentId, Direction, GameObserver, ReplayFile};
use crate::planners::greedy::Bot;
use crate::state::{Grid, GridError, MoveOutcome, WorldState};

/// Local stand-in for the game engine: feeds both bots the grid every turn
/// and applies their moves in order, agent one first.
pub struct Game {
    world: WorldState,
    bots: [Bot; 2],
    seed: Option<u64>,
    observer: Box<dyn GameObserver>,
    replay_file: Option<ReplayFile>,
}

impl Game {
    pub fn new(
        grid: Grid,
        turns: i32,
        config: BotConfig,
        observer: impl GameObserver + 'static,
    ) -> Result<Self, GridError> {
        let world = WorldState::new(grid, turns)?;
        let bots = [AgentId::First, AgentId::Second].map(|agent| Bot::with_agent(agent, config));
        Ok(Self {
            world,
            bots,
            seed: None,
            observer: Box::new(observer),
            replay_file: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_replays(mut self, replays_folder: Option<&str>) -> Self {
        self.replay_file = replays_folder.and_then(|folder| {
            ReplayFile::new(folder, self.seed, &self.world)
                .inspect_err(|e| warn!("Replay file not created in {}: {}", folder, e))
                .ok()
        });
        self
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Plays every turn and returns the final state.
    pub fn run(mut self) -> Result<WorldState, Box<dyn std::error::Error>> {
        self.observer.on_match_start(self.seed, &self.world);
        if let Some(replay_file) = &self.replay_file {
            info!("Recording replay to {}", replay_file.path().display());
        }

        while !self.world.is_finished() {
            let tick_start = Instant::now();
            let moves = self.play_turn();

            if let Some(ref mut replay_file) = self.replay_file {
                replay_file.append(&moves, &self.world)?;
            }
            self.observer.on_turn(moves, &self.world);

            let tick_duration = tick_start.elapsed();
            if tick_duration.as_millis() > 100 {
                warn!(
                    "Turn {} took {:.2}ms",
                    self.world.turn,
                    tick_duration.as_secs_f64() * 1000.0
                );
            }
        }

        self.observer.on_match_finished(&self.world);
        if let Some(replay_file) = self.replay_file.take() {
            replay_file.finish(&self.world)?;
        }
        Ok(self.world)
    }

    /// One turn: each bot sees the grid as left by the previous mover.
    pub fn play_turn(&mut self) -> [(Direction, MoveOutcome); 2] {
        let mut moves = [(Direction::None, MoveOutcome::Stayed); 2];
        for (slot, bot) in self.bots.iter_mut().enumerate() {
            let Some(agent) = bot.agent() else {
                continue;
            };
            let direction = bot.step(&self.world.grid, self.world.remaining_turns);
            let outcome = self.world.apply_move(agent, direction);
            moves[slot] = (direction, outcome);
        }
        self.world.end_turn();
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze;
    use crate::state::WALL;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct NullObserver;

    impl GameObserver for NullObserver {
        fn on_match_start(&mut self, _seed: Option<u64>, _world: &WorldState) {}
        fn on_turn(&mut self, _moves: [(Direction, MoveOutcome); 2], _world: &WorldState) {}
        fn on_match_finished(&mut self, _world: &WorldState) {}
    }

    #[test]
    fn test_single_corridor_match() {
        let grid = Grid::try_from_rows(vec![vec![0, 3, 0, 4, 0]]).unwrap();
        let game = Game::new(grid, 3, BotConfig::default(), NullObserver).unwrap();
        let world = game.run().unwrap();

        assert_eq!(world.turn, 3);
        assert_eq!(world.player(AgentId::First).score, 3);
        assert_eq!(world.player(AgentId::Second).score, 4);
        // they never share a cell
        assert_ne!(
            world.player(AgentId::First).position,
            world.player(AgentId::Second).position
        );
    }

    #[test]
    fn test_bots_never_blocked_on_random_mazes() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = maze::generate(7, 6, 25, &mut rng);
            let total = grid.total_reward();
            let game = Game::new(grid, 40, BotConfig::default(), NullObserver).unwrap();
            let world = game.run().unwrap();

            let collected: i32 = world.players.iter().map(|p| p.score).sum();
            assert_eq!(collected + world.reward_left(), total, "Seed {}", seed);
            for player in &world.players {
                assert_eq!(player.blocked_moves, 0, "Seed {}: {:?} was blocked", seed, player.agent);
                assert_eq!(world.grid.find_agent(player.agent), Some(player.position));
            }
        }
    }

    #[test]
    fn test_walled_in_agents_wait() {
        let grid = Grid::try_from_rows(vec![vec![0, WALL, 5, WALL, 0]]).unwrap();
        let game = Game::new(grid, 4, BotConfig::default(), NullObserver).unwrap();
        let world = game.run().unwrap();
        for player in &world.players {
            assert_eq!(player.score, 0);
            assert_eq!(player.waits, 4);
        }
        assert_eq!(world.reward_left(), 5);
    }

    #[test]
    fn test_play_turn_counts_down() {
        let grid = Grid::filled(3, 3, 1);
        let mut game = Game::new(grid, 2, BotConfig::default(), NullObserver).unwrap();
        let moves = game.play_turn();
        assert!(moves.iter().all(|(d, _)| *d != Direction::None));
        assert_eq!(game.world().remaining_turns, 1);
    }
}
