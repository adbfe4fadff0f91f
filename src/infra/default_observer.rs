use std::io::{self, Write};

use tracing::info;

use crate::infra::{AgentId, Direction, GameObserver};
use crate::state::{MoveOutcome, WorldState};

pub struct DefaultObserver {
    show_map: bool,
}

impl DefaultObserver {
    pub fn new(show_map: bool) -> Self {
        Self { show_map }
    }
}

impl GameObserver for DefaultObserver {
    fn on_match_start(&mut self, seed: Option<u64>, world: &WorldState) {
        info!("Match started");
        if let Some(seed) = seed {
            info!("- seed: {}", seed);
        }
        info!("- map size: {}x{}", world.grid.width, world.grid.height);
        info!("- turns: {}", world.remaining_turns);
        info!("- reward on the map: {}", world.reward_left());
        if self.show_map {
            let _ = writeln!(io::stdout(), "{}", world.grid.draw_ascii());
        }
    }

    fn on_turn(&mut self, moves: [(Direction, MoveOutcome); 2], world: &WorldState) {
        let first = world.player(AgentId::First);
        let second = world.player(AgentId::Second);
        info!(
            "turn: {}, remaining: {}, p1: {} ({:?}) score {}, p2: {} ({:?}) score {}",
            world.turn,
            world.remaining_turns,
            moves[0].0.as_str_name(),
            moves[0].1,
            first.score,
            moves[1].0.as_str_name(),
            moves[1].1,
            second.score,
        );

        if self.show_map {
            let _ = writeln!(io::stdout(), "{}", world.grid.draw_ascii());
        }
    }

    fn on_match_finished(&mut self, world: &WorldState) {
        info!("Match finished after {} turns", world.turn);
        for player in &world.players {
            info!(
                "- {:?}: score {}, waits {}, blocked {}",
                player.agent, player.score, player.waits, player.blocked_moves
            );
        }
        info!("- reward left on the map: {}", world.reward_left());
    }
}
