use std::fs;

use dotenv::dotenv;
use gridbot::config::MatchConfig;
use gridbot::infra::DefaultObserver;
use gridbot::sim::{Game, maze};
use gridbot::state::Grid;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridbot=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let config = MatchConfig::from_env()?;
    tracing::info!("Stale policy: {:?}", config.bot.stale_policy);

    let (grid, seed) = match &config.maze_file {
        Some(path) => (Grid::parse(&fs::read_to_string(path)?)?, None),
        None => {
            let seed = config.seed.unwrap_or_else(rand::random);
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = maze::generate(config.width, config.height, config.wall_percent, &mut rng);
            (grid, Some(seed))
        }
    };

    let mut game = Game::new(grid, config.turns, config.bot, DefaultObserver::new(true))?;
    if let Some(seed) = seed {
        game = game.with_seed(seed);
    }
    let game = game.with_replays(config.replays_folder.as_deref());

    let world = game.run()?;
    for player in &world.players {
        println!("{:?}: {}", player.agent, player.score);
    }

    Ok(())
}
