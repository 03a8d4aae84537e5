use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use gridsnake::app::App;
use gridsnake::game::rules::{DEFAULT_GRID_SIZE, DEFAULT_MIN_SPEED, DEFAULT_SPEED};
use gridsnake::game::GameConfig;
use gridsnake::highscore::HighScoreStore;
use gridsnake::render::MAX_GRID_SIZE;

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Classic snake on a square grid")]
struct Cli {
    /// Side length of the square grid
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = clap::value_parser!(i32).range(1..=i64::from(MAX_GRID_SIZE))
    )]
    grid_size: i32,

    /// Starting tick interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: u32,

    /// Fastest tick interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_MIN_SPEED)]
    min_speed: u32,

    /// Seed for food placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where to keep the high score (default: ~/.gridsnake/highscore.json)
    #[arg(long)]
    high_score_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = GameConfig {
        initial_speed: cli.speed,
        min_speed: cli.min_speed,
        ..GameConfig::with_grid_size(cli.grid_size)
    };

    let rng = match cli.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let path = match cli.high_score_file {
        Some(path) => path,
        None => HighScoreStore::default_path().context("Could not locate high score file")?,
    };
    let high_scores = HighScoreStore::load(path);

    let mut app = App::new(config, rng, high_scores).context("Invalid game configuration")?;
    app.run()
}
