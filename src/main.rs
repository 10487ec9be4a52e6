//! Interactive maze viewer

use std::path::PathBuf;

use a_maze_ing::app::App;
use a_maze_ing::terminal::CrosstermTerminal;
use a_maze_ing::{Algorithm, MazeConfig, MazeGenerator};
use anyhow::Context;
use clap::Parser;

/// Generate a maze and explore it in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze configuration file with `KEY=VALUE` lines
    config: PathBuf,

    /// Random seed, overrides `SEED` of the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Carving algorithm, overrides `ALGORITHM` of the config file
    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,
}

/// Read config, run the viewer until quit
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = MazeConfig::load(&args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }

    let generator = MazeGenerator::new(config.seed);
    let terminal = CrosstermTerminal::enter().context("Could not set up terminal")?;
    let mut app = App::new(terminal, config, generator)?;
    app.run()
}
