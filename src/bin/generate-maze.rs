//! CLI for printing mazes

use a_maze_ing::{render, solve, Algorithm, MazeConfig, MazeGenerator, Point};
use anyhow::ensure;
use clap::Parser;

/// Print a generated maze as plain text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = 20)]
    width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 15)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Carving algorithm
    #[arg(long, value_enum, default_value_t = Algorithm::Backtracker)]
    algorithm: Algorithm,

    /// Carve extra loops into the maze
    #[arg(long)]
    imperfect: bool,

    /// Mark the shortest path from the top-left to the bottom-right corner
    #[arg(long)]
    solve: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    ensure!(
        args.width > 0 && args.height > 0,
        "Maze dimensions must be positive"
    );

    let config = MazeConfig {
        width: args.width,
        height: args.height,
        entry: Point::new(0, 0),
        exit: Point::new(args.width - 1, args.height - 1),
        perfect: !args.imperfect,
        algorithm: args.algorithm,
        seed: args.seed,
    };
    let maze = MazeGenerator::new(config.seed).generate(&config)?;

    let path = if args.solve {
        solve(&maze.grid, maze.entry, maze.exit).path
    } else {
        Vec::new()
    };
    println!("{}", render::ascii(&maze, &path));
    Ok(())
}
