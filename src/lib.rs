//! Generate wall-bitmask mazes, find the way through them and explore them in
//! the terminal
//!
//! A maze is a grid of cells, each carrying four wall bits. Generation first
//! stamps a reserved "42" pattern into the middle of the grid, then carves a
//! spanning tree over the remaining cells with either a depth-first
//! backtracker or Prim's algorithm. Imperfect mazes get extra loops on top.
//!
//! # Examples
//! ## Perfect maze without the pattern
//! ```
//! use a_maze_ing::{solve, Algorithm, MazeConfig, MazeGenerator, Pattern, Point};
//!
//! let config = MazeConfig {
//!     width: 9,
//!     height: 7,
//!     entry: Point::new(0, 3),
//!     exit: Point::new(8, 3),
//!     perfect: true,
//!     algorithm: Algorithm::Backtracker,
//!     seed: Some(0),
//! };
//! let maze = MazeGenerator::new(config.seed)
//!     .with_pattern(Pattern::empty())
//!     .generate(&config)
//!     .unwrap();
//! assert_eq!(maze.grid.open_passages(), 62);
//!
//! let solution = solve(&maze.grid, maze.entry, maze.exit);
//! assert_eq!(solution.path.first(), Some(&config.entry));
//! assert_eq!(solution.path.last(), Some(&config.exit));
//! ```
//!
//! ## Imperfect maze from a config file
//! ```
//! use a_maze_ing::{render, MazeConfig, MazeGenerator};
//!
//! let config = MazeConfig::parse("
//! WIDTH=20
//! HEIGHT=15
//! ENTRY=0,0
//! EXIT=19,14
//! PERFECT=False
//! ALGORITHM=prim
//! SEED=42").unwrap();
//! let maze = MazeGenerator::new(config.seed).generate(&config).unwrap();
//! assert_eq!(maze.reserved.len(), 19);
//! println!("{}", render::ascii(&maze, &[]));
//! ```

pub mod app;
pub mod config;
pub mod grid;
pub mod maze_generator;
pub mod pattern;
pub mod render;
pub mod solver;
pub mod terminal;

pub use config::MazeConfig;
pub use grid::{Direction, Grid, MazeError, Point};
pub use maze_generator::{Algorithm, Maze, MazeGenerator};
pub use pattern::Pattern;
pub use solver::{solve, Solution};
