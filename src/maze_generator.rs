//! Maze generation

use std::collections::HashSet;

use clap::ValueEnum;
use log::{debug, info, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::config::MazeConfig;
use crate::grid::{Direction, Grid, MazeError, Point};
use crate::pattern::Pattern;

/// Carving algorithm
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// Randomized depth-first search, long winding corridors
    #[default]
    Backtracker,
    /// Randomized Prim's algorithm, short branching corridors
    Prim,
}

/// Generated maze with its openings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    /// Cells of the stamped pattern, never carved by the generators
    pub reserved: HashSet<Point>,
    pub entry: Point,
    pub exit: Point,
}

/// Frontier edge for Prim's algorithm
#[derive(Clone, Copy, Debug)]
struct Edge {
    from: Point,
    to: Point,
    dir: Direction,
}

/// Maze generator with its own random source
pub struct MazeGenerator {
    random: StdRng,
    pattern: Pattern,
}

impl MazeGenerator {
    /// Start point of both carving algorithms
    pub const START: Point = Point::new(0, 0);

    /// Create generator, seeded for reproducible mazes or from entropy
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
            pattern: Pattern::default(),
        }
    }

    /// Replace the reserved pattern stamped into every maze
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Build a complete maze
    ///
    /// The pattern is stamped first, then the configured algorithm carves the
    /// remaining cells. Imperfect mazes get extra passages, and finally the
    /// entry and exit are opened towards the outside.
    pub fn generate(&mut self, config: &MazeConfig) -> Result<Maze, MazeError> {
        let mut grid = Grid::new(config.width, config.height)?;
        let reserved = self.pattern.stamp(&mut grid);
        for (name, point) in [("Entry", config.entry), ("Exit", config.exit)] {
            if reserved.contains(&point) {
                warn!("{} {} lies inside the reserved pattern", name, point);
            }
        }

        let carved = match config.algorithm {
            Algorithm::Backtracker => backtrack(&mut grid, &reserved, &mut self.random),
            Algorithm::Prim => prim(&mut grid, &reserved, &mut self.random),
        };
        debug!(
            "{:?} carved {} of {} free cells",
            config.algorithm,
            carved.len(),
            config.width * config.height - reserved.len()
        );

        if !config.perfect {
            make_imperfect(&mut grid, &reserved, config.extra_walls(), &mut self.random);
        }

        grid.open_entrance(config.entry);
        grid.open_entrance(config.exit);
        info!(
            "Generated {}x{} maze, {} passages",
            config.width,
            config.height,
            grid.open_passages()
        );

        Ok(Maze {
            grid,
            reserved,
            entry: config.entry,
            exit: config.exit,
        })
    }
}

/// Carve a spanning tree with randomized depth-first search
///
/// Starts from (0, 0) and backtracks whenever the current cell has no
/// unvisited, unreserved neighbor left. Returns the visited cells; reserved
/// cells are never part of it.
pub fn backtrack(
    grid: &mut Grid,
    reserved: &HashSet<Point>,
    random: &mut impl Rng,
) -> HashSet<Point> {
    let mut visited = HashSet::new();
    let start = MazeGenerator::START;
    if !grid.contains(start) || reserved.contains(&start) {
        warn!("Start cell {} is reserved, nothing to carve", start);
        return visited;
    }

    let mut stack = vec![start];
    visited.insert(start);

    while let Some(&current) = stack.last() {
        let unvisited: Vec<(Point, Direction)> = grid
            .neighbors(current)
            .filter(|(n, _)| !visited.contains(n) && !reserved.contains(n))
            .collect();

        if let Some(&(next, dir)) = unvisited.choose(random) {
            grid.remove_wall(current.x, current.y, dir);
            visited.insert(next);
            stack.push(next);
        } else {
            stack.pop();
        }
    }
    visited
}

/// Carve a spanning tree with randomized Prim's algorithm
///
/// Frontier edges are drawn uniformly at random and removed by swapping with
/// the last element. Returns the cells added to the maze.
pub fn prim(grid: &mut Grid, reserved: &HashSet<Point>, random: &mut impl Rng) -> HashSet<Point> {
    let mut in_maze = HashSet::new();
    let start = MazeGenerator::START;
    if !grid.contains(start) || reserved.contains(&start) {
        warn!("Start cell {} is reserved, nothing to carve", start);
        return in_maze;
    }

    in_maze.insert(start);
    let mut frontier = frontier_edges(grid, start, &in_maze, reserved);

    while !frontier.is_empty() {
        let idx = random.gen_range(0..frontier.len());
        let edge = frontier.swap_remove(idx);
        if in_maze.contains(&edge.to) || reserved.contains(&edge.to) {
            continue;
        }

        grid.remove_wall(edge.from.x, edge.from.y, edge.dir);
        in_maze.insert(edge.to);
        frontier.extend(frontier_edges(grid, edge.to, &in_maze, reserved));
    }
    in_maze
}

/// Edges from `point` towards cells that may still join the maze
fn frontier_edges(
    grid: &Grid,
    point: Point,
    in_maze: &HashSet<Point>,
    reserved: &HashSet<Point>,
) -> Vec<Edge> {
    grid.neighbors(point)
        .filter(|(n, _)| !in_maze.contains(n) && !reserved.contains(n))
        .map(|(to, dir)| Edge {
            from: point,
            to,
            dir,
        })
        .collect()
}

/// Remove up to `extra_walls` walls to create loops
///
/// Only walls next to a dead end (a cell with three walls) are removed, and
/// reserved cells are left alone. Gives up after `extra_walls * 100` random
/// attempts. Returns the number of removed walls.
pub fn make_imperfect(
    grid: &mut Grid,
    reserved: &HashSet<Point>,
    extra_walls: usize,
    random: &mut impl Rng,
) -> usize {
    let max_attempts = extra_walls * 100;
    let mut walls_removed = 0;
    let mut attempts = 0;

    while walls_removed < extra_walls && attempts < max_attempts {
        attempts += 1;

        let point = Point::new(
            random.gen_range(0..grid.width()),
            random.gen_range(0..grid.height()),
        );
        let dir = Direction::ALL[random.gen_range(0..Direction::ALL.len())];
        let Some(next) = grid.neighbor(point, dir) else {
            continue;
        };
        if reserved.contains(&point) || reserved.contains(&next) {
            continue;
        }

        let walled = grid.has_wall(point.x, point.y, dir)
            && grid.has_wall(next.x, next.y, dir.opposite());
        let dead_end = grid.wall_count(point) == 3 || grid.wall_count(next) == 3;
        if walled && dead_end {
            grid.remove_wall(point.x, point.y, dir);
            walls_removed += 1;
        }
    }

    if walls_removed < extra_walls {
        debug!(
            "Removed only {} of {} extra walls in {} attempts",
            walls_removed, extra_walls, attempts
        );
    }
    walls_removed
}
