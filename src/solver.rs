//! Shortest path search

use std::collections::{HashMap, VecDeque};

use crate::grid::{Direction, Grid, Point};

/// Result of a breadth-first search
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    /// Cells from entry to exit, empty if the exit cannot be reached
    pub path: Vec<Point>,
    /// Cells in the order the search expanded them
    pub visited: Vec<Point>,
}

impl Solution {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of steps on the path
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Find the shortest path from `entry` to `exit`
///
/// Runs breadth-first search over open passages. An unreachable exit is not
/// an error; the returned path is then empty.
pub fn solve(grid: &Grid, entry: Point, exit: Point) -> Solution {
    let mut solution = Solution::default();
    if !grid.contains(entry) || !grid.contains(exit) {
        return solution;
    }

    let mut parent: HashMap<Point, Option<Point>> = HashMap::from([(entry, None)]);
    let mut queue = VecDeque::from([entry]);

    while let Some(current) = queue.pop_front() {
        solution.visited.push(current);

        if current == exit {
            let mut node = Some(exit);
            while let Some(p) = node {
                solution.path.push(p);
                node = parent.get(&p).copied().flatten();
            }
            solution.path.reverse();
            return solution;
        }

        for dir in Direction::ALL {
            if !grid.is_passable(current, dir) {
                continue;
            }
            if let Some(next) = grid.neighbor(current, dir) {
                if !parent.contains_key(&next) {
                    parent.insert(next, Some(current));
                    queue.push_back(next);
                }
            }
        }
    }
    solution
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::maze_generator::backtrack;

    fn perfect_maze() -> Grid {
        let mut random = StdRng::seed_from_u64(0);
        let mut grid = Grid::new(9, 7).unwrap();
        backtrack(&mut grid, &HashSet::new(), &mut random);
        grid
    }

    fn assert_valid_path(grid: &Grid, path: &[Point], entry: Point, exit: Point) {
        assert_eq!(path.first(), Some(&entry));
        assert_eq!(path.last(), Some(&exit));
        for pair in path.windows(2) {
            assert_eq!(pair[0].distance(&pair[1]), 1);
            let dir = Direction::ALL
                .into_iter()
                .find(|d| grid.neighbor(pair[0], *d) == Some(pair[1]))
                .unwrap();
            assert!(grid.is_passable(pair[0], dir));
        }
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), path.len());
    }

    #[test]
    fn solves_perfect_maze() {
        let grid = perfect_maze();
        let entry = Point::new(0, 3);
        let exit = Point::new(8, 3);
        let solution = solve(&grid, entry, exit);

        assert!(solution.is_found());
        assert_valid_path(&grid, &solution.path, entry, exit);
        assert_eq!(solution.visited.first(), Some(&entry));
        assert_eq!(solution.visited.last(), Some(&exit));
    }

    #[test]
    fn unreachable_exit_searches_everything() {
        let maze = perfect_maze();
        // Same maze with an extra, fully walled column on the east side
        let mut grid = Grid::new(10, 7).unwrap();
        for p in maze.points() {
            for dir in [Direction::East, Direction::South] {
                if maze.is_passable(p, dir) {
                    grid.remove_wall(p.x, p.y, dir);
                }
            }
        }

        let solution = solve(&grid, Point::new(0, 0), Point::new(9, 0));
        assert!(!solution.is_found());
        assert_eq!(solution.steps(), 0);
        assert_eq!(solution.visited.len(), 63);

        let outside = solve(&grid, Point::new(0, 0), Point::new(10, 0));
        assert_eq!(outside, Solution::default());
    }

    #[test]
    fn entry_equals_exit() {
        let grid = perfect_maze();
        let p = Point::new(4, 0);
        let solution = solve(&grid, p, p);
        assert_eq!(solution.path, vec![p]);
        assert_eq!(solution.steps(), 0);
    }

    #[test]
    fn shortest_path_in_open_room() {
        let mut grid = Grid::new(5, 5).unwrap();
        for p in grid.clone().points() {
            grid.remove_wall(p.x, p.y, Direction::East);
            grid.remove_wall(p.x, p.y, Direction::South);
        }
        let entry = Point::new(0, 0);
        let exit = Point::new(4, 4);
        let solution = solve(&grid, entry, exit);
        assert_eq!(solution.steps(), 8);
        assert_valid_path(&grid, &solution.path, entry, exit);
    }

    #[test]
    fn force_opened_cells_are_not_entered() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.force_open(1, 0);
        let solution = solve(&grid, Point::new(0, 0), Point::new(2, 0));
        assert!(!solution.is_found());
        assert_eq!(solution.visited, vec![Point::new(0, 0)]);
    }
}
