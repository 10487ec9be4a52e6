//! Wall-bitmask grid
//!
//! Every cell stores four wall bits, one per cardinal direction. Walls are
//! removed in pairs: clearing the east wall of a cell also clears the west
//! wall of its eastern neighbor.

use std::fmt;

use thiserror::Error;

/// Errors raised by the grid model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid wall bit {0}, use NORTH (1), EAST (2), SOUTH (4) or WEST (8)")]
    InvalidDirection(u8),
    #[error("cell ({x}, {y}) is out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// Location in the maze
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, 1 for 4-adjacent cells
    pub fn distance(&self, other: &Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Whether the point is on the outer ring of a `width`x`height` grid
    pub fn is_on_border(&self, width: usize, height: usize) -> bool {
        self.x < width
            && self.y < height
            && (self.x == 0 || self.y == 0 || self.x + 1 == width || self.y + 1 == height)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction, valued by its wall bit
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[repr(u8)]
pub enum Direction {
    North = 1,
    East = 2,
    South = 4,
    West = 8,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const fn bit(self) -> u8 {
        self as u8
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Step as (dx, dy), y grows southwards
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = MazeError;

    fn try_from(bit: u8) -> Result<Self, Self::Error> {
        match bit {
            1 => Ok(Direction::North),
            2 => Ok(Direction::East),
            4 => Ok(Direction::South),
            8 => Ok(Direction::West),
            other => Err(MazeError::InvalidDirection(other)),
        }
    }
}

/// Rectangular grid of wall masks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major wall masks, `cells[y * width + x]`
    cells: Vec<u8>,
}

impl Grid {
    /// Mask of a cell with all four walls standing
    pub const CLOSED: u8 = 0b1111;

    /// Create grid with every wall present
    ///
    /// Returns error, if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Self::CLOSED; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    /// Raw wall mask of a cell
    pub fn cell(&self, x: usize, y: usize) -> Result<u8, MazeError> {
        if !self.contains(Point::new(x, y)) {
            return Err(MazeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.cells[y * self.width + x])
    }

    /// Test for a wall. Cells outside the grid have no walls.
    pub fn has_wall(&self, x: usize, y: usize, dir: Direction) -> bool {
        self.cell(x, y)
            .map(|mask| mask & dir.bit() != 0)
            .unwrap_or(false)
    }

    /// [Self::has_wall] for a raw wall bit
    pub fn has_wall_bit(&self, x: usize, y: usize, bit: u8) -> Result<bool, MazeError> {
        Ok(self.has_wall(x, y, Direction::try_from(bit)?))
    }

    /// Remove wall from cell and the matching wall from its neighbor
    ///
    /// Does nothing for cells outside the grid.
    pub fn remove_wall(&mut self, x: usize, y: usize, dir: Direction) {
        let point = Point::new(x, y);
        if !self.contains(point) {
            return;
        }
        self.cells[y * self.width + x] &= !dir.bit();
        if let Some(n) = self.neighbor(point, dir) {
            self.cells[n.y * self.width + n.x] &= !dir.opposite().bit();
        }
    }

    /// [Self::remove_wall] for a raw wall bit
    pub fn remove_wall_bit(&mut self, x: usize, y: usize, bit: u8) -> Result<(), MazeError> {
        self.remove_wall(x, y, Direction::try_from(bit)?);
        Ok(())
    }

    /// Clear all four walls of one cell, leaving neighbors untouched
    ///
    /// This breaks wall symmetry on purpose and is only used for stamping
    /// reserved cells.
    pub fn force_open(&mut self, x: usize, y: usize) {
        if self.contains(Point::new(x, y)) {
            self.cells[y * self.width + x] = 0;
        }
    }

    /// Number of walls standing around a cell
    pub fn wall_count(&self, point: Point) -> u32 {
        self.cell(point.x, point.y)
            .map(|mask| mask.count_ones())
            .unwrap_or(0)
    }

    /// Neighbor in direction `dir`, if it is inside the grid
    pub fn neighbor(&self, point: Point, dir: Direction) -> Option<Point> {
        let (dx, dy) = dir.delta();
        let x = point.x.checked_add_signed(dx)?;
        let y = point.y.checked_add_signed(dy)?;
        let next = Point::new(x, y);
        self.contains(next).then_some(next)
    }

    /// In-grid neighbors of a cell, with the direction leading to them
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = (Point, Direction)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(point, dir).map(|n| (n, dir)))
    }

    /// Whether one can step from `point` towards `dir` without crossing a wall
    ///
    /// Both sides must be clear, so force-opened cells do not leak into
    /// walled neighbors.
    pub fn is_passable(&self, point: Point, dir: Direction) -> bool {
        match self.neighbor(point, dir) {
            Some(n) => {
                !self.has_wall(point.x, point.y, dir)
                    && !self.has_wall(n.x, n.y, dir.opposite())
            }
            None => false,
        }
    }

    /// Number of open wall pairs between cells inside the grid
    pub fn open_passages(&self) -> usize {
        self.points()
            .map(|p| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|dir| self.is_passable(p, *dir))
                    .count()
            })
            .sum()
    }

    /// All cells in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }

    pub fn is_border(&self, point: Point) -> bool {
        point.is_on_border(self.width, self.height)
    }

    /// Outward-facing side of a border cell
    pub fn outward(&self, point: Point) -> Option<Direction> {
        if !self.is_border(point) {
            None
        } else if point.y == 0 {
            Some(Direction::North)
        } else if point.y == self.height - 1 {
            Some(Direction::South)
        } else if point.x == 0 {
            Some(Direction::West)
        } else if point.x == self.width - 1 {
            Some(Direction::East)
        } else {
            None
        }
    }

    /// Open the outer wall of a border cell, making it an entrance
    ///
    /// Returns the opened side, or `None` for interior cells.
    pub fn open_entrance(&mut self, point: Point) -> Option<Direction> {
        let dir = self.outward(point)?;
        self.remove_wall(point.x, point.y, dir);
        Some(dir)
    }
}
