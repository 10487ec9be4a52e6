//! Reserved cell patterns stamped into the middle of a maze

use std::collections::HashSet;

use anyhow::{bail, ensure};
use log::{debug, warn};

use crate::grid::{Grid, Point};

/// Rectangular on/off mask of reserved cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    rows: Vec<Vec<bool>>,
}

impl Pattern {
    const FORTY_TWO: [&'static str; 5] = [
        "#..#.###",
        "#..#...#",
        "####..#.",
        "...#.#..",
        "...#.###",
    ];

    /// The "42" glyph, 8 cells wide and 5 tall
    pub fn forty_two() -> Self {
        Self {
            rows: Self::FORTY_TWO
                .iter()
                .map(|row| row.chars().map(|c| c == '#').collect())
                .collect(),
        }
    }

    /// Pattern without any reserved cells
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Parse pattern from text rows, `#` marks a reserved cell, `.` a free one
    ///
    /// # Examples
    /// ```
    /// use a_maze_ing::Pattern;
    ///
    /// let pattern = Pattern::parse("#.#\n.#.").unwrap();
    /// assert_eq!((pattern.width(), pattern.height()), (3, 2));
    /// ```
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut rows = Vec::new();
        for (y, line) in text.lines().map(str::trim).enumerate() {
            let mut row = Vec::new();
            for (x, c) in line.chars().enumerate() {
                match c {
                    '#' => row.push(true),
                    '.' => row.push(false),
                    val => bail!("Unexpected character `{}` at y={}, x={}", val, y, x),
                }
            }
            rows.push(row);
        }
        if let Some(first) = rows.first() {
            ensure!(
                rows.iter().all(|row| row.len() == first.len()),
                "Pattern rows must all have the same length"
            );
        }
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Stamp pattern onto the center of the grid
    ///
    /// Every marked cell is force-opened and returned as reserved. Walls of
    /// the surrounding cells are left as they are, so the stamped region is
    /// not necessarily connected to the rest of the maze. A pattern larger
    /// than the grid is skipped.
    pub fn stamp(&self, grid: &mut Grid) -> HashSet<Point> {
        let mut reserved = HashSet::new();
        if self.width() > grid.width() || self.height() > grid.height() {
            warn!(
                "Pattern of {}x{} does not fit into {}x{} maze, skipping",
                self.width(),
                self.height(),
                grid.width(),
                grid.height()
            );
            return reserved;
        }

        let start_x = (grid.width() - self.width()) / 2;
        let start_y = (grid.height() - self.height()) / 2;
        for (row, cells) in self.rows.iter().enumerate() {
            for (col, _) in cells.iter().enumerate().filter(|(_, on)| **on) {
                let point = Point::new(start_x + col, start_y + row);
                grid.force_open(point.x, point.y);
                reserved.insert(point);
            }
        }
        debug!(
            "Stamped {} reserved cells at {}",
            reserved.len(),
            Point::new(start_x, start_y)
        );
        reserved
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::forty_two()
    }
}
