//! Maze configuration files
//!
//! Configuration is a plain `KEY=VALUE` file:
//!
//! ```text
//! # Maze of 20x15 cells
//! WIDTH=20
//! HEIGHT=15
//! ENTRY=0,0
//! EXIT=19,14
//! PERFECT=False
//! ALGORITHM=prim
//! SEED=42
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, ensure, Context};
use clap::ValueEnum;
use log::warn;

use crate::grid::Point;
use crate::maze_generator::Algorithm;

/// Validated maze settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub entry: Point,
    pub exit: Point,
    /// Perfect mazes have exactly one path between any two cells
    pub perfect: bool,
    pub algorithm: Algorithm,
    /// Random seed, fresh entropy when missing
    pub seed: Option<u64>,
}

impl MazeConfig {
    pub const MIN_WIDTH: usize = 9;
    pub const MIN_HEIGHT: usize = 7;

    const MANDATORY: [&'static str; 5] = ["WIDTH", "HEIGHT", "ENTRY", "EXIT", "PERFECT"];
    const OPTIONAL: [&'static str; 2] = ["ALGORITHM", "SEED"];

    /// Read configuration from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file `{}`", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file `{}`", path.display()))
    }

    /// Parse configuration from `KEY=VALUE` text
    ///
    /// Blank lines, `#` comments and lines without `=` are skipped.
    /// Unknown keys are ignored with a warning.
    ///
    /// # Examples
    /// ```
    /// use a_maze_ing::{MazeConfig, Point};
    ///
    /// let config = MazeConfig::parse("WIDTH=9\nHEIGHT=7\nENTRY=0,3\nEXIT=8,3\nPERFECT=True").unwrap();
    /// assert_eq!(config.exit, Point::new(8, 3));
    /// assert!(config.perfect);
    /// ```
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let pairs: Vec<(&str, &str)> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), value.trim()))
            .collect();
        let get = |key: &str| pairs.iter().rev().find(|(k, _)| *k == key).map(|(_, v)| *v);

        for (key, _) in &pairs {
            if !Self::MANDATORY.contains(key) && !Self::OPTIONAL.contains(key) {
                warn!("Ignoring unsupported config key `{}`", key);
            }
        }
        for key in Self::MANDATORY {
            ensure!(get(key).is_some(), "Missing mandatory key `{}`", key);
        }

        let width = parse_dimension("WIDTH", get("WIDTH"), Self::MIN_WIDTH)?;
        let height = parse_dimension("HEIGHT", get("HEIGHT"), Self::MIN_HEIGHT)?;
        let entry = parse_coordinate("ENTRY", get("ENTRY"), width, height)?;
        let exit = parse_coordinate("EXIT", get("EXIT"), width, height)?;
        ensure!(entry != exit, "`ENTRY` and `EXIT` cannot be the same cell");

        let perfect = match get("PERFECT").map(str::to_lowercase).as_deref() {
            Some("true") => true,
            Some("false") => false,
            other => bail!("`PERFECT` must be `True` or `False`, found `{}`", other.unwrap_or("")),
        };

        let algorithm = match get("ALGORITHM") {
            Some(name) => Algorithm::from_str(name, true)
                .map_err(|_| anyhow!("Unknown `ALGORITHM` `{}`, use `backtracker` or `prim`", name))?,
            None => Algorithm::default(),
        };
        let seed = get("SEED")
            .map(|s| s.parse::<u64>())
            .transpose()
            .context("`SEED` must be a non-negative integer")?;

        Ok(Self {
            width,
            height,
            entry,
            exit,
            perfect,
            algorithm,
            seed,
        })
    }

    /// Number of extra passages carved into an imperfect maze
    pub fn extra_walls(&self) -> usize {
        self.width * self.height / 10
    }
}

fn parse_dimension(key: &str, value: Option<&str>, min: usize) -> anyhow::Result<usize> {
    let value = value.unwrap_or_default();
    let n: usize = value
        .parse()
        .with_context(|| format!("`{}` must be an integer, found `{}`", key, value))?;
    ensure!(n >= min, "`{}` must be at least {}, found {}", key, min, n);
    Ok(n)
}

fn parse_coordinate(
    key: &str,
    value: Option<&str>,
    width: usize,
    height: usize,
) -> anyhow::Result<Point> {
    let value = value.unwrap_or_default();
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| anyhow!("`{}` must be formatted as `x,y`, found `{}`", key, value))?;
    let x: usize = x
        .trim()
        .parse()
        .with_context(|| format!("Invalid x coordinate in `{}`", key))?;
    let y: usize = y
        .trim()
        .parse()
        .with_context(|| format!("Invalid y coordinate in `{}`", key))?;
    ensure!(
        x < width && y < height,
        "`{}` {},{} is outside the {}x{} maze",
        key,
        x,
        y,
        width,
        height
    );
    let point = Point::new(x, y);
    ensure!(
        point.is_on_border(width, height),
        "`{}` must be on the border of the maze",
        key
    );
    Ok(point)
}
