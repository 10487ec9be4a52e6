//! Interactive maze viewer
//!
//! The viewer is a small state machine driven by single key presses. The
//! solve state and the color scheme change independently of each other.

use std::time::Duration;

use anyhow::Context;
use crossterm::event::KeyCode;
use log::{debug, info};

use crate::config::MazeConfig;
use crate::grid::Point;
use crate::maze_generator::{Maze, MazeGenerator};
use crate::render::{self, Scene, PALETTES};
use crate::solver;
use crate::terminal::Terminal;

/// Pause after each cell explored by the animated search
const VISIT_DELAY: Duration = Duration::from_millis(30);
/// Pause after each revealed cell of the animated path
const PATH_DELAY: Duration = Duration::from_millis(60);

/// What is shown on top of the maze
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveState {
    /// Plain maze
    Idle,
    /// Instant solution with the explored cells
    Solved,
    /// Search replayed step by step, complete once [App::handle] returns
    Animating,
}

/// User command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Regenerate,
    ToggleSolve,
    Animate,
    Reset,
    RotateColor,
    Quit,
}

impl Command {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'g' => Some(Command::Regenerate),
                's' => Some(Command::ToggleSolve),
                'a' => Some(Command::Animate),
                'r' => Some(Command::Reset),
                'c' => Some(Command::RotateColor),
                'q' => Some(Command::Quit),
                _ => None,
            },
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Viewer state
pub struct App<T: Terminal> {
    terminal: T,
    generator: MazeGenerator,
    config: MazeConfig,
    maze: Maze,
    state: SolveState,
    /// Path cells currently shown
    path: Vec<Point>,
    /// Explored cells currently shown
    visited: Vec<Point>,
    color_scheme: usize,
    message: String,
    should_quit: bool,
}

impl<T: Terminal> App<T> {
    /// Generate the first maze and set up the viewer
    pub fn new(
        terminal: T,
        config: MazeConfig,
        mut generator: MazeGenerator,
    ) -> anyhow::Result<Self> {
        let maze = generator
            .generate(&config)
            .context("Could not generate maze")?;
        Ok(Self {
            terminal,
            generator,
            config,
            maze,
            state: SolveState::Idle,
            path: Vec::new(),
            visited: Vec::new(),
            color_scheme: 0,
            message: "Maze ready. Use the keys below.".to_string(),
            should_quit: false,
        })
    }

    /// Run the key loop until quit
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.draw()?;
        while !self.should_quit {
            let key = self.terminal.read_key().context("Could not read key")?;
            match Command::from_key(key) {
                Some(command) => self.handle(command)?,
                None => debug!("Ignoring key {:?}", key),
            }
        }
        Ok(())
    }

    /// Apply one command and redraw
    pub fn handle(&mut self, command: Command) -> anyhow::Result<()> {
        debug!("{:?} in state {:?}", command, self.state);
        match command {
            Command::Regenerate => {
                self.maze = self
                    .generator
                    .generate(&self.config)
                    .context("Could not generate maze")?;
                self.clear_solution();
                self.message = "New maze generated.".to_string();
                info!("Regenerated maze");
            }
            Command::ToggleSolve => {
                let solution = solver::solve(&self.maze.grid, self.maze.entry, self.maze.exit);
                self.message = if solution.is_found() {
                    format!("Solved! Path length: {} steps.", solution.steps())
                } else {
                    "No solution found.".to_string()
                };
                self.path = solution.path;
                self.visited = solution.visited;
                self.state = SolveState::Solved;
            }
            Command::Animate => {
                self.animate()?;
                return Ok(());
            }
            Command::Reset => {
                self.clear_solution();
                self.message = "Reset. Maze ready.".to_string();
            }
            Command::RotateColor => {
                self.color_scheme = (self.color_scheme + 1) % PALETTES.len();
                self.message = format!("Colors: {}.", PALETTES[self.color_scheme].name);
            }
            Command::Quit => {
                self.should_quit = true;
                return Ok(());
            }
        }
        self.draw()
    }

    /// Replay the search cell by cell, then reveal the path
    ///
    /// A key press during the animation skips to the final frame. Quit keys
    /// also end the viewer afterwards.
    fn animate(&mut self) -> anyhow::Result<()> {
        self.clear_solution();
        self.state = SolveState::Animating;
        let solution = solver::solve(&self.maze.grid, self.maze.entry, self.maze.exit);
        let mut skipping = false;

        for cell in &solution.visited {
            self.visited.push(*cell);
            if !skipping {
                self.message = format!("Searching... cells visited: {}", self.visited.len());
                self.draw()?;
                skipping = self.pause(VISIT_DELAY)?;
            }
        }
        for cell in &solution.path {
            self.path.push(*cell);
            if !skipping {
                self.draw()?;
                skipping = self.pause(PATH_DELAY)?;
            }
        }

        self.message = if solution.is_found() {
            format!("Done! Path length: {} steps.", solution.steps())
        } else {
            "No solution found.".to_string()
        };
        self.draw()
    }

    /// Wait between animation frames, returns true if a key interrupted
    fn pause(&mut self, delay: Duration) -> anyhow::Result<bool> {
        let key = self.terminal.poll_key(delay).context("Could not poll keys")?;
        if let Some(key) = key {
            if Command::from_key(key) == Some(Command::Quit) {
                self.should_quit = true;
            }
            debug!("Animation interrupted by {:?}", key);
        }
        Ok(key.is_some())
    }

    fn clear_solution(&mut self) {
        self.path.clear();
        self.visited.clear();
        self.state = SolveState::Idle;
    }

    fn draw(&mut self) -> anyhow::Result<()> {
        let scene = Scene {
            maze: &self.maze,
            path: &self.path,
            visited: &self.visited,
            palette: &PALETTES[self.color_scheme],
            message: &self.message,
        };
        render::draw(&mut self.terminal, &scene).context("Could not draw maze")
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    pub fn color_scheme(&self) -> usize {
        self.color_scheme
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn visited(&self) -> &[Point] {
        &self.visited
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze_generator::Algorithm;
    use crate::pattern::Pattern;
    use crate::terminal::testing::ScriptedTerminal;

    fn config() -> MazeConfig {
        MazeConfig {
            width: 9,
            height: 7,
            entry: Point::new(0, 3),
            exit: Point::new(8, 3),
            perfect: true,
            algorithm: Algorithm::Backtracker,
            seed: Some(4),
        }
    }

    fn app(keys: &[char]) -> App<ScriptedTerminal> {
        let generator = MazeGenerator::new(Some(4)).with_pattern(Pattern::empty());
        App::new(ScriptedTerminal::new(keys), config(), generator).unwrap()
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(Command::from_key(KeyCode::Char('S')), Some(Command::ToggleSolve));
        assert_eq!(Command::from_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(Command::from_key(KeyCode::Char('x')), None);
        assert_eq!(Command::from_key(KeyCode::Enter), None);
    }

    #[test]
    fn solve_then_reset() {
        let mut app = app(&['s']);
        assert_eq!(app.state(), SolveState::Idle);

        app.handle(Command::ToggleSolve).unwrap();
        assert_eq!(app.state(), SolveState::Solved);
        assert_eq!(app.path().first(), Some(&Point::new(0, 3)));
        assert_eq!(app.path().last(), Some(&Point::new(8, 3)));
        assert!(app.visited().len() >= app.path().len());
        assert!(app.message().starts_with("Solved!"));

        app.handle(Command::Reset).unwrap();
        assert_eq!(app.state(), SolveState::Idle);
        assert!(app.path().is_empty());
        assert!(app.visited().is_empty());
    }

    #[test]
    fn scripted_session() {
        let mut app = app(&['x', 'c', 'a', 'c', 'q', 's']);
        app.run().unwrap();

        assert!(app.should_quit());
        assert_eq!(app.state(), SolveState::Animating);
        assert_eq!(app.color_scheme(), 2);
        // `s` after quit is never read
        let solution = solver::solve(&app.maze().grid, app.maze().entry, app.maze().exit);
        assert_eq!(app.path(), solution.path.as_slice());
        assert_eq!(app.visited(), solution.visited.as_slice());
    }

    #[test]
    fn animation_replays_every_step() {
        let mut app = app(&[]);
        app.handle(Command::Animate).unwrap();

        let solution = solver::solve(&app.maze().grid, app.maze().entry, app.maze().exit);
        let frames = solution.visited.len() + solution.path.len();
        let terminal = app.terminal();
        assert_eq!(terminal.polls, frames);
        assert_eq!(
            terminal.waited,
            VISIT_DELAY * solution.visited.len() as u32 + PATH_DELAY * solution.path.len() as u32
        );
        // Initial frame is not drawn by `handle`, final frame is
        assert_eq!(terminal.refreshes, frames + 1);
        assert_eq!(app.state(), SolveState::Animating);
        assert!(app.message().starts_with("Done!"));
    }

    #[test]
    fn key_press_skips_animation() {
        let generator = MazeGenerator::new(Some(4)).with_pattern(Pattern::empty());
        let terminal = ScriptedTerminal::new(&[]).interrupt_at(3, 'q');
        let mut app = App::new(terminal, config(), generator).unwrap();
        app.handle(Command::Animate).unwrap();

        assert_eq!(app.terminal().polls, 3);
        assert_eq!(app.terminal().refreshes, 4);
        assert!(app.should_quit());
        // The full result is still shown
        let solution = solver::solve(&app.maze().grid, app.maze().entry, app.maze().exit);
        assert_eq!(app.path(), solution.path.as_slice());
    }

    #[test]
    fn entry_inside_pattern_has_no_solution() {
        // (0, 3) is the left end of the bar of the "4"
        let generator = MazeGenerator::new(Some(4));
        let mut app = App::new(ScriptedTerminal::new(&[]), config(), generator).unwrap();
        assert!(app.maze().reserved.contains(&Point::new(0, 3)));

        app.handle(Command::ToggleSolve).unwrap();
        assert_eq!(app.state(), SolveState::Solved);
        assert_eq!(app.message(), "No solution found.");
        assert!(app.path().is_empty());
        // The search stays inside the "4" glyph
        assert_eq!(app.visited().len(), 10);
        assert!(app.visited().iter().all(|p| app.maze().reserved.contains(p)));

        app.handle(Command::Animate).unwrap();
        assert_eq!(app.message(), "No solution found.");
        assert!(app.path().is_empty());
    }

    #[test]
    fn regenerate_returns_to_idle() {
        let mut app = app(&[]);
        let first = app.maze().clone();
        app.handle(Command::ToggleSolve).unwrap();
        app.handle(Command::RotateColor).unwrap();
        app.handle(Command::Regenerate).unwrap();

        assert_eq!(app.state(), SolveState::Idle);
        assert!(app.path().is_empty());
        assert_eq!(app.color_scheme(), 1);
        assert_ne!(app.maze().grid, first.grid);
        assert_eq!(app.maze().grid.open_passages(), 62);
    }

    #[test]
    fn regenerate_is_reproducible() {
        let mut a = app(&[]);
        let mut b = app(&[]);
        a.handle(Command::Regenerate).unwrap();
        b.handle(Command::Regenerate).unwrap();
        assert_eq!(a.maze(), b.maze());
    }

    #[test]
    fn colors_wrap_around() {
        let mut app = app(&[]);
        for _ in 0..PALETTES.len() {
            app.handle(Command::RotateColor).unwrap();
        }
        assert_eq!(app.color_scheme(), 0);
        assert_eq!(app.state(), SolveState::Idle);
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let mut app = app(&['s']);
        assert!(app.run().is_err());
        assert_eq!(app.state(), SolveState::Solved);
    }
}
