//! Maze drawing, on the terminal and as plain text
//!
//! A maze of `w`x`h` cells is laid out as a `(2h + 1)`x`(2w + 1)` matrix of
//! [Tile]s: cells sit on odd rows and columns, walls and corners between them.

use std::collections::HashSet;
use std::io;

use crossterm::style::Color;
use itertools::Itertools;

use crate::grid::{Direction, Point};
use crate::maze_generator::Maze;
use crate::terminal::{Paint, Terminal};

/// Terminal columns used by one tile
const TILE_W: u16 = 2;
/// Rows above the maze, used by the title
const HEADER_H: u16 = 2;
/// Rows below the maze, used by the message, the legend and the controls
const FOOTER_H: u16 = 4;

pub const TITLE: &str = " A-MAZE-ING ";
pub const CONTROLS: &str =
    "[G] Regenerate  [S] Solve  [A] Animate  [R] Reset  [C] Colors  [Q] Quit";

const LEGEND_LABEL: &str = "Legend: ";
const LEGEND: [(Tile, &str); 4] = [
    (Tile::Entry, " Start"),
    (Tile::Exit, " End"),
    (Tile::Path, " Path"),
    (Tile::Visited, " Visited"),
];
/// Spaces after each legend entry
const LEGEND_GAP: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Passage,
    Reserved,
    Entry,
    Exit,
    Path,
    Visited,
}

impl Tile {
    fn is_on_path(self) -> bool {
        matches!(self, Tile::Path | Tile::Entry | Tile::Exit)
    }

    /// Character used by the text printer
    pub fn symbol(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Passage => ' ',
            Tile::Reserved => '%',
            Tile::Entry => 'S',
            Tile::Exit => 'E',
            Tile::Path => '.',
            Tile::Visited => ' ',
        }
    }
}

/// Color scheme of the interactive view
pub struct Palette {
    pub name: &'static str,
    pub wall: Color,
    pub reserved: Color,
    pub entry: Color,
    pub exit: Color,
    pub path: Color,
    pub visited: Color,
    pub title: Paint,
}

impl Palette {
    pub fn paint(&self, tile: Tile) -> Paint {
        match tile {
            Tile::Wall => Paint::block(self.wall),
            Tile::Passage => Paint::PLAIN,
            Tile::Reserved => Paint::block(self.reserved),
            Tile::Entry => Paint::block(self.entry),
            Tile::Exit => Paint::block(self.exit),
            Tile::Path => Paint::block(self.path),
            Tile::Visited => Paint::block(self.visited),
        }
    }
}

pub static PALETTES: [Palette; 4] = [
    Palette {
        name: "classic",
        wall: Color::White,
        reserved: Color::DarkGrey,
        entry: Color::Green,
        exit: Color::Red,
        path: Color::Yellow,
        visited: Color::Cyan,
        title: Paint::new(Color::White, Color::Blue),
    },
    Palette {
        name: "ocean",
        wall: Color::Blue,
        reserved: Color::DarkBlue,
        entry: Color::Green,
        exit: Color::Magenta,
        path: Color::White,
        visited: Color::DarkCyan,
        title: Paint::new(Color::Black, Color::Cyan),
    },
    Palette {
        name: "forest",
        wall: Color::DarkGreen,
        reserved: Color::DarkYellow,
        entry: Color::Cyan,
        exit: Color::Red,
        path: Color::Yellow,
        visited: Color::Green,
        title: Paint::new(Color::Black, Color::Green),
    },
    Palette {
        name: "ember",
        wall: Color::DarkRed,
        reserved: Color::Grey,
        entry: Color::Yellow,
        exit: Color::White,
        path: Color::Red,
        visited: Color::DarkMagenta,
        title: Paint::new(Color::White, Color::DarkRed),
    },
];

/// Everything shown on one frame
pub struct Scene<'a> {
    pub maze: &'a Maze,
    pub path: &'a [Point],
    pub visited: &'a [Point],
    pub palette: &'a Palette,
    pub message: &'a str,
}

/// Lay out maze as tiles, marking path and visited cells
pub fn tiles(maze: &Maze, path: &[Point], visited: &[Point]) -> Vec<Vec<Tile>> {
    let grid = &maze.grid;
    let (w, h) = (grid.width(), grid.height());
    let path: HashSet<Point> = path.iter().copied().collect();
    let visited: HashSet<Point> = visited.iter().copied().collect();

    let cell_tile = |p: Point| {
        if p == maze.entry {
            Tile::Entry
        } else if p == maze.exit {
            Tile::Exit
        } else if path.contains(&p) {
            Tile::Path
        } else if maze.reserved.contains(&p) {
            Tile::Reserved
        } else if visited.contains(&p) {
            Tile::Visited
        } else {
            Tile::Passage
        }
    };
    let edge_tile = |a: Tile, b: Tile| {
        if a == Tile::Reserved && b == Tile::Reserved {
            Tile::Reserved
        } else if a.is_on_path() && b.is_on_path() {
            Tile::Path
        } else if a == Tile::Visited && b == Tile::Visited {
            Tile::Visited
        } else {
            Tile::Passage
        }
    };

    let mut disp = vec![vec![Tile::Wall; 2 * w + 1]; 2 * h + 1];
    for p in grid.points() {
        let here = cell_tile(p);
        let (row, col) = (2 * p.y + 1, 2 * p.x + 1);
        disp[row][col] = here;

        for dir in [Direction::East, Direction::South] {
            if grid.is_passable(p, dir) {
                if let Some(n) = grid.neighbor(p, dir) {
                    let (dx, dy) = dir.delta();
                    let (r, c) = ((row as isize + dy) as usize, (col as isize + dx) as usize);
                    disp[r][c] = edge_tile(here, cell_tile(n));
                }
            }
        }

        // Openings in the outer wall
        for dir in Direction::ALL {
            if grid.neighbor(p, dir).is_none() && !grid.has_wall(p.x, p.y, dir) {
                let (dx, dy) = dir.delta();
                let (r, c) = ((row as isize + dy) as usize, (col as isize + dx) as usize);
                disp[r][c] = here;
            }
        }
    }

    // Corners enclosed by open tiles on all four sides
    for row in (2..2 * h).step_by(2) {
        for col in (2..2 * w).step_by(2) {
            let around = [
                disp[row - 1][col],
                disp[row + 1][col],
                disp[row][col - 1],
                disp[row][col + 1],
            ];
            if around.iter().all(|t| *t != Tile::Wall) {
                disp[row][col] = if around.iter().all(|t| *t == Tile::Reserved) {
                    Tile::Reserved
                } else {
                    Tile::Passage
                };
            }
        }
    }
    disp
}

/// Plain text rendering, two characters per tile
///
/// # Examples
/// ```
/// use a_maze_ing::{render, Algorithm, MazeConfig, MazeGenerator, Point};
///
/// let config = MazeConfig {
///     width: 9,
///     height: 7,
///     entry: Point::new(0, 0),
///     exit: Point::new(8, 6),
///     perfect: true,
///     algorithm: Algorithm::Backtracker,
///     seed: Some(1),
/// };
/// let maze = MazeGenerator::new(config.seed).generate(&config).unwrap();
/// let text = render::ascii(&maze, &[]);
/// assert_eq!(text.lines().count(), 15);
/// ```
pub fn ascii(maze: &Maze, path: &[Point]) -> String {
    tiles(maze, path, &[])
        .iter()
        .map(|row| {
            row.iter()
                .map(|tile| tile.symbol().to_string().repeat(TILE_W as usize))
                .join("")
        })
        .join("\n")
}

/// Text shown on a tile of the interactive view
fn tile_text(tile: Tile) -> &'static str {
    match tile {
        Tile::Entry => "S ",
        Tile::Exit => "E ",
        _ => "  ",
    }
}

/// Width of the legend row
fn legend_width() -> usize {
    LEGEND_LABEL.len()
        + LEGEND
            .iter()
            .map(|(_, label)| usize::from(TILE_W) + label.len() + LEGEND_GAP)
            .sum::<usize>()
}

/// Draw a complete frame
///
/// The maze is centered on screen. If it does not fit, only a notice with the
/// required size is drawn.
pub fn draw<T: Terminal>(terminal: &mut T, scene: &Scene) -> io::Result<()> {
    let disp = tiles(scene.maze, scene.path, scene.visited);
    let rows = disp.len();
    let maze_w = disp
        .first()
        .map_or(0, Vec::len)
        .saturating_mul(usize::from(TILE_W));
    let needed_w = maze_w.max(CONTROLS.len()).max(legend_width());
    let needed_h = rows.saturating_add(usize::from(HEADER_H + FOOTER_H));

    terminal.clear()?;
    let (term_w, term_h) = terminal.size()?;
    let (term_w, term_h) = (usize::from(term_w), usize::from(term_h));
    if term_w < needed_w || term_h < needed_h {
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        terminal.draw(0, 0, &msg, Paint::PLAIN)?;
        return terminal.refresh();
    }

    // Everything below lies inside the terminal, so it fits in u16
    let at = |n: usize| n as u16;
    let origin_x = (term_w - maze_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + usize::from(HEADER_H);
    let text_x = (term_w - needed_w) / 2;

    terminal.draw(
        at(origin_y - usize::from(HEADER_H)),
        at(text_x),
        TITLE,
        scene.palette.title.bold(),
    )?;
    for (y, row) in disp.iter().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            terminal.draw(
                at(origin_y + y),
                at(origin_x + x * usize::from(TILE_W)),
                tile_text(*tile),
                scene.palette.paint(*tile),
            )?;
        }
    }

    let footer_y = origin_y + rows + 1;
    terminal.draw(at(footer_y), at(text_x), scene.message, Paint::PLAIN.bold())?;

    let legend_y = at(footer_y + 1);
    terminal.draw(legend_y, at(text_x), LEGEND_LABEL, Paint::PLAIN.bold())?;
    let mut col = text_x + LEGEND_LABEL.len();
    for (tile, label) in LEGEND {
        terminal.draw(legend_y, at(col), tile_text(tile), scene.palette.paint(tile))?;
        col += usize::from(TILE_W);
        terminal.draw(legend_y, at(col), label, Paint::PLAIN)?;
        col += label.len() + LEGEND_GAP;
    }

    terminal.draw(
        at(footer_y + 2),
        at(text_x),
        CONTROLS,
        Paint::new(Color::DarkGrey, Color::Reset),
    )?;
    terminal.refresh()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::grid::Grid;
    use crate::terminal::testing::ScriptedTerminal;

    /// 3x2 maze: top row is a corridor, (1, 1) hangs below its middle
    fn small_maze() -> Maze {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.remove_wall(0, 0, Direction::East);
        grid.remove_wall(1, 0, Direction::East);
        grid.remove_wall(1, 0, Direction::South);
        grid.remove_wall(0, 1, Direction::East);
        grid.open_entrance(Point::new(0, 0));
        grid.open_entrance(Point::new(2, 0));
        Maze {
            grid,
            reserved: HashSet::new(),
            entry: Point::new(0, 0),
            exit: Point::new(2, 0),
        }
    }

    #[test]
    fn tile_layout() {
        let maze = small_maze();
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        let disp = tiles(&maze, &path, &[]);

        assert_eq!(disp.len(), 5);
        assert_eq!(disp[0].len(), 7);
        // Entrances in the top border
        assert_eq!(disp[0][1], Tile::Entry);
        assert_eq!(disp[0][5], Tile::Exit);
        assert_eq!(disp[0][3], Tile::Wall);
        assert_eq!(disp[1][1], Tile::Entry);
        assert_eq!(disp[1][2], Tile::Path);
        assert_eq!(disp[1][3], Tile::Path);
        assert_eq!(disp[1][4], Tile::Path);
        assert_eq!(disp[1][5], Tile::Exit);
        // Branch below the middle cell
        assert_eq!(disp[2][3], Tile::Passage);
        assert_eq!(disp[2][1], Tile::Wall);
        assert_eq!(disp[3][2], Tile::Passage);
        assert_eq!(disp[3][4], Tile::Wall);
        // Corner next to a wall stays a wall
        assert_eq!(disp[2][2], Tile::Wall);
    }

    #[test]
    fn reserved_block_is_filled() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut reserved = HashSet::new();
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            grid.force_open(x, y);
            reserved.insert(Point::new(x, y));
        }
        let maze = Maze {
            grid,
            reserved,
            entry: Point::new(0, 0),
            exit: Point::new(3, 3),
        };
        let disp = tiles(&maze, &[], &[]);
        assert_eq!(disp[3][3], Tile::Reserved);
        assert_eq!(disp[4][4], Tile::Reserved);
        assert_eq!(disp[5][4], Tile::Reserved);
        // Walled off from the neighbors
        assert_eq!(disp[3][2], Tile::Wall);
    }

    #[test]
    fn ascii_marks_path() {
        let maze = small_maze();
        let text = ascii(&maze, &[Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "##SS######EE##");
        assert_eq!(lines[1], "##SS......EE##");
    }

    #[test]
    fn draw_centers_maze() {
        let maze = small_maze();
        let mut terminal = ScriptedTerminal::new(&[]);
        let scene = Scene {
            maze: &maze,
            path: &[],
            visited: &[],
            palette: &PALETTES[0],
            message: "hello",
        };
        draw(&mut terminal, &scene).unwrap();

        assert_eq!(terminal.refreshes, 1);
        assert!(terminal.shows("A-MAZE-ING"));
        assert!(terminal.shows("hello"));
        assert!(terminal.shows("[Q] Quit"));
        // 35 tiles, 12 of them open
        assert_eq!(terminal.painted(Paint::block(Color::White)), 23);
    }

    #[test]
    fn draw_legend_uses_palette() {
        let maze = small_maze();
        let mut terminal = ScriptedTerminal::new(&[]);
        let scene = Scene {
            maze: &maze,
            path: &[],
            visited: &[],
            palette: &PALETTES[0],
            message: "",
        };
        draw(&mut terminal, &scene).unwrap();

        assert!(terminal.shows("Legend"));
        for label in ["Start", "End", "Path", "Visited"] {
            assert!(terminal.shows(label), "missing {}", label);
        }
        // Two entry tiles in the maze, one swatch
        assert_eq!(terminal.painted(Paint::block(Color::Green)), 3);
        assert_eq!(terminal.painted(Paint::block(Color::Cyan)), 1);

        let legend: Vec<_> = terminal
            .screen
            .iter()
            .skip_while(|call| !call.text.starts_with("Legend"))
            .take(1 + 2 * LEGEND.len())
            .collect();
        assert_eq!(legend.len(), 9);
        assert!(legend.iter().all(|call| call.row == legend[0].row));
        assert!(legend.windows(2).all(|pair| pair[0].col < pair[1].col));
        let controls = terminal
            .screen
            .iter()
            .find(|call| call.text == CONTROLS)
            .unwrap();
        assert_eq!(controls.row, legend[0].row + 1);
    }

    #[test]
    fn draw_maze_wider_than_any_terminal() {
        let grid = Grid::new(20000, 7).unwrap();
        let maze = Maze {
            grid,
            reserved: HashSet::new(),
            entry: Point::new(0, 0),
            exit: Point::new(19999, 6),
        };
        let mut terminal = ScriptedTerminal::new(&[]);
        terminal.size = (u16::MAX, u16::MAX);
        let scene = Scene {
            maze: &maze,
            path: &[],
            visited: &[],
            palette: &PALETTES[0],
            message: "",
        };
        draw(&mut terminal, &scene).unwrap();

        assert_eq!(terminal.screen.len(), 1);
        assert!(terminal.shows("Terminal too small. Need at least 80002x21"));
        assert_eq!(terminal.refreshes, 1);
    }

    #[test]
    fn draw_small_terminal() {
        let maze = small_maze();
        let mut terminal = ScriptedTerminal::new(&[]);
        terminal.size = (20, 5);
        let scene = Scene {
            maze: &maze,
            path: &[],
            visited: &[],
            palette: &PALETTES[1],
            message: "",
        };
        draw(&mut terminal, &scene).unwrap();
        assert_eq!(terminal.screen.len(), 1);
        assert!(terminal.shows("Terminal too small"));
    }
}
