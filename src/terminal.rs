//! Minimal terminal interface used by the interactive viewer

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};

/// Colors and style of drawn text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paint {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Paint {
    pub const PLAIN: Paint = Paint::new(Color::Reset, Color::Reset);

    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    /// Solid block of one color
    pub const fn block(color: Color) -> Self {
        Self::new(color, color)
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

/// Screen and keyboard capabilities needed to show a maze
pub trait Terminal {
    /// Screen size as (columns, rows)
    fn size(&self) -> io::Result<(u16, u16)>;

    fn clear(&mut self) -> io::Result<()>;

    /// Write `text` starting at the given position
    fn draw(&mut self, row: u16, col: u16, text: &str, paint: Paint) -> io::Result<()>;

    /// Flush everything drawn since the last refresh
    fn refresh(&mut self) -> io::Result<()>;

    /// Block until a key is pressed
    fn read_key(&mut self) -> io::Result<KeyCode>;

    /// Wait up to `timeout` for a key press
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyCode>>;
}

/// Terminal on stdout, in raw mode on the alternate screen
///
/// The screen is restored when the value is dropped.
pub struct CrosstermTerminal {
    stdout: Stdout,
}

impl CrosstermTerminal {
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;
        Ok(Self { stdout })
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Terminal for CrosstermTerminal {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.stdout.queue(Clear(ClearType::All))?;
        Ok(())
    }

    fn draw(&mut self, row: u16, col: u16, text: &str, paint: Paint) -> io::Result<()> {
        self.stdout.queue(MoveTo(col, row))?;
        self.stdout.queue(SetForegroundColor(paint.fg))?;
        self.stdout.queue(SetBackgroundColor(paint.bg))?;
        if paint.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        self.stdout.queue(Print(text))?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn read_key(&mut self) -> io::Result<KeyCode> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key.code);
                }
            }
        }
    }

    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyCode>> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if !event::poll(left)? {
                return Ok(None);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key.code));
                }
            }
        }
    }
}
