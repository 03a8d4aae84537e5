use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::game::{GameSession, Position, Status};

/// Largest board the terminal front-end will try to draw.
pub const MAX_GRID_SIZE: i32 = 1000;

/// Rows under the board for the score and help lines.
const FOOTER_ROWS: u16 = 2;

/// Draws a session to any terminal-like writer.
///
/// Grid cell (x, y) lands at screen column x + 1, row y + 1, inside a `#`
/// border. Score lines sit under the board.
pub struct Renderer {
    high_score: u32,
}

impl Renderer {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }

    pub fn set_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }

    /// Columns and rows needed to draw an `n`x`n` board with its border and
    /// footer, or `None` if it cannot be addressed on a terminal.
    pub fn screen_size(grid_size: i32) -> Option<(u16, u16)> {
        if !(1..=MAX_GRID_SIZE).contains(&grid_size) {
            return None;
        }
        let side = u16::try_from(grid_size).ok()?.checked_add(2)?;
        Some((side, side.checked_add(FOOTER_ROWS)?))
    }

    pub fn draw<W: Write>(&self, out: &mut W, session: &GameSession) -> io::Result<()> {
        let (side, _) = Self::screen_size(session.grid_size()).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "grid size {} exceeds the drawable maximum of {}",
                    session.grid_size(),
                    MAX_GRID_SIZE
                ),
            )
        })?;
        let size = side - 2;

        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

        for x in 0..side {
            queue!(out, MoveTo(x, 0), Print("#"), MoveTo(x, side - 1), Print("#"))?;
        }

        for y in 0..size {
            queue!(out, MoveTo(0, y + 1), Print("#"))?;
            let row: String = (0..size)
                .map(|x| cell_char(session, Position::new(i32::from(x), i32::from(y))))
                .collect();
            queue!(out, Print(row), Print("#"))?;
        }

        queue!(
            out,
            MoveTo(0, side),
            Print(format!(
                "Score: {}  High: {}  Speed: {}ms",
                session.score(),
                self.high_score.max(session.score()),
                session.speed()
            )),
            MoveTo(0, side + 1),
            Print("Arrows/WASD move, Space pause, Enter start, R restart, Q quit")
        )?;

        match session.status() {
            Status::Running => {}
            Status::Ready => self.overlay(out, size, &["Snake", "Press Enter to start"])?,
            Status::Paused => self.overlay(out, size, &["Paused"])?,
            Status::Over => {
                let score = format!("Score: {}", session.score());
                let lines = ["Game Over!", score.as_str(), "Press Enter to play again"];
                self.overlay(out, size, &lines)?
            }
        }

        out.flush()
    }

    fn overlay<W: Write>(&self, out: &mut W, size: u16, lines: &[&str]) -> io::Result<()> {
        let middle = size / 2 + 1;
        let top = middle.saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let width = line.chars().count() as u16;
            let col = (size + 2).saturating_sub(width) / 2;
            queue!(out, MoveTo(col, top + i as u16), Print(line))?;
        }
        Ok(())
    }
}

fn cell_char(session: &GameSession, pos: Position) -> char {
    if session.head() == pos {
        'O'
    } else if session.snake().contains(&pos) {
        'o'
    } else if session.food() == pos {
        '*'
    } else {
        ' '
    }
}
