use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;

use crate::game::{self, ConfigError, GameConfig, GameSession, Status, TickEvent};
use crate::highscore::HighScoreStore;
use crate::input::{self, Command};
use crate::render::Renderer;
use crate::scheduler::Ticker;

/// Upper bound on how long to block waiting for input, so the screen keeps
/// up with status changes even on slow tick intervals.
const MAX_POLL: Duration = Duration::from_millis(50);

/// Owns the current session and every collaborator around it.
pub struct App {
    config: GameConfig,
    session: GameSession,
    rng: StdRng,
    ticker: Ticker,
    high_scores: HighScoreStore,
    renderer: Renderer,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: GameConfig,
        mut rng: StdRng,
        high_scores: HighScoreStore,
    ) -> Result<Self, ConfigError> {
        let session = GameSession::new(&config, &mut rng)?;
        let ticker = Ticker::new(session.speed(), Instant::now());
        let renderer = Renderer::new(high_scores.best());
        Ok(Self {
            config,
            session,
            rng,
            ticker,
            high_scores,
            renderer,
            should_quit: false,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        let available = terminal::size().context("Failed to read terminal size")?;
        ensure_fits(self.session.grid_size(), available)?;

        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let mut out = stdout();
        let result = execute!(out, EnterAlternateScreen, Hide)
            .context("Failed to enter alternate screen")
            .and_then(|()| self.run_loop(&mut out));

        let restored = restore_terminal(&mut out);
        finish(result, restored)?;

        println!(
            "Final score: {}  High score: {}",
            self.session.score(),
            self.high_scores.best()
        );
        Ok(())
    }

    fn run_loop(&mut self, out: &mut Stdout) -> Result<()> {
        self.renderer
            .draw(out, &self.session)
            .context("Failed to draw frame")?;

        while !self.should_quit {
            let now = Instant::now();
            let wait = self.ticker.time_until_due(now).min(MAX_POLL);

            let mut dirty = false;
            if event::poll(wait).context("Failed to poll input")? {
                if let Event::Key(key) = event::read().context("Failed to read input")? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(command) = input::command_for_key(key) {
                            self.handle_command(command, Instant::now());
                            dirty = true;
                        }
                    }
                }
            }

            let now = Instant::now();
            if self.ticker.is_due(now) {
                if self.session.status() == Status::Running {
                    self.step(now);
                    dirty = true;
                } else {
                    self.ticker.mark(now);
                }
            }

            if dirty {
                self.renderer
                    .draw(out, &self.session)
                    .context("Failed to draw frame")?;
            }
        }

        out.flush().context("Failed to flush terminal")?;
        Ok(())
    }

    /// Applies one input command between ticks.
    pub fn handle_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::Turn(direction) => {
                self.session.request_direction(direction);
            }
            Command::TogglePause => {
                if self.session.toggle_pause() && self.session.status() == Status::Running {
                    self.ticker.resume(now);
                }
            }
            Command::Start => match self.session.status() {
                Status::Ready => {
                    self.session.start();
                    self.ticker.resume(now);
                }
                Status::Over => self.restart(now),
                Status::Running | Status::Paused => {}
            },
            Command::Restart => self.restart(now),
            Command::Quit => self.should_quit = true,
        }
    }

    /// Runs one tick and reports its effects to persistence and the ticker.
    pub fn step(&mut self, now: Instant) -> TickEvent {
        let step = game::tick(&self.session, &mut self.rng);
        self.session = step.session;
        self.ticker.mark(now);

        match step.event {
            TickEvent::AteFood {
                score,
                speed,
                speed_changed,
            } => {
                self.record_score(score);
                if speed_changed {
                    log::debug!("Tick interval now {}ms", speed);
                    self.ticker.reschedule(speed, now);
                }
            }
            TickEvent::GameOver { cause, score } => {
                log::info!("Game over ({:?}) with score {}", cause, score);
                self.record_score(score);
            }
            TickEvent::BoardFilled { score } => {
                log::info!("Board filled with score {}", score);
                self.record_score(score);
            }
            TickEvent::Idle | TickEvent::Moved => {}
        }

        step.event
    }

    fn record_score(&mut self, score: u32) {
        if !self.high_scores.submit(score) {
            return;
        }
        self.renderer.set_high_score(score);
        if let Err(e) = self.high_scores.save() {
            log::warn!(
                "Failed to save high score to {}: {}",
                self.high_scores.path().display(),
                e
            );
        }
    }

    fn restart(&mut self, now: Instant) {
        match GameSession::new(&self.config, &mut self.rng) {
            Ok(mut session) => {
                session.start();
                self.ticker.reschedule(session.speed(), now);
                self.session = session;
                log::info!("New game started");
            }
            Err(e) => log::error!("Could not start a new game: {}", e),
        }
    }
}

/// Fails unless a board of `grid_size` plus its border and footer fits in a
/// terminal of `(columns, rows)`.
fn ensure_fits(grid_size: i32, (columns, rows): (u16, u16)) -> Result<()> {
    let (needed_columns, needed_rows) = Renderer::screen_size(grid_size)
        .with_context(|| format!("Grid size {} cannot be drawn", grid_size))?;
    if needed_columns > columns || needed_rows > rows {
        bail!(
            "A {}x{} grid needs a {}x{} terminal, this one is {}x{}",
            grid_size,
            grid_size,
            needed_columns,
            needed_rows,
            columns,
            rows
        );
    }
    Ok(())
}

/// Runs every restore step even if an earlier one fails.
fn restore_terminal<W: Write>(out: &mut W) -> Result<()> {
    let screen =
        execute!(out, Show, LeaveAlternateScreen).context("Failed to leave alternate screen");
    let raw = terminal::disable_raw_mode().context("Failed to disable raw mode");
    screen.and(raw)
}

/// A game loop error wins over a restore error, which is only logged then.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(e), Err(restore)) => {
            log::error!("Terminal restore also failed: {:#}", restore);
            Err(e)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(())) => Ok(()),
    }
}
