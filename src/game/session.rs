use rand::Rng;

use super::config::{ConfigError, GameConfig};
use super::rules::{self, place_food};
use super::types::{Direction, Position, Status};

/// Everything the tick engine needs to advance one game.
///
/// A session is owned by whoever drives the game. Between ticks the owner
/// may change its status or queue a direction; the tick itself
/// ([`crate::game::tick`]) never mutates a session and instead returns the
/// next one. Restarting means building a new session, never resetting this
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub(crate) grid_size: i32,
    pub(crate) snake: Vec<Position>,
    pub(crate) food: Position,
    pub(crate) direction: Direction,
    pub(crate) pending_direction: Direction,
    pub(crate) score: u32,
    pub(crate) speed: u32,
    pub(crate) min_speed: u32,
    pub(crate) status: Status,
}

impl GameSession {
    /// Builds a Ready session with food at a random free cell.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let food = place_food(&config.initial_snake, config.grid_size, rng).ok_or(
            ConfigError::NoRoomForFood {
                capacity: config.capacity(),
            },
        )?;
        Ok(Self::from_parts(config, food))
    }

    /// Builds a Ready session with food at a fixed cell.
    pub fn with_food(config: &GameConfig, food: Position) -> Result<Self, ConfigError> {
        config.validate()?;
        if !config.contains(food) {
            return Err(ConfigError::FoodOutOfBounds {
                pos: food,
                size: config.grid_size,
            });
        }
        if config.initial_snake.contains(&food) {
            return Err(ConfigError::FoodOnSnake(food));
        }
        Ok(Self::from_parts(config, food))
    }

    fn from_parts(config: &GameConfig, food: Position) -> Self {
        Self {
            grid_size: config.grid_size,
            snake: config.initial_snake.clone(),
            food,
            direction: config.initial_direction,
            pending_direction: config.initial_direction,
            score: 0,
            speed: config.initial_speed,
            min_speed: config.min_speed,
            status: Status::Ready,
        }
    }

    /// Ready -> Running. Returns whether the status changed.
    pub fn start(&mut self) -> bool {
        self.transition(Status::Ready, Status::Running)
    }

    /// Running -> Paused. Returns whether the status changed.
    pub fn pause(&mut self) -> bool {
        self.transition(Status::Running, Status::Paused)
    }

    /// Paused -> Running. Returns whether the status changed.
    pub fn resume(&mut self) -> bool {
        self.transition(Status::Paused, Status::Running)
    }

    /// Flips between Running and Paused; any other status is left alone.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            Status::Running => self.pause(),
            Status::Paused => self.resume(),
            Status::Ready | Status::Over => false,
        }
    }

    fn transition(&mut self, from: Status, to: Status) -> bool {
        if self.status != from {
            return false;
        }
        self.status = to;
        true
    }

    /// Offers a new heading for the next tick.
    ///
    /// The candidate is checked against the direction already applied, not
    /// against whatever is queued, and replaces the queued one if accepted.
    /// Two quick presses between ticks therefore cannot chain into a reversal.
    /// Returns whether the request was kept.
    pub fn request_direction(&mut self, candidate: Direction) -> bool {
        if self.status == Status::Over {
            return false;
        }
        if !rules::is_valid_direction_change(candidate, self.direction) {
            return false;
        }
        self.pending_direction = candidate;
        true
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Segments head first.
    pub fn snake(&self) -> &[Position] {
        &self.snake
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn food(&self) -> Position {
        self.food
    }

    /// The direction applied on the last tick.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current tick interval in milliseconds.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn min_speed(&self) -> u32 {
        self.min_speed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::Over
    }
}
