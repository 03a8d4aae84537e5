use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rules::{DEFAULT_GRID_SIZE, DEFAULT_MIN_SPEED, DEFAULT_SPEED};
use super::types::{Direction, Position};

const DEFAULT_SNAKE_LEN: i32 = 3;

/// Reasons a session cannot be built from a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be positive, got {0}")]
    InvalidGridSize(i32),
    #[error("initial snake must have at least one segment")]
    EmptySnake,
    #[error("initial snake has {len} segments but the grid only holds {capacity} cells")]
    SnakeTooLong { len: usize, capacity: u64 },
    #[error("initial snake fills all {capacity} cells, leaving no room for food")]
    NoRoomForFood { capacity: u64 },
    #[error("snake segment ({}, {}) lies outside a {size}x{size} grid", .pos.x, .pos.y)]
    SegmentOutOfBounds { pos: Position, size: i32 },
    #[error("snake segment ({}, {}) appears more than once", .0.x, .0.y)]
    DuplicateSegment(Position),
    #[error("food ({}, {}) lies outside a {size}x{size} grid", .pos.x, .pos.y)]
    FoodOutOfBounds { pos: Position, size: i32 },
    #[error("food ({}, {}) overlaps the snake", .0.x, .0.y)]
    FoodOnSnake(Position),
    #[error("initial speed must be positive")]
    ZeroSpeed,
    #[error("minimum speed must be positive")]
    ZeroMinSpeed,
}

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: i32,
    /// Starting snake, head first
    pub initial_snake: Vec<Position>,
    pub initial_direction: Direction,
    /// Starting tick interval in milliseconds
    pub initial_speed: u32,
    /// Fastest tick interval reachable by eating
    pub min_speed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::with_grid_size(DEFAULT_GRID_SIZE)
    }
}

impl GameConfig {
    /// Default rules on an `n`x`n` grid. The snake starts a quarter of the
    /// way in, on the middle row, heading right. It has three segments, or
    /// one per column on boards narrower than that, and its head is pushed
    /// right far enough for the tail to stay on the board.
    pub fn with_grid_size(grid_size: i32) -> Self {
        let len = grid_size.clamp(1, DEFAULT_SNAKE_LEN);
        let head_x = (grid_size / 4).max(len - 1).min((grid_size - 1).max(0));
        let head = Position::new(head_x, grid_size / 2);
        Self {
            grid_size,
            initial_snake: (0..len).map(|i| Position::new(head.x - i, head.y)).collect(),
            initial_direction: Direction::Right,
            initial_speed: DEFAULT_SPEED,
            min_speed: DEFAULT_MIN_SPEED,
        }
    }

    /// Total number of cells on the board.
    pub fn capacity(&self) -> u64 {
        let side = self.grid_size.max(0) as u64;
        side * side
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.grid_size).contains(&pos.x) && (0..self.grid_size).contains(&pos.y)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 0 {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }
        if self.initial_speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.min_speed == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }
        if self.initial_snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        let capacity = self.capacity();
        let len = self.initial_snake.len();
        if len as u64 > capacity {
            return Err(ConfigError::SnakeTooLong { len, capacity });
        }
        if len as u64 == capacity {
            return Err(ConfigError::NoRoomForFood { capacity });
        }

        let mut seen = HashSet::with_capacity(len);
        for &pos in &self.initial_snake {
            if !self.contains(pos) {
                return Err(ConfigError::SegmentOutOfBounds {
                    pos,
                    size: self.grid_size,
                });
            }
            if !seen.insert(pos) {
                return Err(ConfigError::DuplicateSegment(pos));
            }
        }

        Ok(())
    }
}
