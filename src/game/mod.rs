//! The tick engine: pure snake rules with no I/O or rendering.
//!
//! A [`GameSession`] is built from a [`GameConfig`], started, and then fed
//! through [`tick`] once per scheduler beat. Direction intents go through
//! [`GameSession::request_direction`] and take effect on the next tick.

pub mod config;
pub mod engine;
pub mod rules;
pub mod session;
pub mod types;

pub use config::{ConfigError, GameConfig};
pub use engine::{tick, Collision, Step, TickEvent};
pub use session::GameSession;
pub use types::{Direction, Position, Status};
