//! gridsnake - a grid snake game for the terminal.
//!
//! - [`game`]: the tick engine (pure rules, no I/O)
//! - [`input`]: key events to game commands
//! - [`render`]: crossterm drawing
//! - [`scheduler`]: tick timing driven by the session's speed
//! - [`highscore`]: best score on disk
//! - [`app`]: the interactive loop tying them together

pub mod app;
pub mod game;
pub mod highscore;
pub mod input;
pub mod render;
pub mod scheduler;
