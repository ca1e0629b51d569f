//! Daga bomber: a top-down plane drops timed bombs on wandering monsters.
//!
//! The simulation is split into small, mostly pure modules that the game
//! loop in `compute` ties together once per tick.  Everything here is free of
//! terminal I/O; the binary owns the renderer and the input thread.

pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod frame;
pub mod input;
pub mod kinematics;
pub mod lifecycle;
pub mod timers;

pub use config::Config;
pub use error::{ConfigError, DisplayError};
