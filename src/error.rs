//! Error types surfaced by the library.
//!
//! Lifecycle no-ops (dropping into a busy slot, expiring an inactive bomb)
//! are not errors and never show up here.

use thiserror::Error;

/// A `Config` value the simulation cannot run with.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{pool} pool capacity must be at least 1")]
    ZeroCapacity { pool: &'static str },

    #[error("{timer} duration must be non-zero")]
    ZeroDuration { timer: &'static str },

    #[error("tick rate must be non-zero")]
    ZeroTickRate,

    #[error("monster speed range {min}..={max} is empty")]
    EmptySpeedRange { min: u32, max: u32 },

    #[error("field {width}x{height} cannot fit a {sprite}px sprite below a {header}px header")]
    FieldTooSmall {
        width: f32,
        height: f32,
        sprite: f32,
        header: f32,
    },

    #[error("monster spawn area must lie strictly inside the monster bounds")]
    SpawnAreaOutOfBounds,
}

/// Failure to bring up the presentation layer.  Always fatal at startup.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
}
