//! All game entity types: plain data. Behaviour lives in the other modules.

use crate::config::Config;
use crate::lifecycle::{BombPool, MonsterPool};
use crate::timers::Scheduler;

/// A point on the reference field.  `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Which way the player is rotating this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnIntent {
    #[default]
    None,
    /// Counter-clockwise: the heading angle grows.
    Ccw,
    /// Clockwise: the heading angle shrinks.
    Cw,
}

/// Which way the player is thrusting this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoveIntent {
    #[default]
    None,
    Forward,
    Backward,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Position,
    /// Heading in degrees, always in `[0, 360)`.  0 points up the screen,
    /// 90 points left.
    pub angle: f32,
    pub move_speed: f32,
    pub rotate_speed: f32,
    pub turn: TurnIntent,
    pub movement: MoveIntent,
    pub life: u32,
    /// Touching a monster this tick.
    pub crashed: bool,
    /// Inside an exploding bomb's footprint this tick.
    pub burned: bool,
}

impl Player {
    /// A fresh player at the centre of the field, facing up.
    pub fn spawn(config: &Config) -> Self {
        let (x, y) = config.field_center();
        Player {
            pos: Position::new(x, y),
            angle: 0.0,
            move_speed: config.player_move_speed,
            rotate_speed: config.player_rotate_speed,
            turn: TurnIntent::None,
            movement: MoveIntent::None,
            life: config.player_life,
            crashed: false,
            burned: false,
        }
    }
}

// ── Bombs ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BombState {
    #[default]
    Inactive,
    /// Dropped and waiting for the arm timer.
    Armed,
    /// Hazardous until the fire timer runs out.
    Exploding,
}

/// One bomb slot.  `pos` is `Some` exactly when the bomb is not inactive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bomb {
    pub state: BombState,
    pub pos: Option<Position>,
}

// ── Monsters ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterState {
    Alive,
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    pub state: MonsterState,
    pub pos: Position,
    /// Fixed at spawn.
    pub axis: Axis,
    pub direction: Direction,
    /// Field units per tick, fixed at spawn.
    pub speed: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Boolean game-flow flags.  Exactly one of them is set at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionFlags {
    /// Waiting for the first key press.
    pub on_start: bool,
    pub active: bool,
    pub over: bool,
}

impl Default for SessionFlags {
    fn default() -> Self {
        SessionFlags {
            on_start: true,
            active: false,
            over: false,
        }
    }
}

/// Everything one game session owns.  Only `compute::tick` and the
/// subsystems it calls mutate it.
#[derive(Clone, Debug)]
pub struct Session {
    pub config: Config,
    pub player: Player,
    pub bombs: BombPool,
    pub monsters: MonsterPool,
    pub timers: Scheduler,
    pub score: u32,
    /// Highest score seen by this process, updated live.
    pub high_score: u32,
    /// Whole seconds left on the countdown.
    pub countdown: u32,
    pub flags: SessionFlags,
    pub tick: u64,
}
