//! Tuning constants for one game session.
//!
//! All coordinates are in the 1000×800 reference field; the renderer scales
//! them to whatever the terminal offers.

use std::time::Duration;

use crate::error::ConfigError;

/// Axis-aligned rectangle given by its inclusive edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Rect {
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Rect { min_x, max_x, min_y, max_y }
    }

    pub fn contains_strictly(&self, other: &Rect) -> bool {
        other.min_x > self.min_x
            && other.max_x < self.max_x
            && other.min_y > self.min_y
            && other.max_y < self.max_y
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    // ── Field ────────────────────────────────────────────────────────────────
    pub field_width: f32,
    pub field_height: f32,
    /// Height of the HUD band at the top of the field; the player never enters it.
    pub header_height: f32,
    /// Edge length of every sprite and therefore of every collision footprint.
    pub sprite_size: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_move_speed: f32,
    /// Degrees per tick.
    pub player_rotate_speed: f32,
    pub player_life: u32,
    /// Life lost per tick per overlapping exploding bomb.
    pub burn_damage: u32,
    /// Life lost per tick per overlapping monster.
    pub crash_damage: u32,

    // ── Bombs ────────────────────────────────────────────────────────────────
    pub bomb_capacity: usize,
    pub bomb_arm_duration: Duration,
    pub bomb_fire_duration: Duration,

    // ── Monsters ─────────────────────────────────────────────────────────────
    pub monster_capacity: usize,
    pub monster_spawn_period: Duration,
    pub monster_spawn_area: Rect,
    pub monster_bounds: Rect,
    pub monster_speed_min: u32,
    pub monster_speed_max: u32,

    // ── Session ──────────────────────────────────────────────────────────────
    pub countdown_secs: u32,
    pub ticks_per_second: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            field_width: 1000.0,
            field_height: 800.0,
            header_height: 100.0,
            sprite_size: 64.0,

            player_move_speed: 3.0,
            player_rotate_speed: 3.0,
            player_life: 300,
            burn_damage: 1,
            crash_damage: 2,

            bomb_capacity: 5,
            bomb_arm_duration: Duration::from_millis(3000),
            bomb_fire_duration: Duration::from_millis(1000),

            monster_capacity: 5,
            monster_spawn_period: Duration::from_millis(2000),
            monster_spawn_area: Rect::new(100.0, 900.0, 250.0, 650.0),
            monster_bounds: Rect::new(50.0, 950.0, 200.0, 700.0),
            monster_speed_min: 1,
            monster_speed_max: 3,

            countdown_secs: 60,
            ticks_per_second: 120,
        }
    }
}

impl Config {
    /// Check that the values describe a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bomb_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { pool: "bomb" });
        }
        if self.monster_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { pool: "monster" });
        }
        for (timer, duration) in [
            ("bomb arm", self.bomb_arm_duration),
            ("bomb fire", self.bomb_fire_duration),
            ("monster spawn", self.monster_spawn_period),
        ] {
            if duration.is_zero() {
                return Err(ConfigError::ZeroDuration { timer });
            }
        }
        if self.countdown_secs == 0 {
            return Err(ConfigError::ZeroDuration { timer: "countdown" });
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.monster_speed_min == 0 || self.monster_speed_min > self.monster_speed_max {
            return Err(ConfigError::EmptySpeedRange {
                min: self.monster_speed_min,
                max: self.monster_speed_max,
            });
        }
        if self.sprite_size <= 0.0
            || self.field_width < self.sprite_size
            || self.field_height < self.header_height + self.sprite_size
        {
            return Err(ConfigError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
                sprite: self.sprite_size,
                header: self.header_height,
            });
        }
        if !self.monster_bounds.contains_strictly(&self.monster_spawn_area) {
            return Err(ConfigError::SpawnAreaOutOfBounds);
        }
        Ok(())
    }

    pub fn half_sprite(&self) -> f32 {
        self.sprite_size / 2.0
    }

    /// The rectangle the player's centre is clamped to: the field minus half a
    /// sprite on every side, and minus the HUD band at the top.
    pub fn player_bounds(&self) -> Rect {
        let half = self.half_sprite();
        Rect::new(
            half,
            self.field_width - half,
            self.header_height + half,
            self.field_height - half,
        )
    }

    pub fn field_center(&self) -> (f32, f32) {
        (self.field_width / 2.0, self.field_height / 2.0)
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}
