//! Per-tick collision and scoring.
//!
//! Runs after everything has moved and before the frame is handed to the
//! renderer.  The three passes run in a fixed order: bomb↔player,
//! bomb↔monster, monster↔player.  A monster killed in the second pass is
//! already dead when the third one looks at it.

use crate::entities::{Position, Session};

/// Axis-aligned box centred on an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub center: Position,
    pub half: f32,
}

impl Footprint {
    pub fn around(center: Position, size: f32) -> Self {
        Footprint {
            center,
            half: size / 2.0,
        }
    }

    /// Strict intersection: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        (self.center.x - other.center.x).abs() < self.half + other.half
            && (self.center.y - other.center.y).abs() < self.half + other.half
    }
}

/// What happened during one resolution pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// Exploding bombs overlapping the player.
    pub burns: u32,
    /// `(bomb slot, monster slot)` for every kill, in resolution order.
    pub kills: Vec<(usize, usize)>,
    /// Live monsters overlapping the player.
    pub crashes: u32,
}

pub fn resolve(session: &mut Session) -> CollisionReport {
    let size = session.config.sprite_size;
    let mut report = CollisionReport::default();
    let player_box = Footprint::around(session.player.pos, size);

    // ── 1. Exploding bombs ↔ player ──────────────────────────────────────────
    for (_, pos) in session.bombs.exploding() {
        if Footprint::around(pos, size).overlaps(&player_box) {
            report.burns += 1;
        }
    }
    session.player.burned = report.burns > 0;
    session.player.life = session
        .player
        .life
        .saturating_sub(report.burns * session.config.burn_damage);

    // ── 2. Exploding bombs ↔ monsters ────────────────────────────────────────
    // First overlapping monster wins; the bomb is spent on it.
    for (bomb_slot, pos) in session.bombs.exploding() {
        let bomb_box = Footprint::around(pos, size);
        let victim = session
            .monsters
            .alive()
            .find(|(_, m)| Footprint::around(m.pos, size).overlaps(&bomb_box))
            .map(|(slot, _)| slot);

        if let Some(monster_slot) = victim {
            let _ = session.monsters.kill(monster_slot);
            let _ = session.bombs.expire(bomb_slot, &mut session.timers);
            session.score += 1;
            report.kills.push((bomb_slot, monster_slot));
        }
    }

    // ── 3. Monsters ↔ player ─────────────────────────────────────────────────
    report.crashes = session
        .monsters
        .alive()
        .filter(|(_, m)| Footprint::around(m.pos, size).overlaps(&player_box))
        .count() as u32;
    session.player.crashed = report.crashes > 0;
    session.player.life = session
        .player
        .life
        .saturating_sub(report.crashes * session.config.crash_damage);

    report
}
