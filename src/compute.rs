//! Game-loop orchestration.
//!
//! `tick` advances a `Session` by one frame: input, timers, kinematics,
//! bomb drops, monster motion, collisions, end-of-game checks.  All
//! randomness comes through the injected RNG and all time through `dt`, so a
//! seeded RNG and fixed `dt` replay exactly.

use std::time::Duration;

use rand::Rng;

use crate::collision::{self, CollisionReport};
use crate::config::Config;
use crate::entities::{Player, Session, SessionFlags};
use crate::error::ConfigError;
use crate::input::TickInput;
use crate::kinematics;
use crate::lifecycle::{BombPool, MonsterPool, SpawnParams};
use crate::timers::{BombTimer, Scheduler, TimerKey};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a session waiting for its first key press.
pub fn init_session(config: Config, high_score: u32) -> Result<Session, ConfigError> {
    config.validate()?;
    Ok(Session {
        player: Player::spawn(&config),
        bombs: BombPool::new(config.bomb_capacity),
        monsters: MonsterPool::new(config.monster_capacity),
        timers: Scheduler::new(),
        score: 0,
        high_score,
        countdown: config.countdown_secs,
        flags: SessionFlags::default(),
        tick: 0,
        config,
    })
}

/// Leave the on-start state and start the session-wide timers.
pub fn start(session: &mut Session) {
    if !session.flags.on_start {
        return;
    }
    session.flags = SessionFlags {
        on_start: false,
        active: true,
        over: false,
    };
    session
        .timers
        .schedule_repeating(TimerKey::MonsterSpawn, session.config.monster_spawn_period);
    session
        .timers
        .schedule_repeating(TimerKey::Countdown, Duration::from_secs(1));
    log::info!("session started, {}s on the clock", session.countdown);
}

/// Back to a fresh on-start session.  Only the high score survives.
pub fn restart(session: &mut Session) {
    let high_score = session.high_score.max(session.score);
    let config = session.config.clone();
    session.player = Player::spawn(&config);
    session.bombs = BombPool::new(config.bomb_capacity);
    session.monsters = MonsterPool::new(config.monster_capacity);
    session.timers.clear();
    session.score = 0;
    session.high_score = high_score;
    session.countdown = config.countdown_secs;
    session.flags = SessionFlags::default();
    session.tick = 0;
    log::info!("session restarted, high score {}", high_score);
}

fn finish(session: &mut Session, reason: &str) {
    session.flags = SessionFlags {
        on_start: false,
        active: false,
        over: true,
    };
    session.timers.clear();
    session.player.turn = Default::default();
    session.player.movement = Default::default();
    log::info!(
        "game over ({}): score {}, high score {}",
        reason,
        session.score,
        session.high_score
    );
}

// ── Timer dispatch ───────────────────────────────────────────────────────────

/// React to one fired timer.  Every transition checks the entity's current
/// state first, so a signal for a slot that has since been reset is ignored.
pub fn dispatch(session: &mut Session, key: TimerKey, rng: &mut impl Rng) {
    match key {
        TimerKey::Bomb { slot, timer: BombTimer::Arm } => {
            let fire = session.config.bomb_fire_duration;
            if !session.bombs.explode(slot, &mut session.timers, fire) {
                log::trace!("stale arm signal for bomb {}", slot);
            }
        }
        TimerKey::Bomb { slot, timer: BombTimer::Fire } => {
            if !session.bombs.expire(slot, &mut session.timers) {
                log::trace!("stale fire signal for bomb {}", slot);
            }
        }
        TimerKey::MonsterSpawn => {
            let params = SpawnParams::random(&session.config, rng);
            if session.monsters.spawn(params).is_none() {
                log::trace!("monster pool full, spawn skipped");
            }
        }
        TimerKey::Countdown => {
            session.countdown = session.countdown.saturating_sub(1);
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the session by one frame of `dt`.  Returns the collision report
/// when the session was active, `None` otherwise.
pub fn tick(
    session: &mut Session,
    input: &TickInput,
    dt: Duration,
    rng: &mut impl Rng,
) -> Option<CollisionReport> {
    // ── 1. Game-flow flags ───────────────────────────────────────────────────
    if session.flags.over {
        if input.restart {
            restart(session);
        }
        return None;
    }
    if session.flags.on_start {
        if !input.start {
            return None;
        }
        start(session);
    }

    session.tick += 1;
    session.player.turn = input.turn;
    session.player.movement = input.movement;

    // ── 2. Timers ────────────────────────────────────────────────────────────
    for key in session.timers.advance(dt) {
        dispatch(session, key, rng);
    }

    // ── 3. Player ────────────────────────────────────────────────────────────
    let bounds = session.config.player_bounds();
    kinematics::step_player(&mut session.player, &bounds);

    if input.drop_bomb {
        let arm = session.config.bomb_arm_duration;
        let _ = session
            .bombs
            .drop_at(session.player.pos, &mut session.timers, arm);
    }

    // ── 4. Monsters ──────────────────────────────────────────────────────────
    let monster_bounds = session.config.monster_bounds;
    session.monsters.step_all(&monster_bounds);

    // ── 5. Collisions & score ────────────────────────────────────────────────
    let report = collision::resolve(session);
    session.high_score = session.high_score.max(session.score);

    // ── 6. End of game ───────────────────────────────────────────────────────
    if session.player.life == 0 {
        finish(session, "out of life");
    } else if session.countdown == 0 {
        finish(session, "time up");
    }

    Some(report)
}
