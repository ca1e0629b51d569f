//! Bomb and monster pools.
//!
//! Both pools grow until they reach capacity and then recycle slots in
//! place.  Slot indices are handed out by the pools themselves, so every
//! index they see is in range; lookups of foreign indices go through `get`
//! and simply miss.  Redundant transitions return `false` and change nothing.

use std::time::Duration;

use rand::Rng;

use crate::config::{Config, Rect};
use crate::entities::{Axis, Bomb, BombState, Direction, Monster, MonsterState, Position};
use crate::timers::{BombTimer, Scheduler, TimerKey};

fn arm_key(slot: usize) -> TimerKey {
    TimerKey::Bomb { slot, timer: BombTimer::Arm }
}

fn fire_key(slot: usize) -> TimerKey {
    TimerKey::Bomb { slot, timer: BombTimer::Fire }
}

// ── Bombs ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct BombPool {
    slots: Vec<Bomb>,
    capacity: usize,
    /// Round-robin target for the next drop.
    cursor: usize,
}

impl BombPool {
    pub fn new(capacity: usize) -> Self {
        BombPool {
            slots: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, slot: usize) -> Option<&Bomb> {
        self.slots.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Bomb)> {
        self.slots.iter().enumerate()
    }

    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|b| b.state != BombState::Inactive)
            .count()
    }

    /// How many more bombs could be on the field right now.
    pub fn remaining(&self) -> usize {
        self.capacity - self.active_count()
    }

    pub fn is_saturated(&self) -> bool {
        self.remaining() == 0
    }

    /// Slots and positions of every exploding bomb.
    pub fn exploding(&self) -> Vec<(usize, Position)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, b)| b.state == BombState::Exploding)
            .filter_map(|(slot, b)| b.pos.map(|pos| (slot, pos)))
            .collect()
    }

    /// Drop a bomb at `pos` into the slot under the cursor and start its arm
    /// timer.  Returns the slot used, or `None` when that slot is still busy;
    /// the cursor then stays put so the player has to wait for it.
    pub fn drop_at(&mut self, pos: Position, timers: &mut Scheduler, arm: Duration) -> Option<usize> {
        if self.cursor >= self.capacity {
            self.cursor = 0;
        }

        let slot = if self.slots.len() < self.capacity {
            self.slots.push(Bomb::default());
            self.slots.len() - 1
        } else if self.slots[self.cursor].state == BombState::Inactive {
            self.cursor
        } else {
            log::trace!("bomb slot {} busy, drop ignored", self.cursor);
            return None;
        };

        self.reset(slot, pos, timers);
        timers.schedule_once(arm_key(slot), arm);
        self.cursor = slot + 1;
        log::debug!("bomb {} dropped at ({:.0}, {:.0})", slot, pos.x, pos.y);
        Some(slot)
    }

    /// Put a freshly armed bomb at `pos` into `slot`, clearing anything the
    /// previous occupant left behind.
    fn reset(&mut self, slot: usize, pos: Position, timers: &mut Scheduler) {
        let _ = timers.cancel(&arm_key(slot));
        let _ = timers.cancel(&fire_key(slot));
        self.slots[slot] = Bomb {
            state: BombState::Armed,
            pos: Some(pos),
        };
    }

    /// Armed → exploding, starting the fire timer.
    pub fn explode(&mut self, slot: usize, timers: &mut Scheduler, fire: Duration) -> bool {
        match self.slots.get_mut(slot) {
            Some(bomb) if bomb.state == BombState::Armed => {
                bomb.state = BombState::Exploding;
                let _ = timers.cancel(&arm_key(slot));
                timers.schedule_once(fire_key(slot), fire);
                log::debug!("bomb {} exploding", slot);
                true
            }
            _ => false,
        }
    }

    /// Any active state → inactive.  Both timers are cancelled so a stale
    /// signal cannot touch the slot after it is reused.
    pub fn expire(&mut self, slot: usize, timers: &mut Scheduler) -> bool {
        match self.slots.get_mut(slot) {
            Some(bomb) if bomb.state != BombState::Inactive => {
                *bomb = Bomb::default();
                let _ = timers.cancel(&arm_key(slot));
                let _ = timers.cancel(&fire_key(slot));
                log::debug!("bomb {} expired", slot);
                true
            }
            _ => false,
        }
    }
}

// ── Monsters ──────────────────────────────────────────────────────────────────

/// Everything that varies between two spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnParams {
    pub pos: Position,
    pub speed: u32,
    pub axis: Axis,
    pub direction: Direction,
}

impl SpawnParams {
    /// Uniformly random spawn inside the configured spawn area.
    pub fn random(config: &Config, rng: &mut impl Rng) -> Self {
        let area = &config.monster_spawn_area;
        SpawnParams {
            pos: Position::new(
                rng.gen_range(area.min_x..=area.max_x),
                rng.gen_range(area.min_y..=area.max_y),
            ),
            speed: rng.gen_range(config.monster_speed_min..=config.monster_speed_max),
            axis: if rng.gen_bool(0.5) { Axis::Horizontal } else { Axis::Vertical },
            direction: if rng.gen_bool(0.5) { Direction::Positive } else { Direction::Negative },
        }
    }
}

impl From<SpawnParams> for Monster {
    fn from(params: SpawnParams) -> Self {
        Monster {
            state: MonsterState::Alive,
            pos: params.pos,
            axis: params.axis,
            direction: params.direction,
            speed: params.speed,
        }
    }
}

/// Move one monster a tick along its axis, bouncing off `bounds`.
pub fn step_monster(monster: &mut Monster, bounds: &Rect) {
    if monster.state != MonsterState::Alive {
        return;
    }
    let delta = monster.speed as f32 * monster.direction.sign();
    match monster.axis {
        Axis::Horizontal => monster.pos.x += delta,
        Axis::Vertical => monster.pos.y += delta,
    }

    let p = monster.pos;
    if p.x <= bounds.min_x || p.x >= bounds.max_x || p.y <= bounds.min_y || p.y >= bounds.max_y {
        monster.direction = monster.direction.flipped();
    }
}

#[derive(Clone, Debug)]
pub struct MonsterPool {
    slots: Vec<Monster>,
    capacity: usize,
    cursor: usize,
}

impl MonsterPool {
    pub fn new(capacity: usize) -> Self {
        MonsterPool {
            slots: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, slot: usize) -> Option<&Monster> {
        self.slots.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Monster)> {
        self.slots.iter().enumerate()
    }

    pub fn alive(&self) -> impl Iterator<Item = (usize, &Monster)> {
        self.iter().filter(|(_, m)| m.state == MonsterState::Alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Bring a monster to life.  Appends while below capacity, otherwise
    /// reuses the first dead slot at or after the cursor.  Returns `None`
    /// when every slot is occupied by a live monster.
    pub fn spawn(&mut self, params: SpawnParams) -> Option<usize> {
        let slot = if self.slots.len() < self.capacity {
            self.slots.push(Monster::from(params));
            self.slots.len() - 1
        } else {
            let len = self.slots.len();
            let slot = (0..len)
                .map(|offset| (self.cursor + offset) % len)
                .find(|&i| self.slots[i].state == MonsterState::Dead)?;
            self.reset(slot, params);
            slot
        };
        self.cursor = (slot + 1) % self.capacity;
        log::debug!(
            "monster {} spawned at ({:.0}, {:.0}) moving {:?} {:?} at {}",
            slot,
            params.pos.x,
            params.pos.y,
            params.axis,
            params.direction,
            params.speed
        );
        Some(slot)
    }

    /// Replace the monster in `slot` in place.
    pub fn reset(&mut self, slot: usize, params: SpawnParams) {
        if let Some(monster) = self.slots.get_mut(slot) {
            *monster = Monster::from(params);
        }
    }

    pub fn kill(&mut self, slot: usize) -> bool {
        match self.slots.get_mut(slot) {
            Some(monster) if monster.state == MonsterState::Alive => {
                monster.state = MonsterState::Dead;
                log::debug!("monster {} killed", slot);
                true
            }
            _ => false,
        }
    }

    pub fn step_all(&mut self, bounds: &Rect) {
        for monster in &mut self.slots {
            step_monster(monster, bounds);
        }
    }
}
