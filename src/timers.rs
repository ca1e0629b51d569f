//! Scheduled-event queue.
//!
//! Timers are entries keyed by what they belong to, advanced by simulated
//! time once per tick.  Nothing here runs on its own thread; callers poll
//! `advance` and dispatch the keys it returns.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BombTimer {
    /// Armed → exploding.
    Arm,
    /// Exploding → inactive.
    Fire,
}

/// Identifies a timer by entity kind, slot and timer kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Bomb { slot: usize, timer: BombTimer },
    MonsterSpawn,
    Countdown,
}

#[derive(Clone, Debug)]
struct Pending {
    key: TimerKey,
    due: Duration,
    period: Option<Duration>,
    /// Insertion order, breaks ties between timers due at the same instant.
    seq: u64,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time elapsed since the scheduler was created or cleared.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `key` once, `after` from now.  Replaces any pending timer with the
    /// same key.
    pub fn schedule_once(&mut self, key: TimerKey, after: Duration) {
        self.insert(key, after, None);
    }

    /// Fire `key` every `period`, first one `period` from now.  A zero period
    /// would never let `advance` return, so it is refused.
    pub fn schedule_repeating(&mut self, key: TimerKey, period: Duration) {
        if period.is_zero() {
            log::warn!("refusing zero-period timer {:?}", key);
            return;
        }
        self.insert(key, period, Some(period));
    }

    fn insert(&mut self, key: TimerKey, after: Duration, period: Option<Duration>) {
        self.cancel(&key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            key,
            due: self.now + after,
            period,
            seq,
        });
    }

    /// Returns whether a timer was actually pending.
    pub fn cancel(&mut self, key: &TimerKey) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.key != *key);
        self.pending.len() != before
    }

    pub fn is_pending(&self, key: &TimerKey) -> bool {
        self.pending.iter().any(|p| p.key == *key)
    }

    /// Time left before `key` fires, if it is pending.
    pub fn remaining(&self, key: &TimerKey) -> Option<Duration> {
        self.pending
            .iter()
            .find(|p| p.key == *key)
            .map(|p| p.due.saturating_sub(self.now))
    }

    /// Move time forward by `dt` and return every timer that came due, in
    /// due order.  A repeating timer appears once per elapsed period.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerKey> {
        self.now += dt;
        let mut fired = Vec::new();

        loop {
            let next = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, p)| p.due <= self.now)
                .min_by_key(|(_, p)| (p.due, p.seq))
                .map(|(i, _)| i);
            let Some(index) = next else { break };

            fired.push(self.pending[index].key);
            match self.pending[index].period {
                Some(period) => self.pending[index].due += period,
                None => {
                    let _ = self.pending.swap_remove(index);
                }
            }
        }
        fired
    }

    /// Drop every pending timer and rewind the clock.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.now = Duration::ZERO;
    }
}
