//! Fixed-rate tick pacing and FPS readout.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

/// Number of recent frames averaged for the FPS readout.
const FPS_WINDOW: usize = 30;

/// Longest frame the simulation will accept in one step.  A stall (terminal
/// resize, suspended process) would otherwise fire many timers at once.
pub const MAX_FRAME: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct Clock {
    budget: Duration,
    last: Instant,
    samples: VecDeque<Duration>,
}

impl Clock {
    pub fn new(ticks_per_second: u32) -> Self {
        Clock {
            budget: Duration::from_secs(1) / ticks_per_second.max(1),
            last: Instant::now(),
            samples: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    /// Sleep out the rest of the current frame and return how long the whole
    /// frame took, capped at `MAX_FRAME`.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last.elapsed();
        if elapsed < self.budget {
            thread::sleep(self.budget - elapsed);
        }
        let now = Instant::now();
        let frame = now.duration_since(self.last);
        self.last = now;
        self.record(frame);
        frame.min(MAX_FRAME)
    }

    pub fn record(&mut self, frame: Duration) {
        if self.samples.len() == FPS_WINDOW {
            let _ = self.samples.pop_front();
        }
        self.samples.push_back(frame);
    }

    /// Average frames per second over the recent window, 0 before any frame.
    pub fn fps(&self) -> f32 {
        let total: Duration = self.samples.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.samples.len() as f32 / total.as_secs_f32()
    }
}
