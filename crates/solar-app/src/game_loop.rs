//! Fixed-rate pacing for the body updates.
//!
//! Only used when `simulation.tick_rate_hz` is nonzero. The loop measures wall
//! time between redraws and reports how many fixed steps are due; the caller
//! runs that many updates and then presents one frame.

use std::time::Instant;
use tracing::warn;

/// Longest frame time counted toward the accumulator. A stalled frame costs at
/// most this much simulated catch-up.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct GameLoop {
    previous_time: Instant,
    fixed_dt: f64,
    accumulator: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// A loop stepping `rate_hz` times per second. A zero rate is treated as 1 Hz.
    pub fn new(rate_hz: u32) -> Self {
        Self {
            previous_time: Instant::now(),
            fixed_dt: 1.0 / f64::from(rate_hz.max(1)),
            accumulator: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Measure the time since the previous call and return the number of
    /// fixed steps now due.
    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` seconds of wall time.
    pub(crate) fn advance(&mut self, frame_time: f64) -> u32 {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time.max(0.0)
        };

        self.accumulator += frame_time;
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }

        self.update_count += u64::from(steps);
        self.frame_count += 1;
        steps
    }

    /// Fraction of a step carried over to the next frame, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.fixed_dt
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}
