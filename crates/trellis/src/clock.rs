//! Frame timing.

use std::f64::consts::PI;
use std::thread;
use std::time::{Duration, Instant};

/// Total and per-frame elapsed time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    total: f64,
    frame: f64,
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            total: 0.0,
            frame: 0.0,
            last: Instant::now(),
        }
    }

    /// Seconds since the clock started, as of the last tick.
    pub fn total_time(&self) -> f64 {
        self.total
    }

    /// Duration of the last frame in seconds.
    pub fn frame_time(&self) -> f64 {
        self.frame
    }

    /// Measures the wall time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        self.advance(dt);
    }

    /// Advances by a fixed amount without looking at the wall clock.
    pub fn advance(&mut self, dt: f64) {
        self.frame = dt;
        self.total += dt;
    }

    /// A value going from 0 to 1 and back every `interval` seconds.
    pub fn pulse(&self, interval: f64) -> f32 {
        let interval = if interval > 0.0 { interval } else { 1.0 };
        (self.total * PI / interval).sin().abs() as f32
    }
}

/// Sleeps between frames to hold a target rate.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval: Option<Duration>,
    next: Instant,
}

impl FrameLimiter {
    /// A limiter for `fps` frames per second. Zero means unlimited.
    pub fn new(fps: u32) -> Self {
        let interval = (fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(fps)));
        Self {
            interval,
            next: Instant::now(),
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Blocks until the next frame is due.
    pub fn wait(&mut self) {
        let Some(interval) = self.interval else {
            return;
        };
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += interval;
        } else {
            self.next = now + interval;
        }
    }
}
