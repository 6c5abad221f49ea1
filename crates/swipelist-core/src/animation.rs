#![forbid(unsafe_code)]

//! Animation playback contract.
//!
//! The engine never plays animations itself: it issues requests and waits
//! for the host to report completion. Hosts that have no animation system of
//! their own can drive requests with [`Tween`].
//!
//! # Invariants
//!
//! 1. `value()` is the normalized progress in `[0.0, 1.0]`.
//! 2. Once `is_complete()` returns true, further `tick()` calls are no-ops.
//! 3. A zero-duration tween is complete immediately.

use std::time::Duration;

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation reached its end.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Rewind to the start.
    fn reset(&mut self);
}

/// Linear interpolation between two values over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
}

impl Tween {
    /// Create a tween from `from` to `to` lasting `duration`.
    #[must_use]
    pub const fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Interpolated value at the current progress.
    #[must_use]
    pub fn current(&self) -> f32 {
        self.from + (self.to - self.from) * self.value()
    }

    #[must_use]
    pub const fn start(&self) -> f32 {
        self.from
    }

    #[must_use]
    pub const fn end(&self) -> f32 {
        self.to
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left until completion.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
