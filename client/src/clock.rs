use std::time::Instant;

/// Source of per-frame elapsed time (seconds).
pub trait FrameClock {
    /// Time since the previous call. The first call returns 0.
    fn delta(&mut self) -> f32;
}

/// Wall clock.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for SystemClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let delta = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        delta
    }
}

/// Constant frame time, for headless runs and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClock {
    pub step: f32,
}

impl FixedClock {
    /// `hz` frames per second.
    pub fn from_hz(hz: f32) -> Self {
        Self { step: 1.0 / hz }
    }
}

impl FrameClock for FixedClock {
    #[inline]
    fn delta(&mut self) -> f32 {
        self.step
    }
}
