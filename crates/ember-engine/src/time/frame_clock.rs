use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds elapsed since the previous tick (or reset).
    pub dt: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Monotonic frame clock. Delta time is reported as measured.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a clock whose baseline is `now`.
    pub fn new(now: Instant) -> Self {
        Self { last: now, frame_index: 0 }
    }

    /// Moves the baseline to `now` without producing a frame.
    ///
    /// The next tick measures from here, so time spent suspended is dropped.
    pub fn reset_at(&mut self, now: Instant) {
        self.last = now;
    }

    /// Advances the clock to `now` and returns a new `FrameTime`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f64(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}
