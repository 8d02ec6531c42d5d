use std::time::Instant;

/// Wall clock that hands out one sampling time per frame.
///
/// Every clip in a mixer must be sampled at the same instant, so the frame's
/// time is latched by [`tick`](Self::tick) and re-read with
/// [`now`](Self::now) instead of querying the OS clock per clip.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    now: f64,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Creates a clock whose time 0 is the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            now: 0.0,
            frame_count: 0,
        }
    }

    /// Latches the current frame's time and returns it in seconds since
    /// creation. Never goes backwards.
    pub fn tick(&mut self) -> f64 {
        self.now = self.now.max(self.origin.elapsed().as_secs_f64());
        self.frame_count += 1;
        self.now
    }

    /// Time latched by the last [`tick`](Self::tick), `0.0` before the first.
    #[inline]
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of ticks so far.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
