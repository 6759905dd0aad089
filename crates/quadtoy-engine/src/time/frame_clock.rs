use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Seconds since the clock was created. Monotonically non-decreasing
    /// across frames; this is what animated shaders consume.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the process is
/// paused by a debugger, minimized, or stalls. The elapsed baseline is not
/// clamped; it tracks wall-clock time since clock creation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents animation jumps after long stalls
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min: Duration::from_micros(100), // 0.0001s
            dt_max: Duration::from_millis(250), // 0.25s
        }
    }

    /// Resets the clock baseline, including elapsed time.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last = now;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let mut dt = now.saturating_duration_since(self.last);

        // Clamp delta time to keep downstream systems stable.
        if dt < self.dt_min {
            dt = self.dt_min;
        } else if dt > self.dt_max {
            dt = self.dt_max;
        }

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic_across_ticks() {
        let mut clock = FrameClock::new();
        let mut prev = clock.tick().elapsed;
        for _ in 0..100 {
            let ft = clock.tick();
            assert!(ft.elapsed >= prev);
            prev = ft.elapsed;
        }
    }

    #[test]
    fn frame_index_increments() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn dt_stays_within_clamps() {
        let mut clock = FrameClock::new();
        for _ in 0..10 {
            let ft = clock.tick();
            assert!(ft.dt >= 0.0001);
            assert!(ft.dt <= 0.25);
        }
    }

    #[test]
    fn reset_rebases_elapsed() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(5));
        clock.tick();
        clock.reset();
        let ft = clock.tick();
        assert!(ft.elapsed < 0.005);
    }
}
