//! Simulation clock
//!
//! Turns caller-supplied frame timestamps into a delta time and tracks
//! elapsed simulated time. The caller owns the frame cadence; nothing here
//! assumes a fixed frame rate.

/// Elapsed time, pause state and last-seen frame timestamp
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Simulated seconds while running
    elapsed: f64,
    paused: bool,
    /// `None` means the next frame is treated as the first (zero delta)
    last_timestamp: Option<f64>,
    /// Largest delta handed out per frame
    max_dt: f32,
}

impl SimulationClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            elapsed: 0.0,
            paused: false,
            last_timestamp: None,
            max_dt,
        }
    }

    /// Observe a frame timestamp (seconds) and return this frame's delta
    ///
    /// The first frame, a backwards clock and non-finite input all yield 0.
    /// While paused the delta is always 0 and elapsed time does not advance.
    /// Elapsed time follows the measured delta; only the returned physics
    /// delta is capped.
    pub fn tick(&mut self, now: f64) -> f32 {
        let raw = match self.last_timestamp {
            Some(last) => now - last,
            None => 0.0,
        };
        if now.is_finite() {
            self.last_timestamp = Some(now);
        }

        if self.paused || !raw.is_finite() || raw <= 0.0 {
            return 0.0;
        }

        self.elapsed += raw;
        (raw as f32).min(self.max_dt)
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume; the next frame gets a zero delta so the pause is not replayed
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_timestamp = None;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Zero elapsed time, forget the last frame and un-pause
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.paused = false;
        self.last_timestamp = None;
    }
}
