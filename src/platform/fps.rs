//! Frames-per-second measurement
//!
//! Counts frames between refreshes and recomputes the rate every
//! `interval` seconds, so the readout does not flicker every frame.

/// Frame-rate counter driven by caller timestamps (seconds)
#[derive(Debug, Clone)]
pub struct FpsCounter {
    fps: u32,
    frames: u32,
    last_update: Option<f64>,
    interval: f64,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl FpsCounter {
    pub fn new(interval: f64) -> Self {
        Self {
            fps: 0,
            frames: 0,
            last_update: None,
            interval,
        }
    }

    /// Record a frame at `now`; returns the new rate when it was refreshed
    pub fn frame(&mut self, now: f64) -> Option<u32> {
        let Some(last) = self.last_update else {
            self.last_update = Some(now);
            return None;
        };

        self.frames += 1;
        let since = now - last;
        if since >= self.interval && since > 0.0 {
            self.fps = (self.frames as f64 / since).round() as u32;
            self.frames = 0;
            self.last_update = Some(now);
            return Some(self.fps);
        }
        None
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
