//! Movement input and the key-mashing speed boost

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Map a browser `KeyboardEvent.key` name (WASD or arrows)
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Key::Up),
            "s" | "arrowdown" => Some(Key::Down),
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Input for a single frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Movement key presses since the previous frame (feeds the speed boost)
    pub presses: u32,
}

impl TickInput {
    pub fn set_key(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
        }
    }

    /// Unnormalized movement direction (screen space, +y down)
    ///
    /// Each held key contributes a full step, so diagonals move faster.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Speed multiplier for `count` presses in the boost window
///
/// Linear from 1x to 2x over the first 20 presses, then +0.05 per press
/// with no upper bound.
pub fn speed_multiplier(count: usize) -> f32 {
    if count <= 20 {
        1.0 + count as f32 / 20.0
    } else {
        2.0 + (count - 20) as f32 * 0.05
    }
}

/// Recent movement key presses (oldest first)
#[derive(Debug, Clone, Default)]
pub struct SpeedBoost {
    presses: VecDeque<f64>,
    window_secs: f64,
}

impl SpeedBoost {
    pub fn new(window_secs: f64) -> Self {
        Self {
            presses: VecDeque::new(),
            window_secs,
        }
    }

    pub fn record(&mut self, now: f64) {
        self.presses.push_back(now);
    }

    /// Drop presses older than the window
    pub fn prune(&mut self, now: f64) {
        let cutoff = now - self.window_secs;
        while self.presses.front().is_some_and(|&t| t < cutoff) {
            self.presses.pop_front();
        }
    }

    pub fn count(&self) -> usize {
        self.presses.len()
    }

    /// Prune, then compute the current multiplier
    pub fn multiplier(&mut self, now: f64) -> f32 {
        self.prune(now);
        speed_multiplier(self.count())
    }

    pub fn clear(&mut self) {
        self.presses.clear();
    }
}
