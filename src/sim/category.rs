//! Particle categories (color groups)
//!
//! One table drives colors, names and per-category bookkeeping so nothing
//! downstream needs a branch per color.

use serde::{Deserialize, Serialize};

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Normalized RGBA for GPU upload
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
            alpha.clamp(0.0, 1.0),
        ]
    }
}

/// Color group a particle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Red,
    Blue,
    Lavender,
    Rose,
    Sage,
}

impl Category {
    pub const COUNT: usize = 5;
    pub const ALL: [Category; Category::COUNT] = [
        Category::Red,
        Category::Blue,
        Category::Lavender,
        Category::Rose,
        Category::Sage,
    ];

    /// Dense index into per-category tables
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn color(self) -> Rgb {
        match self {
            Category::Red => Rgb(220, 140, 140),
            Category::Blue => Rgb(140, 150, 220),
            Category::Lavender => Rgb(180, 160, 220),
            Category::Rose => Rgb(220, 160, 180),
            Category::Sage => Rgb(160, 200, 160),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Red => "Red",
            Category::Blue => "Blue",
            Category::Lavender => "Lavender",
            Category::Rose => "Rose",
            Category::Sage => "Sage",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}
