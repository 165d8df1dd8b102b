//! Diamonds
//!
//! The collectible objects of the hunt. A diamond is immutable once
//! spawned and leaves the field exactly once, when it is claimed.

use std::fmt;

use crate::core::position::Position;

/// Process-lifetime unique diamond identifier. The first diamond is 1.
pub type DiamondId = u64;

/// A diamond color, as a CSS color string (e.g. `#f00`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    /// Create a color from its CSS representation.
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    /// CSS representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("#fff")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default diamond palette: red, green, blue.
pub fn default_palette() -> Vec<Color> {
    ["#f00", "#0f0", "#08f"].into_iter().map(Color::new).collect()
}

/// An unclaimed diamond on the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diamond {
    /// Unique id
    pub id: DiamondId,
    /// Where it lies on the canvas
    pub position: Position,
    /// Display color
    pub color: Color,
}

impl Diamond {
    /// Create a new diamond.
    pub fn new(id: DiamondId, position: Position, color: Color) -> Self {
        Self { id, position, color }
    }
}
