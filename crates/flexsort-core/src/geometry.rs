#![forbid(unsafe_code)]

//! Geometric primitives in container coordinates.
//!
//! Coordinates are logical pixels with the origin at the container's top-left
//! corner, `x` growing right and `y` growing down.

use serde::{Deserialize, Serialize};

/// A point in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `origin` to `self`.
    #[inline]
    pub fn offset_from(self, origin: Point) -> Offset {
        Offset::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Displacement of a dragged element from its rest origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Horizontal direction of travel. Zero counts as rightward.
    #[inline]
    pub fn horizontal(self) -> HorizontalDirection {
        if self.dx >= 0.0 {
            HorizontalDirection::Right
        } else {
            HorizontalDirection::Left
        }
    }

    /// Vertical direction of travel. Zero counts as downward.
    #[inline]
    pub fn vertical(self) -> VerticalDirection {
        if self.dy >= 0.0 {
            VerticalDirection::Down
        } else {
            VerticalDirection::Up
        }
    }
}

/// Horizontal travel direction within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalDirection {
    Left,
    Right,
}

impl HorizontalDirection {
    /// Step `index` one position in this direction, if it stays non-negative.
    #[inline]
    pub const fn step(self, index: usize) -> Option<usize> {
        match self {
            Self::Left => index.checked_sub(1),
            Self::Right => index.checked_add(1),
        }
    }
}

/// Vertical travel direction across rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalDirection {
    Up,
    Down,
}

impl VerticalDirection {
    /// Step `index` one position in this direction, if it stays non-negative.
    #[inline]
    pub const fn step(self, index: usize) -> Option<usize> {
        match self {
            Self::Up => index.checked_sub(1),
            Self::Down => index.checked_add(1),
        }
    }
}
