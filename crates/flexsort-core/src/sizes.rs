//! Measured element sizes supplied by the host.
//!
//! Measurements arrive asynchronously from the host's layout pass. Until each
//! dimension is reported per key, the strategy treats the grid as not ready
//! and leaves the order untouched.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::key::GridKey;

/// One measured dimension (width or height) across all elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Nothing measured yet.
    #[default]
    Unmeasured,
    /// A single scalar for every element; not usable for per-key math.
    Uniform(f64),
    /// Per-key measurement.
    PerKey(FxHashMap<GridKey, f64>),
}

impl Dimension {
    #[must_use]
    pub fn per_key(&self) -> Option<&FxHashMap<GridKey, f64>> {
        match self {
            Self::PerKey(map) => Some(map),
            Self::Unmeasured | Self::Uniform(_) => None,
        }
    }
}

impl FromIterator<(GridKey, f64)> for Dimension {
    fn from_iter<T: IntoIterator<Item = (GridKey, f64)>>(iter: T) -> Self {
        Self::PerKey(iter.into_iter().collect())
    }
}

/// Width and height measurements for the grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementSizes {
    pub widths: Dimension,
    pub heights: Dimension,
}

impl ElementSizes {
    #[must_use]
    pub fn new(widths: Dimension, heights: Dimension) -> Self {
        Self { widths, heights }
    }

    /// Borrow per-key maps for both dimensions, or `None` if not ready.
    #[must_use]
    pub fn measured(&self) -> Option<MeasuredSizes<'_>> {
        Some(MeasuredSizes {
            widths: self.widths.per_key()?,
            heights: self.heights.per_key()?,
        })
    }

    /// Record one element's size, switching both dimensions to per-key form.
    pub fn insert(&mut self, key: GridKey, width: f64, height: f64) {
        for (dimension, value) in [(&mut self.widths, width), (&mut self.heights, height)] {
            if dimension.per_key().is_none() {
                *dimension = Dimension::PerKey(FxHashMap::default());
            }
            if let Dimension::PerKey(map) = dimension {
                map.insert(key, value);
            }
        }
    }
}

/// Per-key measurements, borrowed from [`ElementSizes`].
#[derive(Debug, Clone, Copy)]
pub struct MeasuredSizes<'a> {
    widths: &'a FxHashMap<GridKey, f64>,
    heights: &'a FxHashMap<GridKey, f64>,
}

impl MeasuredSizes<'_> {
    #[must_use]
    pub fn width(&self, key: &GridKey) -> Option<f64> {
        self.widths.get(key).copied()
    }

    #[must_use]
    pub fn height(&self, key: &GridKey) -> Option<f64> {
        self.heights.get(key).copied()
    }
}
