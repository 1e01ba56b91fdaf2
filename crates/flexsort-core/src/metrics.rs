//! Layout metrics shared by the host and the reorder strategy.
//!
//! The strategy never measures anything itself; it reproduces the host's
//! layout arithmetic from these constants plus the measured element sizes.
//! Metrics load from JSON with per-field defaults:
//!
//! ```
//! use flexsort_core::GridMetrics;
//!
//! let metrics: GridMetrics = serde_json::from_str(r#"{ "gap": 8.0 }"#).unwrap();
//! assert_eq!(metrics.gap, 8.0);
//! assert_eq!(metrics.marker_width, 36.0);
//! assert!(metrics.validate().is_ok());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default gap between cells and rows.
pub const DEFAULT_GAP: f64 = 12.0;
/// Default container padding on every side.
pub const DEFAULT_PADDING: f64 = DEFAULT_GAP;
/// Default width of the marker column.
pub const DEFAULT_MARKER_WIDTH: f64 = DEFAULT_GAP * 3.0;
/// Default element height.
pub const DEFAULT_ELEMENT_HEIGHT: f64 = 100.0;
/// Default cap on items per row.
pub const DEFAULT_MAX_ITEMS_PER_ROW: usize = 3;

/// Spacing and sizing constants of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMetrics {
    /// Gap between adjacent cells and between rows.
    pub gap: f64,
    /// Container padding (left and top are what the strategy uses).
    pub padding: f64,
    /// Fixed width of the marker column.
    pub marker_width: f64,
    /// Nominal element height.
    pub element_height: f64,
    /// Maximum number of items a row is laid out for.
    pub max_items_per_row: usize,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            padding: DEFAULT_PADDING,
            marker_width: DEFAULT_MARKER_WIDTH,
            element_height: DEFAULT_ELEMENT_HEIGHT,
            max_items_per_row: DEFAULT_MAX_ITEMS_PER_ROW,
        }
    }
}

/// Invalid metrics configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsError {
    InvalidLength { field: &'static str, value: f64 },
    ZeroItemCap,
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { field, value } => {
                write!(f, "metric `{field}` must be finite and non-negative, got {value}")
            }
            Self::ZeroItemCap => write!(f, "metric `max_items_per_row` must be at least 1"),
        }
    }
}

impl std::error::Error for MetricsError {}

/// Non-fatal layout configuration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutDiagnostic {
    NegativeItemCount { count: isize },
    EmptyRow,
    TooManyItems { count: usize, max: usize },
}

impl fmt::Display for LayoutDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeItemCount { count } => {
                write!(f, "a row cannot hold a negative number of items ({count})")
            }
            Self::EmptyRow => write!(f, "a row must hold at least one item"),
            Self::TooManyItems { count, max } => {
                write!(f, "a row cannot hold more than {max} items (got {count})")
            }
        }
    }
}

impl GridMetrics {
    /// Check that every length is usable.
    pub fn validate(&self) -> Result<(), MetricsError> {
        for (field, value) in [
            ("gap", self.gap),
            ("padding", self.padding),
            ("marker_width", self.marker_width),
            ("element_height", self.element_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MetricsError::InvalidLength { field, value });
            }
        }
        if self.max_items_per_row == 0 {
            return Err(MetricsError::ZeroItemCap);
        }
        Ok(())
    }

    /// Diagnose a row item count without failing.
    #[must_use]
    pub fn diagnose_row(&self, item_count: isize) -> Option<LayoutDiagnostic> {
        if item_count < 0 {
            return Some(LayoutDiagnostic::NegativeItemCount { count: item_count });
        }
        let count = item_count.unsigned_abs();
        if count == 0 {
            return Some(LayoutDiagnostic::EmptyRow);
        }
        (count > self.max_items_per_row).then_some(LayoutDiagnostic::TooManyItems {
            count,
            max: self.max_items_per_row,
        })
    }

    /// Width of each item in a row of `item_count` items.
    ///
    /// Invalid counts are reported on the `flexsort.layout` target and the
    /// arithmetic continues best effort (an empty row divides by one).
    #[must_use]
    pub fn item_width(&self, container_width: f64, item_count: isize) -> f64 {
        if let Some(diagnostic) = self.diagnose_row(item_count) {
            tracing::warn!(
                target: "flexsort.layout",
                item_count,
                diagnostic = %diagnostic,
                "invalid row configuration"
            );
        }
        let count = item_count.max(1) as f64;
        (container_width - self.marker_width - self.padding * 2.0 - self.gap * count) / count
    }

    /// X coordinate where the first item of every row starts.
    #[must_use]
    pub fn items_start_x(&self) -> f64 {
        self.padding + self.marker_width + self.gap
    }
}
