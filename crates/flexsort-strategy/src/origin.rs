//! Rest-position origins of grid elements.
//!
//! The origin is the center an element occupies when it is not being dragged.
//! It is recomputed from the pre-drag arrangement and the measured sizes on
//! every frame, never from the element's rendered (already offset) position,
//! so the drag offset cannot feed back into itself.
//!
//! Layout, left to right: padding, marker column, gap, then the row's items
//! separated by gaps. Top to bottom: padding, then rows separated by gaps.
//! Every function returns `None` when a measurement is missing or the
//! arrangement is inconsistent.

use flexsort_core::topology::{self, owning_marker_index};
use flexsort_core::{GridKey, GridMetrics, KeyOrder, MeasuredSizes, Point};

/// Horizontal rest center of `key` at `index`.
#[must_use]
pub fn origin_x(
    key: GridKey,
    index: usize,
    order: &KeyOrder,
    sizes: &MeasuredSizes<'_>,
    metrics: &GridMetrics,
) -> Option<f64> {
    if order.get(index) != Some(key) {
        return None;
    }
    if key.is_marker() {
        return Some(metrics.padding + metrics.marker_width / 2.0);
    }

    let own_width = sizes.width(&key)?;
    let before = topology::sibling_items(index, order)?.before;
    let siblings_width = before
        .iter()
        .map(|sibling| sizes.width(sibling))
        .sum::<Option<f64>>()?;

    Some(
        metrics.items_start_x()
            + metrics.gap * before.len() as f64
            + siblings_width
            + own_width / 2.0,
    )
}

/// Height sample of the row anchored at `marker_index`.
///
/// All elements of a row share one height; the marker's entry is used, or
/// the first item's when the marker has not been measured.
#[must_use]
pub fn row_height(marker_index: usize, order: &KeyOrder, sizes: &MeasuredSizes<'_>) -> Option<f64> {
    let row = topology::row_of(marker_index, order)?;
    row.iter().find_map(|key| sizes.height(key))
}

/// Vertical rest center of the element at `index`.
#[must_use]
pub fn origin_y(
    index: usize,
    order: &KeyOrder,
    sizes: &MeasuredSizes<'_>,
    metrics: &GridMetrics,
) -> Option<f64> {
    let key = order.get(index)?;
    let own_height = sizes.height(&key)?;
    let row_marker = owning_marker_index(index, order)?;

    let mut rows_above = 0usize;
    let mut heights_above = 0.0;
    for (marker_index, candidate) in order.iter().take(row_marker) {
        if candidate.is_marker() {
            rows_above += 1;
            heights_above += row_height(marker_index, order, sizes)?;
        }
    }

    // Assumes every element in a row is the same height.
    Some(metrics.padding + metrics.gap * rows_above as f64 + heights_above + own_height / 2.0)
}

/// Rest center of `key` at `index`.
#[must_use]
pub fn rest_origin(
    key: GridKey,
    index: usize,
    order: &KeyOrder,
    sizes: &MeasuredSizes<'_>,
    metrics: &GridMetrics,
) -> Option<Point> {
    Some(Point::new(
        origin_x(key, index, order, sizes, metrics)?,
        origin_y(index, order, sizes, metrics)?,
    ))
}
