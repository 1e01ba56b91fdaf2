//! Per-frame swap decisions.
//!
//! Rules are evaluated in a fixed priority order for the dragged key:
//!
//! 1. **Item swap** (items): the offset along x passes `gap + width` of the
//!    nearest same-row sibling in the direction of travel.
//! 2. **Row exit** (items, when 1 did not fire): the offset along y passes
//!    half of the dragged item's own height and a row exists in that
//!    direction.
//! 3. **Row swap** (markers): the offset along y passes `gap + height` of the
//!    neighbouring row in the direction of travel.
//!
//! Swap thresholds use the neighbour's size, so a swap happens once the
//! dragged element's edge crosses the neighbour's far edge. The exit
//! threshold uses the dragged item's own height because exiting does not
//! swap anything in place.

use flexsort_core::topology::{self, Siblings, owning_marker_index};
use flexsort_core::{
    GridKey, GridMetrics, HorizontalDirection, KeyOrder, MeasuredSizes, Offset, VerticalDirection,
};
use serde::Serialize;

use crate::origin::row_height;

/// Outcome of one decision pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "direction", rename_all = "snake_case")]
pub enum Decision {
    /// Keep the current order.
    #[default]
    NoChange,
    /// Exchange the dragged item with its neighbour in this direction.
    SwapItem(HorizontalDirection),
    /// Ask the host to move the dragged item out of its row.
    ExitRow(VerticalDirection),
    /// Exchange the dragged row with the neighbouring row.
    SwapRow(VerticalDirection),
}

impl Decision {
    /// Whether this decision reorders the key sequence in place.
    #[must_use]
    pub const fn reorders(self) -> bool {
        matches!(self, Self::SwapItem(_) | Self::SwapRow(_))
    }
}

/// Distance the dragged item must travel to pass a horizontal neighbour.
#[must_use]
pub fn item_swap_threshold(neighbour_width: f64, metrics: &GridMetrics) -> f64 {
    metrics.gap + neighbour_width
}

/// Distance the dragged item must travel vertically to leave its row.
#[must_use]
pub fn row_exit_threshold(active_height: f64) -> f64 {
    active_height / 2.0
}

/// Distance the dragged marker must travel to pass a neighbouring row.
#[must_use]
pub fn row_swap_threshold(neighbour_row_height: f64, metrics: &GridMetrics) -> f64 {
    metrics.gap + neighbour_row_height
}

pub(crate) fn nearest_horizontal(siblings: &Siblings, direction: HorizontalDirection) -> Option<GridKey> {
    match direction {
        HorizontalDirection::Left => siblings.nearest_before(),
        HorizontalDirection::Right => siblings.nearest_after(),
    }
}

pub(crate) fn nearest_vertical(siblings: &Siblings, direction: VerticalDirection) -> Option<GridKey> {
    match direction {
        VerticalDirection::Up => siblings.nearest_before(),
        VerticalDirection::Down => siblings.nearest_after(),
    }
}

/// Decide what the frame should do.
///
/// Returns `None` when a measurement the decision depends on is missing or
/// the arrangement is inconsistent; callers keep the order unchanged.
#[must_use]
pub fn decide(
    key: GridKey,
    index: usize,
    offset: Offset,
    order: &KeyOrder,
    sizes: &MeasuredSizes<'_>,
    metrics: &GridMetrics,
) -> Option<Decision> {
    if order.get(index) != Some(key) {
        return None;
    }
    if key.is_item() {
        decide_item(key, index, offset, order, sizes, metrics)
    } else {
        decide_marker(index, offset, order, sizes, metrics)
    }
}

fn decide_item(
    key: GridKey,
    index: usize,
    offset: Offset,
    order: &KeyOrder,
    sizes: &MeasuredSizes<'_>,
    metrics: &GridMetrics,
) -> Option<Decision> {
    let horizontal = offset.horizontal();
    let siblings = topology::sibling_items(index, order)?;
    if let Some(neighbour) = nearest_horizontal(&siblings, horizontal) {
        let threshold = item_swap_threshold(sizes.width(&neighbour)?, metrics);
        if offset.dx.abs() > threshold {
            return Some(Decision::SwapItem(horizontal));
        }
    }

    let vertical = offset.vertical();
    let Some(row_marker) = owning_marker_index(index, order) else {
        tracing::debug!(
            target: "flexsort.strategy",
            key = %key,
            "item has no row marker; refusing row exit"
        );
        return Some(Decision::NoChange);
    };
    let rows = topology::sibling_markers(row_marker, order)?;
    if nearest_vertical(&rows, vertical).is_some()
        && offset.dy.abs() > row_exit_threshold(sizes.height(&key)?)
    {
        return Some(Decision::ExitRow(vertical));
    }

    Some(Decision::NoChange)
}

fn decide_marker(
    index: usize,
    offset: Offset,
    order: &KeyOrder,
    sizes: &MeasuredSizes<'_>,
    metrics: &GridMetrics,
) -> Option<Decision> {
    let vertical = offset.vertical();
    let rows = topology::sibling_markers(index, order)?;
    let Some(neighbour) = nearest_vertical(&rows, vertical) else {
        return Some(Decision::NoChange);
    };
    let neighbour_index = order.index_of(&neighbour)?;
    let threshold = row_swap_threshold(row_height(neighbour_index, order, sizes)?, metrics);
    if offset.dy.abs() > threshold {
        return Some(Decision::SwapRow(vertical));
    }
    Some(Decision::NoChange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexsort_core::{ElementSizes, GroupId, ItemId};

    fn marker(group: u32) -> GridKey {
        GridKey::marker(GroupId::new(group))
    }

    fn item(group: u32, item: u32) -> GridKey {
        GridKey::item(GroupId::new(group), ItemId::new(item))
    }

    fn grid() -> (KeyOrder, ElementSizes) {
        let keys = vec![
            marker(1),
            item(1, 1),
            item(1, 2),
            item(1, 3),
            marker(2),
            item(2, 4),
        ];
        let mut sizes = ElementSizes::default();
        for key in &keys {
            let width = if key.is_marker() { 36.0 } else { 100.0 };
            sizes.insert(*key, width, 100.0);
        }
        (KeyOrder::new(keys).expect("unique keys"), sizes)
    }

    fn run(key: GridKey, offset: Offset) -> Option<Decision> {
        let (order, sizes) = grid();
        let measured = sizes.measured().expect("measured");
        let index = order.index_of(&key).expect("key present");
        decide(key, index, offset, &order, &measured, &GridMetrics::default())
    }

    #[test]
    fn only_swaps_reorder_in_place() {
        assert!(Decision::SwapItem(HorizontalDirection::Left).reorders());
        assert!(Decision::SwapRow(VerticalDirection::Down).reorders());
        assert!(!Decision::ExitRow(VerticalDirection::Up).reorders());
        assert!(!Decision::NoChange.reorders());
    }

    #[test]
    fn thresholds_use_neighbour_size() {
        let metrics = GridMetrics::default();
        assert_eq!(item_swap_threshold(100.0, &metrics), 112.0);
        assert_eq!(row_swap_threshold(80.0, &metrics), 92.0);
        assert_eq!(row_exit_threshold(100.0), 50.0);
    }

    #[test]
    fn item_swaps_only_past_threshold() {
        assert_eq!(run(item(1, 2), Offset::new(112.0, 0.0)), Some(Decision::NoChange));
        assert_eq!(
            run(item(1, 2), Offset::new(112.5, 0.0)),
            Some(Decision::SwapItem(HorizontalDirection::Right))
        );
        assert_eq!(
            run(item(1, 2), Offset::new(-113.0, 0.0)),
            Some(Decision::SwapItem(HorizontalDirection::Left))
        );
    }

    #[test]
    fn edge_item_never_swaps_outward() {
        assert_eq!(run(item(1, 1), Offset::new(-5_000.0, 0.0)), Some(Decision::NoChange));
        assert_eq!(run(item(1, 3), Offset::new(5_000.0, 0.0)), Some(Decision::NoChange));
    }

    #[test]
    fn horizontal_swap_wins_over_exit() {
        assert_eq!(
            run(item(1, 2), Offset::new(200.0, 200.0)),
            Some(Decision::SwapItem(HorizontalDirection::Right))
        );
    }

    #[test]
    fn exit_needs_adjacent_row() {
        assert_eq!(
            run(item(1, 2), Offset::new(0.0, 51.0)),
            Some(Decision::ExitRow(VerticalDirection::Down))
        );
        assert_eq!(run(item(1, 2), Offset::new(0.0, -51.0)), Some(Decision::NoChange));
        assert_eq!(
            run(item(2, 4), Offset::new(0.0, -60.0)),
            Some(Decision::ExitRow(VerticalDirection::Up))
        );
    }

    #[test]
    fn marker_swaps_rows() {
        assert_eq!(
            run(marker(1), Offset::new(0.0, 113.0)),
            Some(Decision::SwapRow(VerticalDirection::Down))
        );
        assert_eq!(run(marker(1), Offset::new(0.0, -500.0)), Some(Decision::NoChange));
        assert_eq!(run(marker(2), Offset::new(900.0, 0.0)), Some(Decision::NoChange));
    }

    #[test]
    fn inconsistent_index_is_refused() {
        let (order, sizes) = grid();
        let measured = sizes.measured().expect("measured");
        let decision = decide(
            item(1, 1),
            3,
            Offset::new(500.0, 0.0),
            &order,
            &measured,
            &GridMetrics::default(),
        );
        assert_eq!(decision, None);
    }

    #[test]
    fn decision_serializes_with_direction() {
        let json = serde_json::to_string(&Decision::SwapRow(VerticalDirection::Up)).expect("json");
        assert_eq!(json, r#"{"kind":"swap_row","direction":"up"}"#);
        assert_eq!(
            serde_json::to_string(&Decision::NoChange).expect("json"),
            r#"{"kind":"no_change"}"#
        );
    }
}
