//! Per-frame input snapshot.

use flexsort_core::{ElementSizes, GridKey, KeyOrder, Point};

/// Everything the strategy sees on one drag frame.
///
/// Borrowed from the host; the strategy never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct DragSnapshot<'a> {
    /// Key of the dragged element.
    pub active_key: GridKey,
    /// Index of the dragged element in `order`.
    pub active_index: usize,
    /// Pointer position in container coordinates.
    pub position: Point,
    /// Current arrangement (also carries the key index).
    pub order: &'a KeyOrder,
    /// Latest measurements.
    pub sizes: &'a ElementSizes,
}

impl<'a> DragSnapshot<'a> {
    pub fn new(
        active_key: GridKey,
        active_index: usize,
        position: Point,
        order: &'a KeyOrder,
        sizes: &'a ElementSizes,
    ) -> Self {
        Self {
            active_key,
            active_index,
            position,
            order,
            sizes,
        }
    }

    /// Whether `active_index` actually points at `active_key`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.order.get(self.active_index) == Some(self.active_key)
    }
}
