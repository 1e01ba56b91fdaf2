//! Row-exit requests emitted by the strategy.
//!
//! Pulling an item out of its row is a structural change (the destination row
//! may not exist yet), so the strategy never performs it. It describes the
//! request and hands it to a [`RowExitSink`]; the owning coordinator applies
//! it later, outside the per-frame path. Delivery is fire-and-forget.

use std::cell::RefCell;

use flexsort_core::{GridKey, GroupId, VerticalDirection};
use serde::{Deserialize, Serialize};

/// Request to move the dragged item out of its current row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowExitRequest {
    /// Group of the row the item is leaving.
    pub source_group: GroupId,
    /// Key of the dragged item at the time of the request.
    pub element: GridKey,
    /// Position of the source row among all rows.
    pub source_row_index: usize,
    /// Direction the item is leaving in.
    pub direction: VerticalDirection,
}

/// Receiver side of row-exit notifications.
pub trait RowExitSink {
    /// Deliver `request`. Must not block.
    fn notify(&self, request: RowExitRequest);
}

impl RowExitSink for async_channel::Sender<RowExitRequest> {
    fn notify(&self, request: RowExitRequest) {
        if let Err(err) = self.try_send(request) {
            tracing::debug!(
                target: "flexsort.strategy",
                element = %request.element,
                closed = err.is_closed(),
                "row exit request dropped"
            );
        }
    }
}

/// Collects requests in memory, for hosts that poll after each frame.
impl RowExitSink for RefCell<Vec<RowExitRequest>> {
    fn notify(&self, request: RowExitRequest) {
        self.borrow_mut().push(request);
    }
}

/// Unbounded channel for row-exit requests.
#[must_use]
pub fn exit_channel() -> (
    async_channel::Sender<RowExitRequest>,
    async_channel::Receiver<RowExitRequest>,
) {
    async_channel::unbounded()
}
