//! Applies row-exit requests to the row model.
//!
//! The coordinator is the only writer of the [`GridModel`]. Drag frames send
//! [`RowExitRequest`]s through [`GridCoordinator::sender`]; the host calls
//! [`GridCoordinator::drain`] when it is idle, then rebases any live
//! [`DragSession`](crate::DragSession) on [`GridCoordinator::order`].
//!
//! Exit placement:
//!
//! - The adjacent row in the exit direction receives the item at its end when
//!   it holds fewer than `max_items_per_row` items.
//! - Otherwise (adjacent row full or missing) a new row is inserted next to
//!   the source, above it for `Up` and below it for `Down`, with the source
//!   row's label.
//! - A source row left without items is removed.
//! - A lone item with nowhere to go stays put: a new row holding only it,
//!   next to its now-empty source, is the same layout under a fresh group id.
//!
//! Requests are resolved against the current model, not the frame they were
//! produced in. A request whose item has already left the source group is
//! stale and changes nothing.

use async_channel::{Receiver, Sender, TryRecvError};
use flexsort_core::{
    GridKey, GridMetrics, GridModel, GridModelError, GroupId, KeyOrder, VerticalDirection,
};
use flexsort_strategy::{RowExitRequest, exit_channel};
use serde::Serialize;

/// Result of applying one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExitOutcome {
    /// The item now lives in `target` under key `element`.
    Moved {
        element: GridKey,
        source: GroupId,
        target: GroupId,
        created_row: bool,
        removed_source: bool,
    },
    /// Nothing matched the request.
    Stale { request: RowExitRequest },
    /// The request matched but moving would not change the layout.
    Unchanged { request: RowExitRequest },
}

impl ExitOutcome {
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }
}

/// Owner of the row model and the receiving end of the exit channel.
#[derive(Debug)]
pub struct GridCoordinator {
    model: GridModel,
    metrics: GridMetrics,
    sender: Sender<RowExitRequest>,
    receiver: Receiver<RowExitRequest>,
}

impl GridCoordinator {
    #[must_use]
    pub fn new(model: GridModel, metrics: GridMetrics) -> Self {
        let (sender, receiver) = exit_channel();
        Self {
            model,
            metrics,
            sender,
            receiver,
        }
    }

    #[must_use]
    pub fn model(&self) -> &GridModel {
        &self.model
    }

    #[must_use]
    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Sending half for drag sessions; clones share one queue.
    #[must_use]
    pub fn sender(&self) -> Sender<RowExitRequest> {
        self.sender.clone()
    }

    /// Requests waiting to be applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Current flat arrangement of the model.
    #[must_use]
    pub fn order(&self) -> KeyOrder {
        self.model.to_order()
    }

    /// Fold an order produced by in-place swaps back into the model.
    pub fn commit_order(&mut self, order: &KeyOrder) -> Result<(), GridModelError> {
        self.model.apply_order(order)?;
        tracing::debug!(
            target: "flexsort.coordinator",
            rows = self.model.rows().len(),
            "order committed"
        );
        Ok(())
    }

    /// Apply every queued request in arrival order.
    pub fn drain(&mut self) -> Result<Vec<ExitOutcome>, GridModelError> {
        let mut outcomes = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(request) => outcomes.push(self.apply_row_exit(request)?),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        Ok(outcomes)
    }

    /// Drop queued requests without applying them. Returns how many were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let mut dropped = 0;
        while self.receiver.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            tracing::debug!(target: "flexsort.coordinator", dropped, "pending exits discarded");
        }
        dropped
    }

    /// Move the requested item out of its row.
    pub fn apply_row_exit(&mut self, request: RowExitRequest) -> Result<ExitOutcome, GridModelError> {
        let stale = ExitOutcome::Stale { request };
        let Some(item_id) = request.element.item_id() else {
            tracing::warn!(
                target: "flexsort.coordinator",
                element = %request.element,
                "row exit requested for a marker"
            );
            return Ok(stale);
        };
        let Some((source, _)) = self
            .model
            .locate_item(item_id)
            .filter(|(group, _)| *group == request.source_group)
        else {
            tracing::debug!(
                target: "flexsort.coordinator",
                element = %request.element,
                "stale row exit"
            );
            return Ok(stale);
        };
        let Some(source_index) = self.model.row_index(source) else {
            return Ok(stale);
        };
        if source_index != request.source_row_index {
            tracing::debug!(
                target: "flexsort.coordinator",
                requested = request.source_row_index,
                current = source_index,
                "source row moved since request"
            );
        }

        let adjacent = request
            .direction
            .step(source_index)
            .and_then(|index| self.model.rows().get(index))
            .filter(|row| row.items.len() < self.metrics.max_items_per_row)
            .map(|row| row.id);
        let (target, created_row) = match adjacent {
            Some(target) => (target, false),
            None if self.model.row(source).is_some_and(|row| row.items.len() == 1) => {
                tracing::debug!(
                    target: "flexsort.coordinator",
                    element = %request.element,
                    "lone item has no row to join"
                );
                return Ok(ExitOutcome::Unchanged { request });
            }
            None => {
                let insert_at = match request.direction {
                    VerticalDirection::Up => source_index,
                    VerticalDirection::Down => source_index + 1,
                };
                let label = self
                    .model
                    .row(source)
                    .map(|row| row.label.clone())
                    .unwrap_or_default();
                (self.model.insert_row(insert_at, label)?, true)
            }
        };

        let item = self.model.take_item(source, item_id)?;
        self.model.push_item(target, item)?;
        let removed_source = self.model.remove_if_empty(source);

        tracing::info!(
            target: "flexsort.coordinator",
            item = %item_id,
            source = %source,
            target_group = %target,
            created_row,
            removed_source,
            "item moved between rows"
        );
        Ok(ExitOutcome::Moved {
            element: GridKey::item(target, item_id),
            source,
            target,
            created_row,
            removed_source,
        })
    }
}
