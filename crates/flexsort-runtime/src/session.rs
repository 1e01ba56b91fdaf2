//! Drag-gesture lifecycle.
//!
//! A [`DragSession`] is created when a drag begins, updated once per pointer
//! frame, and consumed when the drag ends or is cancelled. Frames are
//! strictly serialized: `update` takes `&mut self`.
//!
//! # Invariants
//!
//! 1. `order()[active_index()] == active_key()` after every call.
//! 2. A row-exit request is sent at most once until the session is rebased
//!    on the order the coordinator rebuilt.
//! 3. `cancel()` returns the order the gesture started from.

use std::fmt;

use flexsort_core::{ElementSizes, GridKey, KeyOrder, Offset, Point};
use flexsort_strategy::{
    Decision, DragSnapshot, GridReorderStrategy, RowExitRequest, RowExitSink, SortStrategy,
};
use serde::Serialize;

/// Errors starting or rebasing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    UnknownKey { key: GridKey },
    ActiveElementMissing { key: GridKey },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey { key } => write!(f, "cannot drag {key}: not in the current order"),
            Self::ActiveElementMissing { key } => {
                write!(f, "dragged element {key} is missing from the rebuilt order")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Summary of one frame, for hosts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub active_key: GridKey,
    pub active_index: usize,
    pub decision: Decision,
    pub offset: Option<Offset>,
    pub reordered: bool,
    pub exit_sent: bool,
}

/// Host-owned state of one drag gesture.
#[derive(Debug, Clone)]
pub struct DragSession<S = GridReorderStrategy> {
    strategy: S,
    initial_order: KeyOrder,
    order: KeyOrder,
    active_key: GridKey,
    active_index: usize,
    pending_exit: Option<RowExitRequest>,
    last_offset: Option<Offset>,
    frames: u64,
}

impl<S: SortStrategy> DragSession<S> {
    /// Start dragging `key` within `order`.
    pub fn begin(strategy: S, order: KeyOrder, key: GridKey) -> Result<Self, SessionError> {
        let active_index = order
            .index_of(&key)
            .ok_or(SessionError::UnknownKey { key })?;
        tracing::debug!(
            target: "flexsort.session",
            key = %key,
            index = active_index,
            "drag started"
        );
        Ok(Self {
            strategy,
            initial_order: order.clone(),
            order,
            active_key: key,
            active_index,
            pending_exit: None,
            last_offset: None,
            frames: 0,
        })
    }

    #[must_use]
    pub fn active_key(&self) -> GridKey {
        self.active_key
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    #[must_use]
    pub fn order(&self) -> &KeyOrder {
        &self.order
    }

    /// Offset reported by the latest measured frame.
    #[must_use]
    pub fn last_offset(&self) -> Option<Offset> {
        self.last_offset
    }

    /// Row exit sent and not yet applied.
    #[must_use]
    pub fn pending_exit(&self) -> Option<RowExitRequest> {
        self.pending_exit
    }

    /// Feed one pointer frame through the strategy.
    pub fn update(
        &mut self,
        position: Point,
        sizes: &ElementSizes,
        sink: &dyn RowExitSink,
    ) -> FrameReport {
        self.frames += 1;
        let outcome = self.strategy.evaluate(&DragSnapshot::new(
            self.active_key,
            self.active_index,
            position,
            &self.order,
            sizes,
        ));
        if outcome.offset.is_some() {
            self.last_offset = outcome.offset;
        }

        let reordered = outcome.reordered(&self.order);
        if reordered {
            self.order = outcome.order;
            if let Some(index) = self.order.index_of(&self.active_key) {
                self.active_index = index;
            }
        }

        let mut exit_sent = false;
        if let Some(request) = outcome.row_exit {
            if self.pending_exit.is_none() {
                tracing::debug!(
                    target: "flexsort.session",
                    element = %request.element,
                    direction = ?request.direction,
                    "forwarding row exit"
                );
                sink.notify(request);
                self.pending_exit = Some(request);
                exit_sent = true;
            }
        }

        FrameReport {
            frame: self.frames,
            active_key: self.active_key,
            active_index: self.active_index,
            decision: outcome.decision,
            offset: outcome.offset,
            reordered,
            exit_sent,
        }
    }

    /// Continue the gesture on an order rebuilt by the coordinator.
    ///
    /// The dragged element is found again by identity: the same item id for
    /// items (its group may have changed), the same group for markers.
    pub fn rebase(&mut self, order: KeyOrder) -> Result<(), SessionError> {
        let active = self.active_key;
        let (index, key) = order
            .iter()
            .find(|(_, key)| match active.item_id() {
                Some(item) => key.item_id() == Some(item),
                None => *key == active,
            })
            .ok_or(SessionError::ActiveElementMissing { key: active })?;
        tracing::debug!(
            target: "flexsort.session",
            from = %active,
            to = %key,
            index,
            "session rebased"
        );
        self.order = order;
        self.active_key = key;
        self.active_index = index;
        self.pending_exit = None;
        Ok(())
    }

    /// Finish the gesture, keeping every reorder it made.
    #[must_use]
    pub fn end(self) -> KeyOrder {
        tracing::debug!(
            target: "flexsort.session",
            key = %self.active_key,
            frames = self.frames,
            "drag ended"
        );
        self.order
    }

    /// Abort the gesture, returning the order it started from.
    ///
    /// A row exit already sent stays in the channel; the coordinator either
    /// applies it or, if the element is gone, treats it as stale.
    #[must_use]
    pub fn cancel(self) -> KeyOrder {
        tracing::debug!(
            target: "flexsort.session",
            key = %self.active_key,
            frames = self.frames,
            pending_exit = self.pending_exit.is_some(),
            "drag cancelled"
        );
        self.initial_order
    }
}
