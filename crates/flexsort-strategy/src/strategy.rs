//! Strategy facade evaluated once per drag frame.

use flexsort_core::topology::{self, owning_marker_index};
use flexsort_core::{GridMetrics, KeyOrder, Offset, Point};

use crate::decider::{self, Decision};
use crate::event::{RowExitRequest, RowExitSink};
use crate::origin;
use crate::snapshot::DragSnapshot;
use crate::transform;

/// Result of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    /// Offset of the pointer from the dragged element's rest origin, when the
    /// grid is measured. Hosts use it to position the dragged element.
    pub offset: Option<Offset>,
    /// What the frame decided.
    pub decision: Decision,
    /// The order to render next (a fresh copy even when unchanged).
    pub order: KeyOrder,
    /// Row exit to hand to the coordinator, for [`Decision::ExitRow`].
    pub row_exit: Option<RowExitRequest>,
}

impl StrategyOutcome {
    /// Outcome that keeps `order` as is.
    #[must_use]
    pub fn unchanged(order: &KeyOrder) -> Self {
        Self {
            offset: None,
            decision: Decision::NoChange,
            order: order.clone(),
            row_exit: None,
        }
    }

    /// Whether the frame swapped elements in place, leaving an order that
    /// differs from `previous`. Row exits never count: the host applies them.
    #[must_use]
    pub fn reordered(&self, previous: &KeyOrder) -> bool {
        self.decision.reorders() && self.order != *previous
    }
}

/// A per-frame sort strategy.
pub trait SortStrategy {
    /// Decide the next arrangement for one drag frame.
    fn evaluate(&self, snapshot: &DragSnapshot<'_>) -> StrategyOutcome;
}

/// The grid reorder strategy: item swaps, row swaps, and row exits.
#[derive(Debug, Clone, Default)]
pub struct GridReorderStrategy {
    metrics: GridMetrics,
}

impl GridReorderStrategy {
    #[must_use]
    pub fn new(metrics: GridMetrics) -> Self {
        Self { metrics }
    }

    #[must_use]
    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Rest origin of the dragged element, if the grid is measured.
    #[must_use]
    pub fn origin(&self, snapshot: &DragSnapshot<'_>) -> Option<Point> {
        let sizes = snapshot.sizes.measured()?;
        origin::rest_origin(
            snapshot.active_key,
            snapshot.active_index,
            snapshot.order,
            &sizes,
            &self.metrics,
        )
    }

    /// Hand the outcome's row exit, if any, to `sink`.
    pub fn dispatch(&self, outcome: &StrategyOutcome, sink: &dyn RowExitSink) {
        if let Some(request) = outcome.row_exit {
            tracing::debug!(
                target: "flexsort.strategy",
                element = %request.element,
                source_group = %request.source_group,
                source_row_index = request.source_row_index,
                direction = ?request.direction,
                "row exit requested"
            );
            sink.notify(request);
        }
    }

    fn row_exit(
        &self,
        snapshot: &DragSnapshot<'_>,
        direction: flexsort_core::VerticalDirection,
    ) -> Option<RowExitRequest> {
        let marker_index = owning_marker_index(snapshot.active_index, snapshot.order)?;
        Some(RowExitRequest {
            source_group: snapshot.active_key.group(),
            element: snapshot.active_key,
            source_row_index: topology::row_position(marker_index, snapshot.order)?,
            direction,
        })
    }
}

impl SortStrategy for GridReorderStrategy {
    fn evaluate(&self, snapshot: &DragSnapshot<'_>) -> StrategyOutcome {
        let _span = tracing::trace_span!(
            "flexsort.evaluate",
            key = %snapshot.active_key,
            index = snapshot.active_index,
        )
        .entered();

        if !snapshot.is_consistent() {
            tracing::debug!(
                target: "flexsort.strategy",
                key = %snapshot.active_key,
                index = snapshot.active_index,
                "active index does not match active key"
            );
            return StrategyOutcome::unchanged(snapshot.order);
        }
        let Some(sizes) = snapshot.sizes.measured() else {
            tracing::trace!(target: "flexsort.strategy", "sizes not measured yet");
            return StrategyOutcome::unchanged(snapshot.order);
        };
        let Some(rest) = origin::rest_origin(
            snapshot.active_key,
            snapshot.active_index,
            snapshot.order,
            &sizes,
            &self.metrics,
        ) else {
            tracing::trace!(target: "flexsort.strategy", "origin not computable");
            return StrategyOutcome::unchanged(snapshot.order);
        };

        let offset = snapshot.position.offset_from(rest);
        let mut outcome = StrategyOutcome {
            offset: Some(offset),
            ..StrategyOutcome::unchanged(snapshot.order)
        };

        let decision = decider::decide(
            snapshot.active_key,
            snapshot.active_index,
            offset,
            snapshot.order,
            &sizes,
            &self.metrics,
        )
        .unwrap_or_default();

        let applied = match decision {
            Decision::NoChange => None,
            Decision::SwapItem(direction) => {
                transform::swap_item(snapshot.order, snapshot.active_index, direction)
                    .map(|order| (order, None))
            }
            Decision::SwapRow(direction) => {
                transform::swap_row(snapshot.order, snapshot.active_index, direction)
                    .map(|order| (order, None))
            }
            Decision::ExitRow(direction) => self
                .row_exit(snapshot, direction)
                .map(|request| (snapshot.order.clone(), Some(request))),
        };

        if let Some((order, row_exit)) = applied {
            tracing::debug!(
                target: "flexsort.strategy",
                key = %snapshot.active_key,
                decision = ?decision,
                dx = offset.dx,
                dy = offset.dy,
                "reorder decided"
            );
            outcome.decision = decision;
            outcome.order = order;
            outcome.row_exit = row_exit;
        }
        outcome
    }
}

/// Pass-through strategy that logs every frame and never reorders.
///
/// Useful for checking what geometry a host feeds the strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceOnlyStrategy;

impl SortStrategy for TraceOnlyStrategy {
    fn evaluate(&self, snapshot: &DragSnapshot<'_>) -> StrategyOutcome {
        let (width, height) = snapshot
            .sizes
            .measured()
            .map(|sizes| {
                (
                    sizes.width(&snapshot.active_key).unwrap_or(0.0),
                    sizes.height(&snapshot.active_key).unwrap_or(0.0),
                )
            })
            .unwrap_or_default();
        tracing::info!(
            target: "flexsort.strategy",
            "[{}]{} {}x{}@{},{}",
            snapshot.active_index,
            snapshot.active_key,
            width.trunc(),
            height.trunc(),
            snapshot.position.x.trunc(),
            snapshot.position.y.trunc(),
        );
        StrategyOutcome::unchanged(snapshot.order)
    }
}
