#![forbid(unsafe_code)]

//! Interactive grid-reorder strategy.
//!
//! Given the ordering and measured geometry of a two-level grid (rows headed
//! by markers, each followed by items) plus the pointer position of the
//! element being dragged, [`GridReorderStrategy::evaluate`] decides whether
//! the arrangement should change on this frame:
//!
//! 1. [`origin`] computes where the dragged element would rest.
//! 2. [`decider`] compares the drag offset from that origin to thresholds.
//! 3. [`transform`] applies an in-place swap to the ordered key sequence, or
//!    [`event`] describes a row exit for the host to apply.
//!
//! The strategy is a pure function of its snapshot: it never mutates its
//! inputs and keeps no state between frames.
//!
//! ```
//! use flexsort_core::{ElementSizes, GridKey, GridMetrics, GroupId, ItemId, KeyOrder, Point};
//! use flexsort_strategy::{Decision, DragSnapshot, GridReorderStrategy, SortStrategy};
//!
//! let m1 = GridKey::marker(GroupId::new(1));
//! let [a, b, c] = [1, 2, 3].map(|id| GridKey::item(GroupId::new(1), ItemId::new(id)));
//! let order = KeyOrder::new(vec![m1, a, b, c]).unwrap();
//!
//! let mut sizes = ElementSizes::default();
//! sizes.insert(m1, 36.0, 100.0);
//! for key in [a, b, c] {
//!     sizes.insert(key, 100.0, 100.0);
//! }
//!
//! let strategy = GridReorderStrategy::new(GridMetrics::default());
//! // B rests at x = 222; dragging it 130 to the right passes C.
//! let outcome = strategy.evaluate(&DragSnapshot::new(b, 2, Point::new(352.0, 62.0), &order, &sizes));
//! assert!(matches!(outcome.decision, Decision::SwapItem(_)));
//! assert_eq!(outcome.order.keys(), &[m1, a, c, b]);
//! ```

pub mod decider;
pub mod event;
pub mod origin;
pub mod snapshot;
pub mod strategy;
pub mod transform;

pub use decider::Decision;
pub use event::{RowExitRequest, RowExitSink, exit_channel};
pub use snapshot::DragSnapshot;
pub use strategy::{GridReorderStrategy, SortStrategy, StrategyOutcome, TraceOnlyStrategy};
