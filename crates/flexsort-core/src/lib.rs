#![forbid(unsafe_code)]

//! Core: keys, ordered key sequences, row topology, geometry, and metrics.
//!
//! # Role in flexsort
//! `flexsort-core` is the data layer. It owns the vocabulary the reorder
//! strategy reasons about: grid keys, the authoritative ordered key sequence,
//! the derived row topology, measured element sizes, and the layout metrics
//! shared by the host and the strategy.
//!
//! # Primary responsibilities
//! - **GridKey**: marker (row header) and item (row member) identities.
//! - **KeyOrder**: the flat arrangement plus its always-consistent key index.
//! - **Topology**: row membership, sibling sets, and row positions.
//! - **GridModel**: the explicit two-level row model the flat order is
//!   derived from.
//!
//! # How it fits in the system
//! `flexsort-strategy` consumes these types to decide reorders on each drag
//! frame, and `flexsort-runtime` uses [`GridModel`] to apply structural
//! changes the strategy requests.

pub mod geometry;
pub mod key;
pub mod metrics;
pub mod model;
pub mod order;
pub mod sizes;
pub mod topology;

pub use geometry::{HorizontalDirection, Offset, Point, VerticalDirection};
pub use key::{GridKey, GroupId, ItemId, KeyParseError};
pub use metrics::{GridMetrics, LayoutDiagnostic, MetricsError};
pub use model::{GridItem, GridModel, GridModelError, GridRow};
pub use order::{KeyOrder, KeyOrderError};
pub use sizes::{Dimension, ElementSizes, MeasuredSizes};
pub use topology::{RowView, Siblings};
