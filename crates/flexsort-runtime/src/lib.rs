#![forbid(unsafe_code)]

//! Runtime: the host side of a drag gesture.
//!
//! # Role in flexsort
//! The reorder strategy is stateless and never touches the row model. This
//! crate holds the state the strategy deliberately does not own:
//!
//! - [`DragSession`] lives for one drag gesture. It threads the active key,
//!   active index and latest order through the strategy on every frame and
//!   forwards row-exit requests once.
//! - [`GridCoordinator`] owns the [`flexsort_core::GridModel`]. It folds
//!   in-place swaps back into the model and applies row-exit requests off the
//!   per-frame path, creating or dropping rows as needed.
//!
//! # Frame flow
//! ```text
//! pointer move ─► DragSession::update ─► strategy ─► new order (swap)
//!                                             └────► RowExitRequest ─► channel
//! host idle    ─► GridCoordinator::drain ─► GridModel edit ─► DragSession::rebase
//! ```

pub mod coordinator;
pub mod session;

pub use coordinator::{ExitOutcome, GridCoordinator};
pub use session::{DragSession, FrameReport, SessionError};
