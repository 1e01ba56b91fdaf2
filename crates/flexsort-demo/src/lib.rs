#![forbid(unsafe_code)]

//! `flexsort` command-line driver.
//!
//! - `sample` prints the built-in grid.
//! - `layout` prints rest origins for a container width.
//! - `replay` runs a scripted drag trace through a drag session and the
//!   row coordinator.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod layout;
pub mod logging;
pub mod replay;
pub mod sample;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{DemoError, Result};
