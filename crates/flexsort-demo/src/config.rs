//! Loading metrics and traces from disk.

use std::fs;
use std::path::Path;

use flexsort_core::GridMetrics;

use crate::error::{DemoError, Result};

pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| DemoError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Metrics from `path`, or the defaults when no file is given.
///
/// Missing fields keep their default value.
pub fn load_metrics(path: Option<&Path>) -> Result<GridMetrics> {
    let Some(path) = path else {
        return Ok(GridMetrics::default());
    };
    let metrics: GridMetrics = serde_json::from_str(&read_file(path)?)?;
    metrics.validate()?;
    tracing::debug!(
        target: "flexsort.config",
        path = %path.display(),
        gap = metrics.gap,
        padding = metrics.padding,
        max_items_per_row = metrics.max_items_per_row,
        "metrics loaded"
    );
    Ok(metrics)
}
