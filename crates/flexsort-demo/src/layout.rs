//! Simulated measurement and the `layout` subcommand.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use flexsort_core::topology;
use flexsort_core::{ElementSizes, GridMetrics, GridModel, KeyOrder};
use flexsort_strategy::origin::rest_origin;

use crate::config::load_metrics;
use crate::data::sample_model;
use crate::error::Result;

/// Container width used when none is given.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 400.0;

#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Container width in logical pixels.
    #[arg(long, default_value_t = DEFAULT_CONTAINER_WIDTH)]
    pub width: f64,

    /// JSON file overriding the default grid metrics.
    #[arg(long)]
    pub metrics: Option<PathBuf>,
}

/// Sizes a host would measure: markers use the marker column width, items
/// split the remaining width evenly, every element is one row tall.
#[must_use]
pub fn measure(order: &KeyOrder, container_width: f64, metrics: &GridMetrics) -> ElementSizes {
    let mut sizes = ElementSizes::default();
    for row in topology::rows(order) {
        let count = isize::try_from(row.items.len()).unwrap_or(isize::MAX);
        let item_width = metrics.item_width(container_width, count);
        sizes.insert(row.marker, metrics.marker_width, metrics.element_height);
        for key in &row.items {
            sizes.insert(*key, item_width, metrics.element_height);
        }
    }
    sizes
}

pub fn run_layout(args: LayoutArgs, out: &mut dyn Write) -> Result<()> {
    let metrics = load_metrics(args.metrics.as_deref())?;
    let model = sample_model()?;
    write_layout(&model, args.width, &metrics, out)
}

pub fn write_layout(
    model: &GridModel,
    container_width: f64,
    metrics: &GridMetrics,
    out: &mut dyn Write,
) -> Result<()> {
    let order = model.to_order();
    let sizes = measure(&order, container_width, metrics);

    for (group, diagnostic) in model.diagnose(metrics) {
        writeln!(out, "warning: group {group}: {diagnostic}")?;
    }

    let Some(measured) = sizes.measured() else {
        writeln!(out, "(empty grid)")?;
        return Ok(());
    };
    let mut index = 0;
    for (position, row) in model.rows().iter().enumerate() {
        let count = isize::try_from(row.items.len()).unwrap_or(isize::MAX);
        writeln!(
            out,
            "row {position} {} ({} items, item width {:.1})",
            row.label,
            row.items.len(),
            metrics.item_width(container_width, count)
        )?;
        let labels = std::iter::once(row.label.as_str())
            .chain(row.items.iter().map(|item| item.label.as_str()));
        for label in labels {
            let Some(key) = order.get(index) else { break };
            let name = key.to_string();
            match rest_origin(key, index, &order, &measured, metrics) {
                Some(origin) => writeln!(
                    out,
                    "  [{index:>2}] {name:<14} {:>7.1},{:>7.1}  {label}",
                    origin.x, origin.y
                )?,
                None => writeln!(out, "  [{index:>2}] {name:<14} unplaced  {label}")?,
            }
            index += 1;
        }
    }
    Ok(())
}
