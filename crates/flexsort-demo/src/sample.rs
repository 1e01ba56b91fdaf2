use std::io::Write;

use clap::Args;
use flexsort_core::{GridModel, KeyOrder};
use serde::Serialize;

use crate::data::sample_model;
use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct SampleArgs {
    /// Print the order and rows as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SampleDump<'a> {
    order: &'a KeyOrder,
    rows: &'a GridModel,
}

pub fn run_sample(args: SampleArgs, out: &mut dyn Write) -> Result<()> {
    let model = sample_model()?;
    let order = model.to_order();
    if args.json {
        serde_json::to_writer_pretty(
            &mut *out,
            &SampleDump {
                order: &order,
                rows: &model,
            },
        )?;
        writeln!(out)?;
        return Ok(());
    }

    let mut index = 0;
    for row in model.rows() {
        let labels = std::iter::once(row.label.as_str())
            .chain(row.items.iter().map(|item| item.label.as_str()));
        for label in labels {
            if let Some(key) = order.get(index) {
                let name = key.to_string();
                writeln!(out, "{index:>2} {name:<12} {label}")?;
            }
            index += 1;
        }
    }
    Ok(())
}
