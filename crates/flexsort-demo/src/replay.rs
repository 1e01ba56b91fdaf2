//! Scripted drag replay.
//!
//! A trace lists drags over the sample grid. Each drag is a key plus the
//! pointer positions of its frames in container coordinates. Frames run
//! through a [`DragSession`]; row exits go through the coordinator's channel
//! and are applied at the start of the following frame (or when the drag
//! ends), the way a host applies them once its idle context runs.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use flexsort_core::{GridKey, GridMetrics, GridModel, KeyOrder, Point};
use flexsort_runtime::{DragSession, ExitOutcome, FrameReport, GridCoordinator};
use flexsort_strategy::GridReorderStrategy;
use serde::{Deserialize, Serialize};

use crate::config::{load_metrics, read_file};
use crate::data::sample_model;
use crate::error::{DemoError, Result};
use crate::layout::measure;

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Trace file (JSON).
    pub trace: PathBuf,

    /// JSON file overriding the default grid metrics.
    #[arg(long)]
    pub metrics: Option<PathBuf>,

    /// Emit the full replay report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DragTrace {
    pub container_width: f64,
    pub drags: Vec<ScriptedDrag>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedDrag {
    pub key: GridKey,
    pub frames: Vec<[f64; 2]>,
    /// Abort instead of dropping: swaps are discarded, unapplied exits dropped.
    #[serde(default)]
    pub cancel: bool,
}

impl DragTrace {
    pub fn parse(text: &str) -> Result<Self> {
        let trace: Self = serde_json::from_str(text)?;
        if !trace.container_width.is_finite() || trace.container_width <= 0.0 {
            return Err(DemoError::invalid_trace(format!(
                "container_width must be positive, got {}",
                trace.container_width
            )));
        }
        for (number, drag) in trace.drags.iter().enumerate() {
            if drag.frames.iter().flatten().any(|value| !value.is_finite()) {
                return Err(DemoError::invalid_trace(format!(
                    "drag {number} ({}) has a non-finite coordinate",
                    drag.key
                )));
            }
        }
        Ok(trace)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DragLog {
    pub key: GridKey,
    pub frames: Vec<FrameReport>,
    pub exits: Vec<ExitOutcome>,
    pub cancelled: bool,
    pub discarded_exits: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub drags: Vec<DragLog>,
    pub order: KeyOrder,
    pub rows: GridModel,
}

/// Run every drag of `trace` against `model`.
pub fn replay(trace: &DragTrace, model: GridModel, metrics: GridMetrics) -> Result<ReplayReport> {
    let mut coordinator = GridCoordinator::new(model, metrics);
    let sender = coordinator.sender();
    let mut drags = Vec::with_capacity(trace.drags.len());

    for drag in &trace.drags {
        let _span = tracing::info_span!("replay.drag", key = %drag.key).entered();
        let mut session = DragSession::begin(
            GridReorderStrategy::new(metrics),
            coordinator.order(),
            drag.key,
        )?;
        let mut log = DragLog {
            key: drag.key,
            frames: Vec::with_capacity(drag.frames.len()),
            exits: Vec::new(),
            cancelled: drag.cancel,
            discarded_exits: 0,
        };

        for &[x, y] in &drag.frames {
            if session.pending_exit().is_some() {
                log.exits.extend(coordinator.drain()?);
                session.rebase(coordinator.order())?;
            }
            let sizes = measure(session.order(), trace.container_width, &metrics);
            log.frames.push(session.update(Point::new(x, y), &sizes, &sender));
        }

        if drag.cancel {
            log.discarded_exits = coordinator.discard_pending();
            let _ = session.cancel();
        } else {
            if session.pending_exit().is_some() {
                log.exits.extend(coordinator.drain()?);
                session.rebase(coordinator.order())?;
            }
            coordinator.commit_order(&session.end())?;
        }
        drags.push(log);
    }

    Ok(ReplayReport {
        drags,
        order: coordinator.order(),
        rows: coordinator.model().clone(),
    })
}

pub fn run_replay(args: ReplayArgs, out: &mut dyn Write) -> Result<()> {
    let metrics = load_metrics(args.metrics.as_deref())?;
    let trace = DragTrace::parse(&read_file(&args.trace)?)?;
    let report = replay(&trace, sample_model()?, metrics)?;
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write_report(&report, out)?;
    }
    Ok(())
}

fn write_report(report: &ReplayReport, out: &mut dyn Write) -> Result<()> {
    for log in &report.drags {
        writeln!(out, "drag {}{}", log.key, if log.cancelled { " (cancelled)" } else { "" })?;
        for frame in &log.frames {
            let offset = frame
                .offset
                .map(|offset| format!("{:+.1},{:+.1}", offset.dx, offset.dy))
                .unwrap_or_else(|| "unmeasured".to_string());
            writeln!(
                out,
                "  #{} [{}]{} {offset} {:?}",
                frame.frame, frame.active_index, frame.active_key, frame.decision
            )?;
        }
        for exit in &log.exits {
            match exit {
                ExitOutcome::Moved {
                    element,
                    source,
                    target,
                    created_row,
                    removed_source,
                } => writeln!(
                    out,
                    "  moved to {element}: group {source} -> {target}{}{}",
                    if *created_row { " (new row)" } else { "" },
                    if *removed_source { " (source removed)" } else { "" }
                )?,
                ExitOutcome::Stale { request } => {
                    writeln!(out, "  stale exit for {}", request.element)?;
                }
                ExitOutcome::Unchanged { request } => {
                    writeln!(out, "  exit for {} left the grid unchanged", request.element)?;
                }
            }
        }
        if log.discarded_exits > 0 {
            writeln!(out, "  discarded {} pending exit(s)", log.discarded_exits)?;
        }
    }

    writeln!(out, "final arrangement:")?;
    for row in report.rows.rows() {
        let cities: Vec<&str> = row.items.iter().map(|item| item.label.as_str()).collect();
        writeln!(out, "  {} {} | {}", row.id, row.label, cities.join(", "))?;
    }
    Ok(())
}
