//! Subcommand implementations.
//!
//! Each command writes its human-readable output to the given writer so the
//! binary can hand it stdout and tests can hand it a buffer.

pub mod check;
pub mod metrics;
pub mod seed;

use shared::models::MetricSummary;
use std::io::Write;

/// Writes each summary as a blank-line separated block.
pub(crate) fn write_summaries<W: Write>(
    out: &mut W,
    summaries: &[MetricSummary],
) -> std::io::Result<()> {
    for summary in summaries {
        writeln!(out, "\n{summary}")?;
    }
    Ok(())
}
