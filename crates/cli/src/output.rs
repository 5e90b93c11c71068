//! Report rendering

use std::io::Write;

use anyhow::Context;
use usercheck_core::SuiteReport;

use crate::cli::OutputFormat;

/// Write `report` to `out` in the requested format.
pub fn write_report(
    out: &mut impl Write,
    report: &SuiteReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{report}")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).context("Failed to serialize report")?;
            writeln!(out)?;
        }
    }
    out.flush().context("Failed to flush report")
}
