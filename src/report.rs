//! Machine-readable run report written next to the BED output.

use crate::bed::Result;
use crate::diagnostics::Diagnostic;
use crate::interval::GeneInterval;
use crate::pipeline::ProcessOutput;
use serde::Serialize;
use std::io::Write;

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub records: &'a [GeneInterval],
    pub diagnostics: &'a [Diagnostic],
    pub not_found: &'a [String],
}

impl<'a> Report<'a> {
    pub fn new(output: &'a ProcessOutput, not_found: &'a [String]) -> Self {
        Self {
            records: &output.intervals,
            diagnostics: &output.diagnostics,
            not_found,
        }
    }

    /// Write the report as pretty JSON and flush the writer.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
