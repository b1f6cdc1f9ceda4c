//! JSON export: serialize the final token set as neutral JSON.
//!
//! ```text
//! TokenGraph::run() → PipelineOutput → write_json() → any std::io::Write
//!   → platform generators read it back with serde
//! ```
//!
//! The JSON mirrors the serde shape of [`PipelineOutput`]; nothing is
//! flattened or renamed for a particular target.

use std::io::Write;

use serde::Serialize;

use crate::matrix::TokenSet;
use crate::sink::TokenSink;
use crate::{PipelineOutput, Result};

/// Write the full output (tokens, enrichment report, run summary).
pub fn write_json(output: &PipelineOutput, writer: &mut dyn Write) -> Result<()> {
    write_pretty(output, writer)
}

/// Write only the token set.
pub fn write_token_set(tokens: &TokenSet, writer: &mut dyn Write) -> Result<()> {
    write_pretty(tokens, writer)
}

/// Human-readable run summary, one line per diagnostic category.
pub fn write_summary(output: &PipelineOutput, writer: &mut dyn Write) -> Result<()> {
    write!(writer, "{}", output.summary)?;
    for d in &output.summary.diagnostics {
        writeln!(writer, "  {}: {} ({}) x{}", d.kind, d.subject, d.detail, d.occurrences)?;
    }
    Ok(())
}

fn write_pretty<T: Serialize + ?Sized>(value: &T, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Sink that writes every output as JSON to its writer.
pub struct JsonSink<W: Write> {
    name: String,
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self { name: name.into(), writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TokenSink for JsonSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&mut self, output: &PipelineOutput) -> Result<()> {
        write_json(output, &mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
