//! In-memory sink.
//!
//! The reference implementation of `TokenSink`: clones every output it is
//! handed. Useful for tests and for embedding the pipeline in a process
//! that does its own generation.

use crate::{PipelineOutput, Result};

use super::TokenSink;

#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    name: String,
    outputs: Vec<PipelineOutput>,
}

impl CollectingSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), outputs: Vec::new() }
    }

    pub fn outputs(&self) -> &[PipelineOutput] {
        &self.outputs
    }

    pub fn last(&self) -> Option<&PipelineOutput> {
        self.outputs.last()
    }

    pub fn take(&mut self) -> Vec<PipelineOutput> {
        std::mem::take(&mut self.outputs)
    }
}

impl TokenSink for CollectingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&mut self, output: &PipelineOutput) -> Result<()> {
        self.outputs.push(output.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut sink = CollectingSink::new("mem");
        assert_eq!(sink.name(), "mem");
        assert!(sink.last().is_none());

        let out = PipelineOutput::default();
        sink.emit(&out).unwrap();
        sink.emit(&out).unwrap();
        assert_eq!(sink.outputs().len(), 2);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.outputs().is_empty());
    }
}
