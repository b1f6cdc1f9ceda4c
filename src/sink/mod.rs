//! # Token Sink Trait
//!
//! The contract between the pipeline and anything that consumes its output:
//! platform generators, writers, test collectors. Sinks receive the final
//! enriched token set and the run summary; how a token is serialized for a
//! target is entirely theirs.
//!
//! ## Implementations
//!
//! | Sink | Module | Description |
//! |------|--------|-------------|
//! | `CollectingSink` | `memory` | Keeps every output in memory, for tests/embedding |
//! | `JsonSink` | `crate::export` | Neutral JSON to any `std::io::Write` |

pub mod memory;

use crate::{PipelineOutput, Result};

pub use memory::CollectingSink;

/// A consumer of pipeline output.
///
/// Returning an error aborts [`crate::TokenGraph::emit`]; the error is
/// wrapped as [`crate::Error::Sink`] with the sink's name.
pub trait TokenSink {
    /// Registry name. Must be stable for the lifetime of the sink.
    fn name(&self) -> &str;

    fn emit(&mut self, output: &PipelineOutput) -> Result<()>;
}

impl<S: TokenSink + ?Sized> TokenSink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn emit(&mut self, output: &PipelineOutput) -> Result<()> {
        (**self).emit(output)
    }
}
