//! # token-graph: Design-Variable Alias Resolution Engine
//!
//! Turns a flat export of design variables (collections, modes, aliases)
//! into a context-resolved, endpoint-annotated token set for downstream
//! platform generators.
//!
//! ## Design Principles
//!
//! 1. **Graph built once**: `VariableGraph` is immutable after ingestion
//! 2. **Explicit context**: every resolution carries its own `AxisContext` and visited chain
//! 3. **Soft failures**: broken chains become sentinel values plus diagnostics, never panics
//! 4. **Sink-agnostic**: generators plug in behind `TokenSink`; nothing here emits CSS or Swift
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use token_graph::TokenGraph;
//!
//! # fn example(export_json: &str, config_json: &str) -> token_graph::Result<()> {
//! let graph = TokenGraph::from_json(export_json, config_json)?;
//! let output = graph.run()?;
//!
//! for file in &output.tokens.files {
//!     println!("[{}] {}: {} tokens", file.key, file.scope, file.tokens.len());
//! }
//! println!("{}", output.summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Ingest | `ingest` → `graph` | Raw export JSON → id-indexed graph |
//! | Resolve | `resolve` | Variable × context → concrete value + chain |
//! | Classify | `endpoint` | Variable × context → symbolic endpoint, if any |
//! | Matrix | `matrix` | Every axis cell of every token category |
//! | Enrich | `enrich` | lineHeight ratios for standalone tokens |
//! | Emit | `sink`, `export` | Registered sinks, neutral JSON |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod ingest;
pub mod graph;
pub mod config;
pub mod diagnostics;
pub mod resolve;
pub mod endpoint;
pub mod matrix;
pub mod enrich;
pub mod registry;
pub mod sink;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Axis, AxisContext, AxisKey, CollectionKind, EndpointDescriptor,
    ResolvedToken, TokenFile, Value, VariableId,
};

// ============================================================================
// Re-exports: Stages
// ============================================================================

pub use config::{AxisConfig, PipelineOptions};
pub use diagnostics::{DiagnosticKind, Diagnostics, RunSummary, ValidationPolicy};
pub use endpoint::{AcceptanceFlags, EndpointClassifier};
pub use enrich::{EnrichOptions, EnrichmentReport};
pub use graph::VariableGraph;
pub use ingest::RawExport;
pub use matrix::{MatrixBuilder, TokenSet};
pub use registry::{Registration, Registry};
pub use resolve::{Resolved, ValueResolver};
pub use sink::TokenSink;

use serde::{Deserialize, Serialize};

// ============================================================================
// Top-level TokenGraph handle
// ============================================================================

/// Everything one run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub tokens: TokenSet,
    pub enrichment: EnrichmentReport,
    pub summary: RunSummary,
}

/// The primary entry point. A `TokenGraph` owns the ingested graph, the
/// axis configuration, and the registered sinks.
pub struct TokenGraph {
    graph: VariableGraph,
    config: AxisConfig,
    options: PipelineOptions,
    sinks: Registry<Box<dyn TokenSink>>,
}

impl TokenGraph {
    /// Validate the config and build the graph index.
    pub fn from_export(export: RawExport, config: AxisConfig, options: PipelineOptions) -> Result<Self> {
        config.validate()?;
        let graph = VariableGraph::build(export, &config.collections)?;
        tracing::debug!(
            variables = graph.variable_count(),
            brands = config.brands.len(),
            breakpoints = config.breakpoints.len(),
            "token graph ready"
        );
        Ok(Self { graph, config, options, sinks: Registry::new() })
    }

    /// Parse export and axis config from JSON, default options.
    pub fn from_json(export_json: &str, config_json: &str) -> Result<Self> {
        let export = RawExport::from_json_str(export_json)?;
        let config = AxisConfig::from_json_str(config_json)?;
        Self::from_export(export, config, PipelineOptions::default())
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn graph(&self) -> &VariableGraph {
        &self.graph
    }

    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Context for a logical cell key (`bild` / `lg` → mode ids).
    pub fn context(&self, key: &AxisKey) -> Result<AxisContext> {
        self.config.context(key)
    }

    /// Resolve one variable under one context.
    pub fn resolve(&self, id: &VariableId, ctx: &AxisContext, diags: &mut Diagnostics) -> Resolved {
        ValueResolver::new(&self.graph).resolve(id, ctx, diags)
    }

    /// Classify the endpoint of one variable's chain under one context.
    pub fn classify(
        &self,
        id: &VariableId,
        ctx: &AxisContext,
        flags: AcceptanceFlags,
        diags: &mut Diagnostics,
    ) -> Option<EndpointDescriptor> {
        self.classifier().classify(id, ctx, flags, diags)
    }

    pub fn classifier(&self) -> EndpointClassifier<'_> {
        EndpointClassifier::new(&self.graph, self.options.component_prefix.clone())
    }

    pub fn matrix(&self) -> MatrixBuilder<'_> {
        MatrixBuilder::new(&self.graph, &self.config, &self.options)
    }

    /// Build every matrix category, unenriched.
    pub fn build(&self, diags: &mut Diagnostics) -> Result<TokenSet> {
        self.matrix().build(diags)
    }

    /// Build, enrich, summarize, then apply the validation policy.
    pub fn run(&self) -> Result<PipelineOutput> {
        let mut diags = Diagnostics::new();
        let tokens = self.build(&mut diags)?;
        let (tokens, enrichment) = enrich::enrich(tokens, &self.options.enrich, &mut diags);
        let summary = RunSummary::new(&diags, enrichment.enriched(), enrichment.unenriched.clone());

        tracing::info!(
            files = tokens.files.len(),
            typography = tokens.typography.len(),
            effects = tokens.effects.len(),
            enriched = summary.enriched,
            unenriched = summary.unenriched.len(),
            diagnostics = summary.diagnostics.len(),
            "run complete"
        );

        summary.enforce(&self.options.policy)?;
        Ok(PipelineOutput { tokens, enrichment, summary })
    }

    // ========================================================================
    // Sinks
    // ========================================================================

    /// Register a sink under its own name. A second sink with the same name
    /// is dropped.
    pub fn register_sink<S: TokenSink + 'static>(&mut self, sink: S) -> Registration {
        let name = sink.name().to_owned();
        self.sinks.register(name, Box::new(sink))
    }

    pub fn sink_names(&self) -> impl Iterator<Item = &str> {
        self.sinks.names()
    }

    /// Hand `output` to every registered sink in registration order. Stops
    /// at the first failure.
    pub fn emit(&mut self, output: &PipelineOutput) -> Result<()> {
        for (name, sink) in self.sinks.iter_mut() {
            tracing::debug!(sink = name, "emitting");
            sink.emit(output).map_err(|e| Error::Sink {
                name: name.to_owned(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// [`run`](Self::run), then [`emit`](Self::emit).
    pub fn run_and_emit(&mut self) -> Result<PipelineOutput> {
        let output = self.run()?;
        self.emit(&output)?;
        Ok(output)
    }
}

impl std::fmt::Debug for TokenGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGraph")
            .field("variables", &self.graph.variable_count())
            .field("config", &self.config)
            .field("sinks", &self.sinks.names().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation policy violated: {0}")]
    PolicyViolation(String),

    #[error("Sink '{name}' failed: {message}")]
    Sink { name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
