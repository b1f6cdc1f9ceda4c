//! End-to-end tests for the full pipeline: run summary, validation policy,
//! sinks, and JSON export.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use token_graph::diagnostics::ValidationPolicy;
use token_graph::export::{write_json, write_summary, JsonSink};
use token_graph::sink::CollectingSink;
use token_graph::{
    DiagnosticKind, Error, PipelineOptions, PipelineOutput, Registration, Result, TokenGraph, TokenSink,
};

// ============================================================================
// Test sinks
// ============================================================================

struct Counting {
    name: String,
    seen: Rc<RefCell<usize>>,
}

impl TokenSink for Counting {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&mut self, _output: &PipelineOutput) -> Result<()> {
        *self.seen.borrow_mut() += 1;
        Ok(())
    }
}

struct Failing;

impl TokenSink for Failing {
    fn name(&self) -> &str {
        "broken"
    }

    fn emit(&mut self, _output: &PipelineOutput) -> Result<()> {
        Err(Error::Io(std::io::Error::other("disk full")))
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl std::io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// 1. Run summary
// ============================================================================

#[test]
fn test_summary_counts_every_category() {
    let out = common::graph().run().unwrap();
    let s = &out.summary;

    assert_eq!(s.counts.len(), DiagnosticKind::ALL.len());
    assert_eq!(s.count(DiagnosticKind::CircularReference), 2);
    assert_eq!(s.count(DiagnosticKind::MissingVariable), 1);
    assert_eq!(s.count(DiagnosticKind::NoValueForMode), 0);
    assert_eq!(s.count(DiagnosticKind::RatioConflict), 0);
    assert_eq!(s.unenriched, out.enrichment.unenriched);
}

#[test]
fn test_run_is_deterministic() {
    let a = common::graph().run().unwrap();
    let export = common::export_json().to_string();
    let config = common::config_json().to_string();
    let b = TokenGraph::from_json(&export, &config).unwrap().run().unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// 2. Validation policy
// ============================================================================

#[test]
fn test_default_policy_tolerates_diagnostics() {
    assert!(common::graph().run().is_ok());
}

#[test]
fn test_strict_policy_fails_run() {
    let options = PipelineOptions { policy: ValidationPolicy::strict(), ..Default::default() };
    let err = common::graph_with(options).run().unwrap_err();
    match err {
        Error::PolicyViolation(msg) => {
            assert!(msg.contains("circular reference (2)"), "{msg}");
            assert!(msg.contains("missing variable (1)"), "{msg}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_policy_on_clean_category_passes() {
    let policy = ValidationPolicy { fatal: vec![DiagnosticKind::RatioConflict, DiagnosticKind::NoValueForMode] };
    let options = PipelineOptions { policy, ..Default::default() };
    assert!(common::graph_with(options).run().is_ok());
}

#[test]
fn test_options_from_json() {
    let options = PipelineOptions::from_json_str(
        r#"{ "componentPrefix": "Cmp/", "enrich": { "valuePattern": false }, "policy": { "fatal": ["missing_variable"] } }"#,
    )
    .unwrap();
    assert_eq!(options.component_prefix, "Cmp/");
    assert!(!options.enrich.value_pattern);
    assert_eq!(options.policy.fatal, vec![DiagnosticKind::MissingVariable]);
    assert_eq!(options.tokens, PipelineOptions::default().tokens);
}

// ============================================================================
// 3. Sinks
// ============================================================================

#[test]
fn test_sinks_registered_once_and_emitted() {
    let mut graph = common::graph();
    let seen = Rc::new(RefCell::new(0));

    let first = Counting { name: "count".into(), seen: seen.clone() };
    let again = Counting { name: "count".into(), seen: seen.clone() };
    assert_eq!(graph.register_sink(first), Registration::Added);
    assert_eq!(graph.register_sink(again), Registration::AlreadyPresent);
    assert_eq!(graph.register_sink(CollectingSink::new("memory")), Registration::Added);
    assert_eq!(graph.sink_names().collect::<Vec<_>>(), vec!["count", "memory"]);

    graph.run_and_emit().unwrap();
    assert_eq!(*seen.borrow(), 1);
}

#[test]
fn test_failing_sink_is_named() {
    let mut graph = common::graph();
    graph.register_sink(Failing);
    let out = graph.run().unwrap();
    match graph.emit(&out) {
        Err(Error::Sink { name, message }) => {
            assert_eq!(name, "broken");
            assert!(message.contains("disk full"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_json_sink_output_parses_back() {
    let mut graph = common::graph();
    let buf = SharedBuf::default();
    graph.register_sink(JsonSink::new("json", buf.clone()));

    let out = graph.run_and_emit().unwrap();
    let bytes = buf.0.borrow().clone();
    let back: PipelineOutput = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(back, out);
}

// ============================================================================
// 4. Export
// ============================================================================

#[test]
fn test_export_json_layout() {
    let out = common::graph().run().unwrap();
    let mut buf = Vec::new();
    write_json(&out, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert!(json["tokens"]["files"].is_array());
    assert_eq!(json["tokens"]["palette_inheritance"]["advertorial"], "bild");
    assert_eq!(json["enrichment"]["identity"], 6);
    assert!(json["summary"]["unenriched"].as_array().is_some_and(|u| u.len() == 6));
}

#[test]
fn test_export_summary_text() {
    let out = common::graph().run().unwrap();
    let mut buf = Vec::new();
    write_summary(&out, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("circular reference: 2"));
    assert!(text.contains("Spacing/loopA"));
}
