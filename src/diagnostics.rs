//! Soft failures: recorded, summarized, never thrown.
//!
//! Resolution problems are recovered locally (a sentinel value takes the
//! place of the real one) and reported here. Whether any category is fatal
//! is a policy decision made after the run, see [`ValidationPolicy`].

use std::collections::BTreeMap;
use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::AxisKey;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An alias points at an id absent from the graph.
    MissingVariable,
    /// A chain revisited a node.
    CircularReference,
    /// Neither the selected mode nor any fallback mode holds an entry.
    NoValueForMode,
    /// One lineHeight identity produced two ratios in one context.
    RatioConflict,
    /// A lineHeight token survived every enrichment stage without a ratio.
    UnresolvedEnrichment,
}

impl DiagnosticKind {
    pub const ALL: [DiagnosticKind; 5] = [
        DiagnosticKind::MissingVariable,
        DiagnosticKind::CircularReference,
        DiagnosticKind::NoValueForMode,
        DiagnosticKind::RatioConflict,
        DiagnosticKind::UnresolvedEnrichment,
    ];
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::MissingVariable => "missing variable",
            DiagnosticKind::CircularReference => "circular reference",
            DiagnosticKind::NoValueForMode => "no value for mode",
            DiagnosticKind::RatioConflict => "ratio conflict",
            DiagnosticKind::UnresolvedEnrichment => "unresolved enrichment",
        };
        f.write_str(s)
    }
}

/// One distinct problem. The same (kind, subject) seen again only bumps
/// `occurrences`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub subject: String,
    pub detail: String,
    pub occurrences: usize,
}

/// Accumulator threaded through every stage of a run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    seen: HashMap<(DiagnosticKind, String), usize>,
}

impl Diagnostics {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, kind: DiagnosticKind, subject: impl Into<String>, detail: impl Into<String>) {
        let subject = subject.into();
        if let Some(&idx) = self.seen.get(&(kind, subject.clone())) {
            self.entries[idx].occurrences += 1;
            return;
        }
        let detail = detail.into();
        match kind {
            DiagnosticKind::UnresolvedEnrichment => {
                tracing::debug!(%kind, %subject, %detail, "diagnostic");
            }
            _ => tracing::warn!(%kind, %subject, %detail, "diagnostic"),
        }
        self.seen.insert((kind, subject.clone()), self.entries.len());
        self.entries.push(Diagnostic { kind, subject, detail, occurrences: 1 });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: Diagnostics) {
        for d in other.entries {
            let n = d.occurrences;
            self.push(d.kind, d.subject.clone(), d.detail);
            if let Some(&idx) = self.seen.get(&(d.kind, d.subject)) {
                self.entries[idx].occurrences += n - 1;
            }
        }
    }
}

// ============================================================================
// Run summary
// ============================================================================

/// A token left without a lineHeight ratio.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnenrichedToken {
    pub key: AxisKey,
    pub scope: String,
    pub path: String,
}

/// Operator-facing summary of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub counts: BTreeMap<DiagnosticKind, usize>,
    pub enriched: usize,
    pub unenriched: Vec<UnenrichedToken>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunSummary {
    pub fn new(diagnostics: &Diagnostics, enriched: usize, unenriched: Vec<UnenrichedToken>) -> Self {
        let counts = DiagnosticKind::ALL
            .iter()
            .map(|k| (*k, diagnostics.count(*k)))
            .collect();
        Self {
            counts,
            enriched,
            unenriched,
            diagnostics: diagnostics.entries().to_vec(),
        }
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Fail if the policy marks any category with a non-zero count as fatal.
    pub fn enforce(&self, policy: &ValidationPolicy) -> Result<()> {
        let violated: Vec<String> = policy
            .fatal
            .iter()
            .filter(|k| self.count(**k) > 0)
            .map(|k| format!("{k} ({})", self.count(*k)))
            .collect();
        if violated.is_empty() {
            Ok(())
        } else {
            Err(Error::PolicyViolation(violated.join(", ")))
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "token-graph run summary")?;
        for (kind, n) in &self.counts {
            writeln!(f, "  {kind}: {n}")?;
        }
        writeln!(f, "  lineHeight ratios attached: {}", self.enriched)?;
        if !self.unenriched.is_empty() {
            writeln!(f, "  left unenriched (add an explicit binding upstream):")?;
            for t in &self.unenriched {
                writeln!(f, "    [{}] {} :: {}", t.key, t.scope, t.path)?;
            }
        }
        Ok(())
    }
}

/// Which diagnostic categories abort the run once it has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    #[serde(default)]
    pub fatal: Vec<DiagnosticKind>,
}

impl ValidationPolicy {
    pub fn strict() -> Self {
        Self {
            fatal: vec![
                DiagnosticKind::MissingVariable,
                DiagnosticKind::CircularReference,
                DiagnosticKind::NoValueForMode,
            ],
        }
    }
}
