//! # Deep Endpoint Classifier
//!
//! Decides whether an alias chain should surface as a *symbolic* reference in
//! generated output (e.g. `var(--space-4)`) instead of being inlined.
//!
//! The walk mirrors the resolver hop for hop, but stops at the first node
//! whose layer the caller accepts. Acceptance is checked in a fixed order:
//!
//! | Order | Layer | Condition |
//! |-------|-------|-----------|
//! | 1 | Primitive | always |
//! | 2 | Semantic (any axis) | `semantic` flag, node path not component-scoped |
//! | 3 | Semantic (breakpoint) | `component_breakpoint` flag, node path component-scoped |
//! | 4 | Density | `density` flag |
//!
//! The start node is never its own endpoint. Reaching a literal without an
//! accepted node means "inline it" (`None`).

use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::graph::VariableGraph;
use crate::model::*;
use crate::resolve::{select_entry, ResolveScope};

/// Which non-primitive layers count as endpoints. Primitive is implied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcceptanceFlags {
    pub semantic: bool,
    pub density: bool,
    pub component_breakpoint: bool,
}

impl AcceptanceFlags {
    /// Primitive endpoints only.
    pub fn primitives() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self { semantic: true, density: true, component_breakpoint: true }
    }

    pub fn density_only() -> Self {
        Self { density: true, ..Self::default() }
    }
}

/// Stateless classifier over a borrowed graph.
#[derive(Debug, Clone)]
pub struct EndpointClassifier<'g> {
    graph: &'g VariableGraph,
    component_prefix: String,
}

impl<'g> EndpointClassifier<'g> {
    pub fn new(graph: &'g VariableGraph, component_prefix: impl Into<String>) -> Self {
        Self { graph, component_prefix: component_prefix.into() }
    }

    pub fn component_prefix(&self) -> &str {
        &self.component_prefix
    }

    /// Walk from `id` under `ctx` and return the first accepted endpoint.
    ///
    /// Pure in (`id`, `ctx`, `flags`): the same inputs give the same answer.
    pub fn classify(
        &self,
        id: &VariableId,
        ctx: &AxisContext,
        flags: AcceptanceFlags,
        diags: &mut Diagnostics,
    ) -> Option<EndpointDescriptor> {
        let mut scope = ResolveScope::new(ctx);
        let Some(mut current) = self.graph.variable(id) else {
            diags.push(DiagnosticKind::MissingVariable, id.to_string(), "classification start");
            return None;
        };
        scope.enter(id.clone());

        loop {
            let selection = self
                .graph
                .collection_of(current)
                .and_then(|coll| select_entry(coll, current, scope.ctx))?;
            let RawValue::Alias(target) = selection.value else {
                return None;
            };

            if scope.has_visited(target) {
                let subject = self
                    .graph
                    .variable(target)
                    .map(|v| v.path.clone())
                    .unwrap_or_else(|| target.to_string());
                diags.push(DiagnosticKind::CircularReference, subject, scope.describe(self.graph, target));
                return None;
            }
            let Some(next) = self.graph.variable(target) else {
                diags.push(
                    DiagnosticKind::MissingVariable,
                    target.to_string(),
                    format!("referenced from {}", current.path),
                );
                return None;
            };
            scope.enter(target.clone());

            if let Some(kind) = self.accepts(next, flags) {
                return Some(descriptor(next, kind));
            }
            current = next;
        }
    }

    /// Classify a chain that *starts at a reference* to `id`, as composite
    /// property bindings do: `id` itself is the first hop and may be the
    /// endpoint.
    pub fn classify_reference(
        &self,
        id: &VariableId,
        ctx: &AxisContext,
        flags: AcceptanceFlags,
        diags: &mut Diagnostics,
    ) -> Option<EndpointDescriptor> {
        let Some(var) = self.graph.variable(id) else {
            diags.push(DiagnosticKind::MissingVariable, id.to_string(), "bound by a composite style");
            return None;
        };
        match self.accepts(var, flags) {
            Some(kind) => Some(descriptor(var, kind)),
            None => self.classify(id, ctx, flags, diags),
        }
    }

    /// Acceptance check for one reached node, in priority order.
    fn accepts(&self, node: &Variable, flags: AcceptanceFlags) -> Option<CollectionKind> {
        let kind = self.graph.kind_of(node)?;
        let scoped = node.is_scoped(&self.component_prefix);
        let accepted = match kind {
            CollectionKind::Primitive => true,
            CollectionKind::Semantic(_) if !scoped => flags.semantic,
            CollectionKind::Semantic(Axis::Breakpoint) => flags.component_breakpoint,
            CollectionKind::Density => flags.density,
            _ => false,
        };
        accepted.then_some(kind)
    }

    /// True when the chain from `id` reaches the Density layer before any
    /// primitive.
    pub fn references_density(&self, id: &VariableId, ctx: &AxisContext, diags: &mut Diagnostics) -> bool {
        matches!(
            self.classify(id, ctx, AcceptanceFlags::density_only(), diags),
            Some(EndpointDescriptor { kind: CollectionKind::Density, .. })
        )
    }
}

fn descriptor(var: &Variable, kind: CollectionKind) -> EndpointDescriptor {
    EndpointDescriptor {
        kind,
        variable: var.id.clone(),
        path: var.path.clone(),
        leaf: var.leaf_name().to_owned(),
    }
}
