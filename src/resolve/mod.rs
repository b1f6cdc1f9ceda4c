//! # Context-Sensitive Value Resolver
//!
//! Resolves one variable under one [`AxisContext`] to a concrete value,
//! following aliases until a literal is reached.
//!
//! ```text
//! Component/Button/labelSize ──alias──▶ Semantic/Breakpoint/bodySize
//!          (first mode)                    (mode = ctx.breakpoint)
//!                                              │ alias
//!                                              ▼
//!                                   BrandTokenMapping/bodySize
//!                                    (mode named ctx.brand_name)
//!                                              │ alias
//!                                              ▼
//!                                      _SizePrimitive/Size/16 = 16
//! ```
//!
//! Never panics and never loops: a revisited node yields
//! `Unresolved::CircularReference`, a dangling id `Unresolved::MissingVariable`,
//! an empty variable `Unresolved::NoValueForMode`. Each also records a
//! diagnostic.

pub mod mode;
pub mod normalize;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::graph::VariableGraph;
use crate::model::*;

pub use mode::{preferred_mode, select_entry, ModeSelection};
pub use normalize::{color_string, normalize, round2};

// ============================================================================
// Scope: the explicit per-call context
// ============================================================================

/// Context threaded through every recursive step: the axis selection and
/// the nodes visited so far (which doubles as the walked chain).
#[derive(Debug, Clone)]
pub struct ResolveScope<'c> {
    pub ctx: &'c AxisContext,
    visited: Chain,
}

impl<'c> ResolveScope<'c> {
    pub fn new(ctx: &'c AxisContext) -> Self {
        Self { ctx, visited: Chain::new() }
    }

    pub fn has_visited(&self, id: &VariableId) -> bool {
        self.visited.contains(id)
    }

    pub fn enter(&mut self, id: VariableId) {
        self.visited.push(id);
    }

    pub fn chain(&self) -> &Chain {
        &self.visited
    }

    pub fn into_chain(self) -> Chain {
        self.visited
    }

    pub fn depth(&self) -> usize {
        self.visited.len()
    }

    /// Render the chain with paths where known, ids otherwise.
    pub fn describe(&self, graph: &VariableGraph, closing: &VariableId) -> String {
        self.visited
            .iter()
            .chain(std::iter::once(closing))
            .map(|id| graph.variable(id).map(|v| v.path.clone()).unwrap_or_else(|| id.to_string()))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// A resolved value plus the chain that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: Value,
    pub chain: Chain,
}

/// Stateless resolver over a borrowed graph.
#[derive(Debug, Clone, Copy)]
pub struct ValueResolver<'g> {
    graph: &'g VariableGraph,
}

impl<'g> ValueResolver<'g> {
    pub fn new(graph: &'g VariableGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g VariableGraph {
        self.graph
    }

    /// Resolve `id` under `ctx`.
    pub fn resolve(&self, id: &VariableId, ctx: &AxisContext, diags: &mut Diagnostics) -> Resolved {
        let mut scope = ResolveScope::new(ctx);
        let value = self.resolve_in(id, &mut scope, diags);
        Resolved { value, chain: scope.into_chain() }
    }

    /// Resolve and keep only the value.
    pub fn value(&self, id: &VariableId, ctx: &AxisContext, diags: &mut Diagnostics) -> Value {
        self.resolve(id, ctx, diags).value
    }

    /// One step of the walk. Recurses on aliases with the same scope.
    pub fn resolve_in(&self, id: &VariableId, scope: &mut ResolveScope<'_>, diags: &mut Diagnostics) -> Value {
        if scope.has_visited(id) {
            let subject = self.subject(id);
            diags.push(DiagnosticKind::CircularReference, subject, scope.describe(self.graph, id));
            return Value::Unresolved(Unresolved::CircularReference);
        }

        let Some(var) = self.graph.variable(id) else {
            let from = scope
                .chain()
                .last()
                .map(|prev| self.subject(prev))
                .unwrap_or_else(|| "<root>".into());
            diags.push(DiagnosticKind::MissingVariable, id.to_string(), format!("referenced from {from}"));
            return Value::Unresolved(Unresolved::MissingVariable);
        };
        scope.enter(id.clone());

        let selection = self
            .graph
            .collection_of(var)
            .and_then(|coll| select_entry(coll, var, scope.ctx));
        let Some(selection) = selection else {
            diags.push(
                DiagnosticKind::NoValueForMode,
                var.path.clone(),
                "no mode of the owning collection holds an entry",
            );
            return Value::Unresolved(Unresolved::NoValueForMode);
        };
        if selection.fell_back {
            tracing::debug!(variable = %var.path, mode = %selection.mode, "preferred mode empty, fell back");
        }

        match selection.value {
            RawValue::Alias(target) => self.resolve_in(target, scope, diags),
            RawValue::Literal(lit) => normalize(lit, var.var_type),
        }
    }

    fn subject(&self, id: &VariableId) -> String {
        self.graph
            .variable(id)
            .map(|v| v.path.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
