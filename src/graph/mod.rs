//! # Variable Graph Index
//!
//! Read-only, id-keyed index over the ingested export. Built once; every
//! later stage borrows it immutably.
//!
//! ## Build-time presence checks
//!
//! - duplicate collection or variable ids
//! - a collection without modes
//! - a variable whose collection does not exist
//! - a mode slot keyed by a mode of some other collection
//!
//! Dangling alias *targets* are not build errors. They surface as
//! `MissingVariable` when a chain actually reaches them.

use hashbrown::HashMap;

use crate::config::CollectionOverride;
use crate::ingest::{RawEffectStyle, RawEntry, RawExport, RawTextStyle};
use crate::model::*;
use crate::{Error, Result};

/// The immutable variable graph.
#[derive(Debug, Clone)]
pub struct VariableGraph {
    collections: HashMap<CollectionId, Collection>,
    collection_order: Vec<CollectionId>,
    variables: HashMap<VariableId, Variable>,
    variable_order: Vec<VariableId>,
    text_styles: Vec<RawTextStyle>,
    effect_styles: Vec<RawEffectStyle>,
}

impl VariableGraph {
    /// Build the index from an ingested export.
    ///
    /// `overrides` replaces the name-inferred kind of specific collections.
    pub fn build(export: RawExport, overrides: &[CollectionOverride]) -> Result<Self> {
        let mut collections = HashMap::with_capacity(export.collections.len());
        let mut collection_order = Vec::with_capacity(export.collections.len());

        for raw in export.collections {
            if raw.modes.is_empty() {
                return Err(Error::Ingest(format!("collection '{}' declares no modes", raw.name)));
            }
            let kind = overrides
                .iter()
                .find(|o| o.name == raw.name)
                .map(|o| o.kind)
                .unwrap_or_else(|| CollectionKind::infer(&raw.name));
            let id = CollectionId(raw.id);
            let collection = Collection {
                id: id.clone(),
                name: raw.name,
                kind,
                modes: raw
                    .modes
                    .into_iter()
                    .map(|m| Mode { id: ModeId(m.mode_id), name: m.name })
                    .collect(),
            };
            tracing::debug!(collection = %collection.name, kind = %kind.label(), "indexed collection");
            if collections.insert(id.clone(), collection).is_some() {
                return Err(Error::Ingest(format!("duplicate collection id '{id}'")));
            }
            collection_order.push(id);
        }

        let mut variables = HashMap::with_capacity(export.variables.len());
        let mut variable_order = Vec::with_capacity(export.variables.len());

        for raw in export.variables {
            let collection_id = CollectionId(raw.variable_collection_id);
            let collection = collections.get(&collection_id).ok_or_else(|| {
                Error::Ingest(format!(
                    "variable '{}' belongs to unknown collection '{collection_id}'",
                    raw.name
                ))
            })?;

            let mut values = std::collections::BTreeMap::new();
            for (mode, entry) in raw.values_by_mode {
                let mode = ModeId(mode);
                if !collection.has_mode(&mode) {
                    return Err(Error::Ingest(format!(
                        "variable '{}' has a value for mode '{mode}' outside collection '{}'",
                        raw.name, collection.name
                    )));
                }
                let value = match entry {
                    RawEntry::Alias(alias) => RawValue::Alias(VariableId(alias.id)),
                    RawEntry::Literal(lit) => RawValue::Literal(lit),
                };
                values.insert(mode, value);
            }

            let id = VariableId(raw.id);
            let variable = Variable {
                id: id.clone(),
                path: raw.name,
                collection: collection_id,
                var_type: raw.resolved_type,
                values,
            };
            if variables.insert(id.clone(), variable).is_some() {
                return Err(Error::Ingest(format!("duplicate variable id '{id}'")));
            }
            variable_order.push(id);
        }

        tracing::debug!(
            collections = collection_order.len(),
            variables = variable_order.len(),
            text_styles = export.text_styles.len(),
            effect_styles = export.effect_styles.len(),
            "variable graph built"
        );

        Ok(Self {
            collections,
            collection_order,
            variables,
            variable_order,
            text_styles: export.text_styles,
            effect_styles: export.effect_styles,
        })
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn variable(&self, id: &VariableId) -> Option<&Variable> {
        self.variables.get(id)
    }

    pub fn collection(&self, id: &CollectionId) -> Option<&Collection> {
        self.collections.get(id)
    }

    /// Owning collection. Present for every indexed variable.
    pub fn collection_of(&self, var: &Variable) -> Option<&Collection> {
        self.collections.get(&var.collection)
    }

    pub fn kind_of(&self, var: &Variable) -> Option<CollectionKind> {
        self.collection_of(var).map(|c| c.kind)
    }

    pub fn variable_by_path(&self, path: &str) -> Option<&Variable> {
        self.variables().find(|v| v.path == path)
    }

    // ========================================================================
    // Iteration (declaration order)
    // ========================================================================

    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collection_order.iter().filter_map(|id| self.collections.get(id))
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variable_order.iter().filter_map(|id| self.variables.get(id))
    }

    pub fn variables_in<'a>(&'a self, collection: &'a CollectionId) -> impl Iterator<Item = &'a Variable> {
        self.variables().filter(move |v| &v.collection == collection)
    }

    pub fn text_styles(&self) -> &[RawTextStyle] {
        &self.text_styles
    }

    pub fn effect_styles(&self) -> &[RawEffectStyle] {
        &self.effect_styles
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
