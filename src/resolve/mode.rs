//! Mode selection: which slot of a variable a context reads.
//!
//! Shared by the value resolver and the endpoint classifier so both walk
//! exactly the same hops.

use crate::model::{AxisContext, Collection, CollectionKind, ModeId, RawValue, Variable};

/// The slot chosen for one variable under one context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeSelection<'g> {
    pub mode: &'g ModeId,
    pub value: &'g RawValue,
    /// True when the preferred mode was empty and a later mode filled in.
    pub fell_back: bool,
}

/// Preferred mode of `collection` under `ctx`.
///
/// 1. axis-bound collections take the context's mode id for that axis
/// 2. brand mappings take the mode *named* after the context brand
/// 3. everything else (or an unpopulated axis) takes the first mode
pub fn preferred_mode<'g>(collection: &'g Collection, ctx: &AxisContext) -> Option<&'g ModeId> {
    let picked = match collection.kind {
        CollectionKind::BrandMapping(_) => ctx
            .brand_name
            .as_deref()
            .and_then(|brand| collection.mode_by_name(brand)),
        kind => kind
            .mode_axis()
            .and_then(|axis| ctx.mode_for(axis))
            .and_then(|id| collection.mode_by_id(id)),
    };
    picked.or_else(|| collection.default_mode()).map(|m| &m.id)
}

/// Select the entry to read, falling back to the first mode (declaration
/// order) holding one. `None` only when no mode holds an entry at all.
pub fn select_entry<'g>(
    collection: &'g Collection,
    var: &'g Variable,
    ctx: &AxisContext,
) -> Option<ModeSelection<'g>> {
    if let Some(mode) = preferred_mode(collection, ctx) {
        if let Some(value) = var.entry(mode) {
            return Some(ModeSelection { mode, value, fell_back: false });
        }
    }
    collection.modes.iter().find_map(|m| {
        var.entry(&m.id).map(|value| ModeSelection { mode: &m.id, value, fell_back: true })
    })
}
