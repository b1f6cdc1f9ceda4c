//! # Token Graph Model
//!
//! Clean DTOs for the variable graph and everything derived from it.
//! These types cross every boundary: ingest ↔ graph ↔ resolver ↔ sinks.
//!
//! Design rule: this module is pure data. No I/O, no state.

pub mod collection;
pub mod variable;
pub mod value;
pub mod context;
pub mod token;
pub mod composite;

pub use collection::{Axis, Collection, CollectionId, CollectionKind, Mode, ModeId};
pub use variable::{Literal, RawValue, Rgba, Variable, VariableId, VariableType};
pub use value::{Unresolved, Value};
pub use context::{AxisContext, AxisKey};
pub use token::{Chain, EndpointDescriptor, LineHeightRatio, RatioSource, ResolvedToken, TokenFile};
pub use composite::{
    Binding, EffectToken, Property, ShadowKind, ShadowLayer,
    Typography, TypographyToken, round_ratio,
};
