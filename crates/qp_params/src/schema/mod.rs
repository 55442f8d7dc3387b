//! Compilation of a struct description into a marshalling plan.
//!
//! ## Menu
//!
//! - [`extract`]: the ordered property list of a struct, see [`PropertyDescriptor`].
//! - [`classify`]: the [`ValueShape`] of a property.
//! - [`KeyResolver`]: final query keys and duplicate tracking.
//! - [`compile`]: all of the above, producing a [`CompiledSchema`].
//!
//! Compilation runs once per type, the first time the schema is needed.
//! The result is cached in a static cell by `#[derive(QueryParams)]`, see
//! [`QueryParams::compiled_schema`](crate::QueryParams::compiled_schema).

// -----------------------------------------------------------------------------
// Modules

mod compile;
mod extractor;
mod key;
mod shape;

// -----------------------------------------------------------------------------
// Exports

pub use compile::{CompiledSchema, PropertyPlan, compile};
pub use extractor::{PropertyDescriptor, extract};
pub use key::KeyResolver;
pub use shape::{ElementShape, ValueShape, classify};
