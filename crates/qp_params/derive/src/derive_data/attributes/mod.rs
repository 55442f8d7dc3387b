//! Parsing of `#[query(...)]` attributes.
//!
//! Type attributes become a `QueryConfig` expression, field attributes a
//! `FieldMeta` expression.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod parse;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::{FieldAttributes, VariantAttributes};
pub(crate) use type_attributes::TypeAttributes;

/// The attribute name shared by types, fields and variants.
pub(crate) const QUERY_ATTRIBUTE_NAME: &str = "query";
