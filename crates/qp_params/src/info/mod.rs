//! Static schema descriptions.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable path and name of a described type.
//! - [`Type`]: a `TypeId` plus its path, name lookups.
//! - [`TypeInfo`]: a [`Type`] and its [`TypeKind`], the shape the classifier reads.
//! - [`StructInfo`]: the properties of a record-like or class-like type and its [`QueryConfig`].
//! - [`PropertyInfo`]: one record component or class field, with its [`FieldMeta`].
//! - [`AccessorInfo`]: one class-like accessor method.
//! - [`Typed`]: returns the `&'static TypeInfo` of a type.
//!
//! [`QueryConfig`]: crate::config::QueryConfig

// -----------------------------------------------------------------------------
// Modules

mod property_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use property_info::{AccessorInfo, FieldMeta, PropertyInfo};
pub use struct_info::{SchemaSource, StructInfo};
pub use type_info::{DateTimeKind, TypeInfo, TypeKind};
pub use type_path::{Type, TypePath};
pub use typed::{DynamicTyped, Typed};
