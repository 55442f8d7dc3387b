//! Compiled schemas by type, and static registration.
//!
//! ## Menu
//!
//! - [`QueryParams`]: implemented by `#[derive(QueryParams)]`, gives a type
//!   its cached [`CompiledSchema`] and the marshalling entry points.
//! - [`ParamsMeta`]: a registered type and its compiled schema.
//! - [`ParamsRegistry`]: registered types, looked up by [`TypeId`], type
//!   path or type name, and marshalling of type-erased values.
//! - [`ParamsRegistryArc`]: a shared, lockable [`ParamsRegistry`].
//!
//! ## auto_register
//!
//! See [`ParamsRegistry::auto_register`].
//!
//! Static registration is implemented with the [`inventory`] crate. Not
//! every platform supports it (the major ones do). Where it is not
//! supported, `auto_register` registers nothing and returns `false`.
//!
//! [`CompiledSchema`]: crate::schema::CompiledSchema
//! [`TypeId`]: core::any::TypeId
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod params_meta;
mod params_registry;
mod query_params;

// -----------------------------------------------------------------------------
// Exports

pub use params_meta::ParamsMeta;
pub use params_registry::{ParamsRegistry, ParamsRegistryArc};
pub use query_params::QueryParams;
