// -----------------------------------------------------------------------------
// Modules

mod match_query;

mod enum_kind;
mod struct_kind;

mod auto_register;
mod trait_query_params;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_query::match_query_impls;

use auto_register::get_auto_register_impl;
use enum_kind::impl_enum;
use struct_kind::impl_struct;
use trait_query_params::impl_trait_query_params;
use trait_type_path::impl_trait_type_path;
use trait_typed::impl_trait_typed;
