//! Paths of the `qp_params` items used by generated code.
//!
//! Kept in one place so a change in the layout of `qp_params` only
//! touches this module. See [`qp_params`] for how the crate itself is found.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `qp_params` crate.
///
/// 1. Inside the `qp_core` facade, `::qp_core::params` is returned.
/// 2. For crates that depend on `qp_params`, `::qp_params` is returned.
/// 3. For crates that depend on `qp_core`, `::qp_core::params` is returned.
/// 4. For other situations, `::qp_params` is returned, which may be incorrect.
///
/// Reading the manifest is relatively costly, so the path is passed
/// around rather than looked up again.
pub(crate) fn qp_params() -> syn::Path {
    qp_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("qp_params"))
}

// -----------------------------------------------------------------------------
// Modules

mod info;
mod value;

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use info::*;
pub(crate) use value::*;

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn query_params_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::QueryParams
    }
}

#[inline(always)]
pub(crate) fn compiled_schema_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::schema::CompiledSchema
    }
}

#[inline(always)]
pub(crate) fn compile_error_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::error::CompileError
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::impls::GenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn non_generic_schema_cell_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::impls::NonGenericSchemaCell
    }
}

#[inline(always)]
pub(crate) fn generic_schema_cell_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::impls::GenericSchemaCell
    }
}
