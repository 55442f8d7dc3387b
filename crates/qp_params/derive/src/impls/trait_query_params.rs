use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::QueryMeta;
use crate::path::fp::ResultFP;

/// Generate implementation code for `QueryParams`
///
/// The compiled schema, or the compile error, is cached per type.
pub(crate) fn impl_trait_query_params(meta: &QueryMeta) -> TokenStream {
    let qp_params_path = meta.qp_params_path();
    let query_params_ = crate::path::query_params_(qp_params_path);
    let compiled_schema_ = crate::path::compiled_schema_(qp_params_path);
    let compile_error_ = crate::path::compile_error_(qp_params_path);
    let typed_ = crate::path::typed_(qp_params_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let schema_cell = crate::path::generic_schema_cell_(qp_params_path);
        quote! {
            static CELL: #schema_cell = #schema_cell::new();
            CELL.get_or_compile::<Self>(<Self as #typed_>::type_info)
        }
    } else {
        let schema_cell = crate::path::non_generic_schema_cell_(qp_params_path);
        quote! {
            static CELL: #schema_cell = #schema_cell::new();
            CELL.get_or_compile(<Self as #typed_>::type_info)
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #query_params_ for #ident #ty_generics #where_clause {
            fn compiled_schema() -> #ResultFP<&'static #compiled_schema_, #compile_error_> {
                #inner_cell_tokens
            }
        }
    }
}
