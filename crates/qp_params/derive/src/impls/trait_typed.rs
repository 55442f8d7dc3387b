use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::QueryMeta;

/// Generate implementation code for `Typed`
///
/// `type_info_tokens` builds the `TypeInfo`, see the `to_info_tokens` of
/// [`QueryStruct`](crate::derive_data::QueryStruct).
pub(crate) fn impl_trait_typed(meta: &QueryMeta, type_info_tokens: TokenStream) -> TokenStream {
    let qp_params_path = meta.qp_params_path();
    let trait_typed_ = crate::path::typed_(qp_params_path);
    let type_info_ = crate::path::type_info_(qp_params_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(qp_params_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(qp_params_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #trait_typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
