use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::QueryDerive;

/// Provided for `#[derive(QueryParams)]`.
pub(crate) fn match_query_impls(ast: DeriveInput) -> TokenStream {
    // Parse type kind, attributes and fields.
    let query_derive = match QueryDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let query_impls: proc_macro2::TokenStream = match query_derive {
        QueryDerive::Struct(info) => crate::impls::impl_struct(&info),
        QueryDerive::Enum(info) => crate::impls::impl_enum(&info),
    };

    TokenStream::from(quote! {
        const _: () = {
            #query_impls
        };
    })
}
