use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn query_value_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::value::QueryValue
    }
}

#[inline(always)]
pub(crate) fn query_struct_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::value::QueryStruct
    }
}

#[inline(always)]
pub(crate) fn query_ref_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::value::QueryRef
    }
}

#[inline(always)]
pub(crate) fn property_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::value::Property
    }
}
