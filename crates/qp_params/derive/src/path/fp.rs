//! Fully qualified paths of prelude items, safe against shadowing in
//! the caller's scope.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// `::core::any::Any`
pub(crate) struct AnyFP;
/// `::core::option::Option`
pub(crate) struct OptionFP;
/// `::core::result::Result`
pub(crate) struct ResultFP;
/// `::core::convert::From`
pub(crate) struct FromFP;

impl ToTokens for AnyFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::any::Any).to_tokens(tokens);
    }
}

impl ToTokens for OptionFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::option::Option).to_tokens(tokens);
    }
}

impl ToTokens for ResultFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::result::Result).to_tokens(tokens);
    }
}

impl ToTokens for FromFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::convert::From).to_tokens(tokens);
    }
}
