use proc_macro2::{TokenStream, TokenTree};
use syn::Ident;

/// An empty token stream.
#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Whether `tokens` mention any of `idents`, looking into groups.
///
/// Used to find field types that depend on the type's generic parameters.
pub(crate) fn mentions_any(tokens: TokenStream, idents: &[&Ident]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => idents.iter().any(|param| **param == ident),
        TokenTree::Group(group) => mentions_any(group.stream(), idents),
        _ => false,
    })
}
