use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;

/// Information shared by every generated impl of one type.
pub(crate) struct QueryMeta<'a> {
    qp_params_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    // Field types that mention a type parameter, bounded by `Typed + QueryValue`.
    active_types: Vec<Type>,
}

impl core::fmt::Debug for QueryMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QueryMeta")
            .field("qp_params_path", &self.qp_params_path.to_token_stream())
            .field("ident", self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> QueryMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            qp_params_path: crate::path::qp_params(),
            attrs,
            ident,
            generics,
            active_types: Vec::new(),
        }
    }

    #[inline]
    pub(super) fn set_active_types(&mut self, active_types: Vec<Type>) {
        self.active_types = active_types;
    }

    #[inline]
    pub fn qp_params_path(&self) -> &Path {
        &self.qp_params_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    /// Type parameters, used to find field types that depend on them.
    pub(super) fn type_params(&self) -> Vec<&'a Ident> {
        self.generics
            .type_params()
            .map(|param| &param.ident)
            .collect()
    }

    /// Whether the impls depend on generic parameters and need per-type cells.
    pub fn impl_with_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }

    /// Splits the generics for an impl block.
    ///
    /// Every type parameter gets a `'static` bound. With `field_bounds`,
    /// active field types are bounded by `Typed + QueryValue`.
    pub fn split_generics(
        &self,
        field_bounds: bool,
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut predicates: Vec<TokenStream> = where_clause
            .map(|clause| clause.predicates.iter().map(ToTokens::to_token_stream).collect())
            .unwrap_or_default();

        for param in self.generics.type_params() {
            let ident = &param.ident;
            predicates.push(quote! { #ident: 'static });
        }

        if field_bounds {
            let typed_ = crate::path::typed_(&self.qp_params_path);
            let query_value_ = crate::path::query_value_(&self.qp_params_path);
            for ty in &self.active_types {
                predicates.push(quote! { #ty: #typed_ + #query_value_ });
            }
        }

        let where_tokens = if predicates.is_empty() {
            crate::utils::empty()
        } else {
            quote! { where #(#predicates,)* }
        };

        (impl_generics, ty_generics, where_tokens)
    }
}
