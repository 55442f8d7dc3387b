use syn::{Ident, LitStr, Variant};

use super::{QueryMeta, VariantAttributes};

/// A variant of a unit-only enum.
pub(crate) struct EnumVariant<'a> {
    pub data: &'a Variant,
    pub attrs: VariantAttributes,
}

impl EnumVariant<'_> {
    #[inline]
    pub fn ident(&self) -> &Ident {
        &self.data.ident
    }

    /// The rendered text: the rename, or the variant name.
    pub fn rendered_name(&self) -> LitStr {
        match &self.attrs.rename {
            Some(rename) => rename.clone(),
            None => {
                let ident = self.ident();
                LitStr::new(&syn::ext::IdentExt::unraw(ident).to_string(), ident.span())
            }
        }
    }
}

/// An enum whose variants are all units, rendered as a scalar.
pub(crate) struct QueryEnum<'a> {
    meta: QueryMeta<'a>,
    variants: Vec<EnumVariant<'a>>,
}

impl<'a> QueryEnum<'a> {
    #[inline]
    pub(super) fn new(meta: QueryMeta<'a>, variants: Vec<EnumVariant<'a>>) -> Self {
        Self { meta, variants }
    }

    #[inline]
    pub fn meta(&self) -> &QueryMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn variants(&self) -> &[EnumVariant<'a>] {
        &self.variants
    }
}
