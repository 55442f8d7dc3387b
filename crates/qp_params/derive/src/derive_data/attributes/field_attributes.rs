use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Path};

use super::QUERY_ATTRIBUTE_NAME;
use super::parse::{flag_span, parse_str, set_once, skip_meta};

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level `#[query(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub prefix: Option<LitStr>,
    pub ignore: Option<Span>,
    pub converter: Option<Path>,
    pub use_serde_rename: Option<Span>,
    pub opaque: Option<Span>,
    /// `#[serde(rename = "...")]`, read only with `use_serde_rename`.
    pub serde_rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(QUERY_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
            }
        }

        if let (Some(span), Some(_)) = (this.ignore, &this.converter) {
            return Err(syn::Error::new(span, "`ignore` conflicts with `converter`"));
        }

        if this.use_serde_rename.is_some() {
            this.serde_rename = find_serde_rename(attrs)?;
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected a query attribute name"));
        };

        match ident.to_string().as_str() {
            "rename" => set_once(&mut self.rename, parse_str(meta)?, meta),
            "prefix" => set_once(&mut self.prefix, parse_str(meta)?, meta),
            "converter" => set_once(&mut self.converter, meta.value()?.parse()?, meta),
            "ignore" => set_flag(&mut self.ignore, meta),
            "use_serde_rename" => set_flag(&mut self.use_serde_rename, meta),
            "opaque" => set_flag(&mut self.opaque, meta),
            "case" | "include_nulls" | "explode_arrays" | "encoded" | "date_time_format"
            | "pattern" | "flatten_nested" | "fail_on_duplicate_keys" | "auto_register" => {
                Err(meta.error(format!("`{ident}` can only be applied to types")))
            }
            _ => Err(meta.error(format!("unknown query attribute `{ident}`"))),
        }
    }

    /// Whether the field type is read only through [`core::any::Any`].
    pub fn is_opaque(&self) -> bool {
        self.opaque.is_some() || self.ignore.is_some() || self.converter.is_some()
    }

    /// Generates the field's metadata, or nothing if every option is default.
    ///
    /// ```ignore
    /// .with_meta(
    ///     _path_::FieldMeta::new()
    ///         .with_rename("q")
    ///         .with_converter(_path_::ConverterFn::of::<FieldTy, Conv>())
    /// )
    /// ```
    pub fn get_meta_expression(&self, qp_params_path: &Path, field_ty: &syn::Type) -> TokenStream {
        let mut options = TokenStream::new();

        if let Some(rename) = &self.rename {
            options.extend(quote! { .with_rename(#rename) });
        }
        if let Some(alias) = &self.serde_rename {
            options.extend(quote! { .with_alias(#alias) });
        }
        if let Some(prefix) = &self.prefix {
            options.extend(quote! { .with_prefix(#prefix) });
        }
        if self.ignore.is_some() {
            options.extend(quote! { .with_ignored(true) });
        }
        if let Some(converter) = &self.converter {
            let converter_fn_ = crate::path::converter_fn_(qp_params_path);
            options.extend(quote! {
                .with_converter(#converter_fn_::of::<#field_ty, #converter>())
            });
        }

        if options.is_empty() {
            return crate::utils::empty();
        }

        let field_meta_ = crate::path::field_meta_(qp_params_path);
        quote! {
            .with_meta(#field_meta_::new() #options)
        }
    }
}

fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    match flag_span(meta)? {
        Some(span) => set_once(slot, span, meta),
        None => Ok(()),
    }
}

/// Reads `#[serde(rename = "...")]` or `#[serde(rename(serialize = "..."))]`.
///
/// Other serde items are skipped.
fn find_serde_rename(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut rename = None;
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                return skip_meta(&meta);
            }
            if meta.input.peek(syn::Token![=]) {
                rename = Some(parse_str(&meta)?);
                return Ok(());
            }
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("serialize") {
                    rename = Some(parse_str(&inner)?);
                    Ok(())
                } else {
                    skip_meta(&inner)
                }
            })
        })?;
    }
    Ok(rename)
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// Variant level `#[query(...)]` attributes of unit-only enums.
#[derive(Default, Debug)]
pub(crate) struct VariantAttributes {
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(QUERY_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        set_once(&mut this.rename, parse_str(&meta)?, &meta)
                    } else {
                        Err(meta.error("enum variants only accept `rename`"))
                    }
                })?;
            }
        }
        Ok(this)
    }
}
