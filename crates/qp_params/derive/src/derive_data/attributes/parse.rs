use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Expr, LitBool, LitStr, Token};

/// Parses `name` or `name = bool`.
pub(super) fn parse_flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        let lit: LitBool = meta.value()?.parse()?;
        Ok(lit.value)
    } else {
        Ok(true)
    }
}

/// Parses `name = "..."`.
pub(super) fn parse_str(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    meta.value()?.parse()
}

/// Consumes an item of a foreign attribute without looking at it.
pub(super) fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let _content;
        syn::parenthesized!(_content in meta.input);
    }
    Ok(())
}

/// Stores `value` in `slot`, rejecting a second occurrence.
pub(super) fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        let name = meta
            .path
            .get_ident()
            .map(ToString::to_string)
            .unwrap_or_default();
        return Err(meta.error(format!("duplicate `{name}` attribute")));
    }
    *slot = Some(value);
    Ok(())
}

/// Looks `lit` up in a table of `(attribute value, variant name)` pairs.
pub(super) fn parse_choice(
    lit: &LitStr,
    table: &[(&str, &str)],
    what: &str,
) -> syn::Result<syn::Ident> {
    let value = lit.value();
    match table.iter().find(|(name, _)| *name == value) {
        Some((_, variant)) => Ok(syn::Ident::new(variant, lit.span())),
        None => {
            let expected: Vec<String> = table.iter().map(|(name, _)| format!("`{name}`")).collect();
            Err(syn::Error::new(
                lit.span(),
                format!("unknown {what} `{value}`, expected one of {}", expected.join(", ")),
            ))
        }
    }
}

/// The span of a flag, or `None` if it was set to `false`.
pub(super) fn flag_span(meta: &ParseNestedMeta) -> syn::Result<Option<Span>> {
    let span = syn::spanned::Spanned::span(&meta.path);
    Ok(parse_flag(meta)?.then_some(span))
}
