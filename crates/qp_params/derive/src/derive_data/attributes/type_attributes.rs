use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Attribute, Ident, LitStr};

use super::QUERY_ATTRIBUTE_NAME;
use super::parse::{flag_span, parse_choice, parse_flag, parse_str, set_once};

const CASES: &[(&str, &str)] = &[
    ("identity", "Identity"),
    ("camel", "Camel"),
    ("pascal", "Pascal"),
    ("snake", "Snake"),
    ("kebab", "Kebab"),
    ("upper_snake", "UpperSnake"),
    ("upper_kebab", "UpperKebab"),
];

const DATE_TIME_FORMATS: &[(&str, &str)] = &[
    ("iso_instant", "IsoInstant"),
    ("iso_local_date_time", "IsoLocalDateTime"),
    ("iso_local_date", "IsoLocalDate"),
    ("pattern", "Pattern"),
];

/// Type level `#[query(...)]` attributes.
///
/// Every option is `None` unless written, so the generated config only
/// overrides what the user asked for.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub case: Option<Ident>,
    pub prefix: Option<LitStr>,
    pub include_nulls: Option<bool>,
    pub explode_arrays: Option<bool>,
    pub encoded: Option<bool>,
    pub date_time_format: Option<Ident>,
    pub pattern: Option<LitStr>,
    pub flatten_nested: Option<bool>,
    pub fail_on_duplicate_keys: Option<bool>,
    /// Span of `auto_register`, used for the generated submission.
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(QUERY_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected a query attribute name"));
        };

        match ident.to_string().as_str() {
            "case" => {
                let case = parse_choice(&parse_str(meta)?, CASES, "case")?;
                set_once(&mut self.case, case, meta)
            }
            "prefix" => set_once(&mut self.prefix, parse_str(meta)?, meta),
            "include_nulls" => set_once(&mut self.include_nulls, parse_flag(meta)?, meta),
            "explode_arrays" => set_once(&mut self.explode_arrays, parse_flag(meta)?, meta),
            "encoded" => set_once(&mut self.encoded, parse_flag(meta)?, meta),
            "date_time_format" => {
                let format = parse_choice(&parse_str(meta)?, DATE_TIME_FORMATS, "date-time format")?;
                set_once(&mut self.date_time_format, format, meta)
            }
            "pattern" => set_once(&mut self.pattern, parse_str(meta)?, meta),
            "flatten_nested" => set_once(&mut self.flatten_nested, parse_flag(meta)?, meta),
            "fail_on_duplicate_keys" => {
                set_once(&mut self.fail_on_duplicate_keys, parse_flag(meta)?, meta)
            }
            "auto_register" => {
                if let Some(span) = flag_span(meta)? {
                    set_once(&mut self.auto_register, span, meta)?;
                }
                Ok(())
            }
            "rename" | "ignore" | "converter" | "use_serde_rename" | "opaque" => {
                Err(meta.error(format!("`{ident}` can only be applied to fields")))
            }
            _ => Err(meta.error(format!("unknown query attribute `{ident}`"))),
        }
    }

    /// Whether any option other than `auto_register` was written.
    pub fn has_config(&self) -> bool {
        self.case.is_some()
            || self.prefix.is_some()
            || self.include_nulls.is_some()
            || self.explode_arrays.is_some()
            || self.encoded.is_some()
            || self.date_time_format.is_some()
            || self.pattern.is_some()
            || self.flatten_nested.is_some()
            || self.fail_on_duplicate_keys.is_some()
    }

    /// Generates the type's config.
    ///
    /// ```ignore
    /// _path_::QueryConfig::new()
    ///     .with_case(_path_::CaseStrategy::Snake)
    ///     .with_prefix("api.")
    /// ```
    pub fn get_config_expression(&self, qp_params_path: &syn::Path) -> TokenStream {
        let query_config_ = crate::path::query_config_(qp_params_path);
        let mut tokens = quote! { #query_config_::new() };

        if let Some(case) = &self.case {
            let case_strategy_ = crate::path::case_strategy_(qp_params_path);
            tokens.extend(quote! { .with_case(#case_strategy_::#case) });
        }
        if let Some(prefix) = &self.prefix {
            tokens.extend(quote! { .with_prefix(#prefix) });
        }
        if let Some(value) = self.include_nulls {
            tokens.extend(quote! { .with_include_nulls(#value) });
        }
        if let Some(value) = self.explode_arrays {
            tokens.extend(quote! { .with_explode_arrays(#value) });
        }
        if let Some(value) = self.encoded {
            tokens.extend(quote! { .with_encoded(#value) });
        }
        if let Some(format) = &self.date_time_format {
            let date_time_format_ = crate::path::date_time_format_(qp_params_path);
            tokens.extend(quote! { .with_date_time_format(#date_time_format_::#format) });
        }
        if let Some(pattern) = &self.pattern {
            tokens.extend(quote! { .with_pattern(#pattern) });
        }
        if let Some(value) = self.flatten_nested {
            tokens.extend(quote! { .with_flatten_nested(#value) });
        }
        if let Some(value) = self.fail_on_duplicate_keys {
            tokens.extend(quote! { .with_fail_on_duplicate_keys(#value) });
        }

        tokens
    }
}
