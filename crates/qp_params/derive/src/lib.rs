#![allow(
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    reason = "proc-macro lib"
)]

//! See following macros:
//!
//! - [`QueryParams`]
//! - [`impl_auto_register`]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Query Parameter Derivation
///
/// `#[derive(QueryParams)]` implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `QueryValue`
/// - `QueryStruct` and `QueryParams` (structs with named fields)
///
/// Structs become record-like schemas whose properties are the fields in
/// declaration order. Enums whose variants all are units become scalars
/// rendering the variant name. Tuple structs and unions are rejected.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(QueryParams)]
/// #[query(case = "snake", prefix = "api.", explode_arrays = false)]
/// struct Search { /* ... */ }
/// ```
///
/// | attribute | value |
/// |---|---|
/// | `case` | `"identity"`, `"camel"`, `"pascal"`, `"snake"`, `"kebab"`, `"upper_snake"`, `"upper_kebab"` |
/// | `prefix` | string prepended to every top-level key |
/// | `include_nulls` | emit `key=` for absent scalars |
/// | `explode_arrays` | `true` (default) repeats the key, `false` joins with `,` |
/// | `encoded` | values are already percent-encoded and written as is |
/// | `date_time_format` | `"iso_instant"`, `"iso_local_date_time"`, `"iso_local_date"`, `"pattern"` |
/// | `pattern` | `strftime`-style pattern used with `date_time_format = "pattern"` |
/// | `flatten_nested` | flatten nested structs under the global prefix |
/// | `fail_on_duplicate_keys` | two properties with the same key fail compilation |
/// | `auto_register` | submit the type for `ParamsRegistry::auto_register` |
///
/// Boolean attributes accept both `flag` and `flag = bool`.
///
/// `auto_register` has no effect on generic types, or when the
/// `auto_register` feature is disabled.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(QueryParams)]
/// struct Search {
///     #[query(rename = "q")]
///     keyword: String,
///     #[query(prefix = "filter.")]
///     filter: Filter,
///     #[query(converter = RangeConverter)]
///     price: PriceRange,
///     #[query(ignore)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// | attribute | value |
/// |---|---|
/// | `rename` | key used verbatim |
/// | `prefix` | local prefix, overrides the type's prefix |
/// | `ignore` | the field never produces a key |
/// | `converter` | a type implementing `ParamConverter<FieldType>` |
/// | `use_serde_rename` | use `#[serde(rename = "...")]` as the key when there is no `rename` |
/// | `opaque` | do not require `Typed` and `QueryValue` for the field type |
///
/// Ignored fields and fields with a converter are always treated as opaque.
///
/// ## Variant Attributes
///
/// `rename = "..."` replaces the rendered variant name.
///
/// ## Generics
///
/// Every type parameter must be `'static`. Field types that mention a
/// type parameter are bounded by `Typed + QueryValue`. Lifetime
/// parameters are not supported.
#[proc_macro_derive(QueryParams, attributes(query))]
pub fn derive_query_params(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impls::match_query_impls(ast)
}

/// Add the type to the automatic registry.
///
/// If the feature is not enabled, this macro will not do anything.
///
/// The type must be concrete (no uncertain generic parameters) and
/// implement `QueryParams`.
///
/// ## Example
///
/// ```ignore
/// impl_auto_register!(foo::Search);
/// impl_auto_register!(Paged<u32>); // Ok
/// impl_auto_register!(Paged<T>); // Error
/// ```
///
/// This does not conflict with the `query(auto_register)` attribute.
///
/// See: [`derive QueryParams`](derive_query_params)
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return utils::empty().into();

    #[cfg(feature = "auto_register")]
    {
        let type_path = parse_macro_input!(_input as syn::Type);

        let qp_params_path = path::qp_params();
        let auto_register_ = path::auto_register_(&qp_params_path);

        TokenStream::from(quote::quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#type_path as #auto_register_::__RegisterType>::__register
                    )
                }
            };
        })
    }
}
