use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::QueryMeta;
use crate::path::fp::OptionFP;

/// Generate implementation codes for `TypePath`
///
/// Non-generic types get a path built from `module_path!()`. Generic
/// types fall back to `core::any::type_name`, which names the
/// instantiated parameters.
pub(crate) fn impl_trait_type_path(meta: &QueryMeta) -> TokenStream {
    let qp_params_path = meta.qp_params_path();
    let trait_type_path_ = crate::path::type_path_(qp_params_path);
    let type_ = crate::path::type_(qp_params_path);

    let ident = meta.ident();
    let ident_str = ident.to_string();

    let (type_path, type_name) = if meta.impl_with_generic() {
        (
            quote! { ::core::any::type_name::<Self>() },
            quote! { #type_::of::<Self>().name() },
        )
    } else {
        (
            quote! { ::core::concat!(::core::module_path!(), "::", #ident_str) },
            quote! { #ident_str },
        )
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(false);

    quote! {
        impl #impl_generics #trait_type_path_ for #ident #ty_generics #where_clause {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> #OptionFP<&'static str> {
                #OptionFP::Some(::core::module_path!())
            }
        }
    }
}
