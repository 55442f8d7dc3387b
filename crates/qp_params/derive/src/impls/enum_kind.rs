use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::QueryEnum;
use crate::path::fp::{AnyFP, FromFP};

/// Implements `TypePath`, `Typed` and `QueryValue` for a unit-only enum,
/// rendered as a scalar.
pub(crate) fn impl_enum(info: &QueryEnum) -> TokenStream {
    let meta = info.meta();
    let qp_params_path = meta.qp_params_path();
    let type_info_ = crate::path::type_info_(qp_params_path);
    let query_value_ = crate::path::query_value_(qp_params_path);
    let query_ref_ = crate::path::query_ref_(qp_params_path);

    let type_path_trait_tokens = crate::impls::impl_trait_type_path(meta);
    let typed_trait_tokens =
        crate::impls::impl_trait_typed(meta, quote! { #type_info_::scalar::<Self>() });

    let variant_arms = info.variants().iter().map(|variant| {
        let ident = variant.ident();
        let name = variant.rendered_name();
        quote! {
            Self::#ident => #name,
        }
    });

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        impl #impl_generics #query_value_ for #ident #ty_generics #where_clause {
            fn query_ref(&self) -> #query_ref_<'_> {
                let name: &'static str = match self {
                    #(#variant_arms)*
                };
                #query_ref_::Scalar(#FromFP::from(name))
            }

            #[inline]
            fn as_any(&self) -> &dyn #AnyFP {
                self
            }
        }
    }
}
