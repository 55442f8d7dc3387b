use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::QueryStruct;
use crate::path::fp::{AnyFP, OptionFP};

/// Implements `TypePath`, `Typed`, `QueryValue`, `QueryStruct` and
/// `QueryParams` for a struct with named fields.
pub(crate) fn impl_struct(info: &QueryStruct) -> TokenStream {
    let meta = info.meta();

    let type_path_trait_tokens = crate::impls::impl_trait_type_path(meta);
    let typed_trait_tokens = crate::impls::impl_trait_typed(meta, info.to_info_tokens());
    let value_trait_tokens = impl_struct_value(info);
    let query_params_trait_tokens = crate::impls::impl_trait_query_params(meta);
    let auto_register_tokens = crate::impls::get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #value_trait_tokens

        #query_params_trait_tokens

        #auto_register_tokens
    }
}

fn impl_struct_value(info: &QueryStruct) -> TokenStream {
    let meta = info.meta();
    let qp_params_path = meta.qp_params_path();
    let query_value_ = crate::path::query_value_(qp_params_path);
    let query_struct_ = crate::path::query_struct_(qp_params_path);
    let query_ref_ = crate::path::query_ref_(qp_params_path);
    let property_ = crate::path::property_(qp_params_path);

    // Ignored fields are never read.
    let property_arms = info
        .fields()
        .iter()
        .filter(|field| field.attrs.ignore.is_none())
        .map(|field| {
            let index = field.index;
            let ident = field.ident();
            if field.attrs.is_opaque() {
                quote! {
                    #index => #OptionFP::Some(#property_::Opaque(&self.#ident)),
                }
            } else {
                quote! {
                    #index => #OptionFP::Some(#property_::Borrowed(&self.#ident)),
                }
            }
        });

    let field_len = info.fields().len();
    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #query_value_ for #ident #ty_generics #where_clause {
            #[inline]
            fn query_ref(&self) -> #query_ref_<'_> {
                #query_ref_::Struct(self)
            }

            #[inline]
            fn as_any(&self) -> &dyn #AnyFP {
                self
            }
        }

        impl #impl_generics #query_struct_ for #ident #ty_generics #where_clause {
            fn property(&self, index: usize) -> #OptionFP<#property_<'_>> {
                match index {
                    #(#property_arms)*
                    _ => #OptionFP::None,
                }
            }

            #[inline]
            fn property_len(&self) -> usize {
                #field_len
            }
        }
    }
}
