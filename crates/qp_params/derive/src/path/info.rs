use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn type_path_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::info::TypePath
    }
}

#[inline(always)]
pub(crate) fn typed_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::info::Type
    }
}

#[inline(always)]
pub(crate) fn type_info_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn struct_info_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn property_info_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::info::PropertyInfo
    }
}

#[inline(always)]
pub(crate) fn field_meta_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::info::FieldMeta
    }
}

#[inline(always)]
pub(crate) fn query_config_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::config::QueryConfig
    }
}

#[inline(always)]
pub(crate) fn case_strategy_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::case::CaseStrategy
    }
}

#[inline(always)]
pub(crate) fn date_time_format_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::config::DateTimeFormat
    }
}

#[inline(always)]
pub(crate) fn converter_fn_(qp_params_path: &syn::Path) -> TokenStream {
    quote! {
        #qp_params_path::convert::ConverterFn
    }
}
