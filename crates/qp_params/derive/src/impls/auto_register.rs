use crate::derive_data::QueryMeta;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &QueryMeta) -> proc_macro2::TokenStream {
    if let Some(span) = meta.attrs().auto_register {
        // Invalid for generic types.
        if meta.impl_with_generic() {
            return crate::utils::empty();
        }

        let qp_params_path = meta.qp_params_path();
        let auto_register_ = crate::path::auto_register_(qp_params_path);
        let ident = meta.ident();

        quote::quote_spanned! { span =>
            #auto_register_::inventory::submit!{
                #auto_register_::__AutoRegisterFunc(
                    <#ident as #auto_register_::__RegisterType>::__register
                )
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &QueryMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
