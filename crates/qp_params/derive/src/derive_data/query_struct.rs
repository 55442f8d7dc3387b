use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Field, Ident, Type};

use super::{FieldAttributes, QueryMeta};

/// A named field of a derived struct.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
    /// Position in declaration order, the `QueryStruct` index.
    pub index: usize,
}

impl StructField<'_> {
    #[inline]
    pub fn ident(&self) -> &Ident {
        // Only structs with named fields are accepted.
        self.data.ident.as_ref().expect("named field")
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.data.ty
    }

    /// The property name, without the `r#` of raw identifiers.
    pub fn name(&self) -> String {
        self.ident().unraw().to_string()
    }

    /// Generates this field's `PropertyInfo`.
    ///
    /// ```ignore
    /// _path_::PropertyInfo::new::<FieldTy>("name", 0)
    ///     .with_meta( ... )
    /// ```
    pub fn to_info_tokens(&self, meta: &QueryMeta) -> TokenStream {
        let qp_params_path = meta.qp_params_path();
        let property_info_ = crate::path::property_info_(qp_params_path);

        let name = self.name();
        let index = self.index;
        let ty = self.ty();
        let with_meta = self.attrs.get_meta_expression(qp_params_path, ty);

        if self.attrs.is_opaque() {
            quote! {
                #property_info_::opaque::<#ty>(#name, #index) #with_meta
            }
        } else {
            quote! {
                #property_info_::new::<#ty>(#name, #index) #with_meta
            }
        }
    }
}

/// A struct with named fields.
pub(crate) struct QueryStruct<'a> {
    meta: QueryMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> QueryStruct<'a> {
    pub(super) fn new(mut meta: QueryMeta<'a>, fields: Vec<StructField<'a>>) -> Self {
        let params = meta.type_params();
        let active_types = fields
            .iter()
            .filter(|field| !field.attrs.is_opaque())
            .map(StructField::ty)
            .filter(|ty| crate::utils::mentions_any(quote!(#ty), &params))
            .cloned()
            .collect();
        meta.set_active_types(active_types);

        Self { meta, fields }
    }

    #[inline]
    pub fn meta(&self) -> &QueryMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Generates the struct's `TypeInfo`.
    ///
    /// ```ignore
    /// _path_::TypeInfo::structure(
    ///     _path_::StructInfo::record::<Self>(&[ ... ])
    ///         .with_config( ... )
    /// )
    /// ```
    pub fn to_info_tokens(&self) -> TokenStream {
        let qp_params_path = self.meta.qp_params_path();
        let type_info_ = crate::path::type_info_(qp_params_path);
        let struct_info_ = crate::path::struct_info_(qp_params_path);

        let properties = self.fields.iter().map(|field| field.to_info_tokens(&self.meta));

        let with_config = if self.meta.attrs().has_config() {
            let config = self.meta.attrs().get_config_expression(qp_params_path);
            quote! { .with_config(#config) }
        } else {
            crate::utils::empty()
        };

        quote! {
            #type_info_::structure(
                #struct_info_::record::<Self>(&[
                    #(#properties,)*
                ])
                #with_config
            )
        }
    }
}
