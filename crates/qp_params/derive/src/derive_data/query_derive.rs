use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericParam};

use super::{
    EnumVariant, FieldAttributes, QueryEnum, QueryMeta, QueryStruct, StructField,
    TypeAttributes, VariantAttributes,
};

/// The parsed input of `#[derive(QueryParams)]`.
pub(crate) enum QueryDerive<'a> {
    /// `struct T { ... }` or `struct T;`.
    Struct(QueryStruct<'a>),
    /// `enum T { A, B }`.
    Enum(QueryEnum<'a>),
}

impl<'a> QueryDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if let Some(GenericParam::Lifetime(param)) = input
            .generics
            .params
            .iter()
            .find(|param| matches!(param, GenericParam::Lifetime(_)))
        {
            return Err(syn::Error::new(
                param.span(),
                "QueryParams types must be `'static`, lifetime parameters are not supported",
            ));
        }

        let attrs = TypeAttributes::parse_attributes(&input.attrs)?;

        match &input.data {
            Data::Struct(data) => {
                let fields = match &data.fields {
                    Fields::Named(fields) => fields
                        .named
                        .iter()
                        .enumerate()
                        .map(|(index, data)| {
                            Ok(StructField {
                                data,
                                attrs: FieldAttributes::parse_attributes(&data.attrs)?,
                                index,
                            })
                        })
                        .collect::<syn::Result<Vec<_>>>()?,
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(fields) => {
                        return Err(syn::Error::new(
                            fields.span(),
                            "QueryParams requires named fields, tuple structs have no property names",
                        ));
                    }
                };
                let meta = QueryMeta::new(attrs, &input.ident, &input.generics);
                Ok(Self::Struct(QueryStruct::new(meta, fields)))
            }
            Data::Enum(data) => {
                if attrs.has_config() || attrs.auto_register.is_some() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "enums are rendered as scalars and take no type level query attributes",
                    ));
                }
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "QueryParams cannot be derived for enums without variants",
                    ));
                }
                let variants = data
                    .variants
                    .iter()
                    .map(|variant| {
                        if !matches!(variant.fields, Fields::Unit) {
                            return Err(syn::Error::new(
                                variant.fields.span(),
                                "QueryParams enums can only have unit variants",
                            ));
                        }
                        Ok(EnumVariant {
                            data: variant,
                            attrs: VariantAttributes::parse_attributes(&variant.attrs)?,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;
                let meta = QueryMeta::new(attrs, &input.ident, &input.generics);
                Ok(Self::Enum(QueryEnum::new(meta, variants)))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "QueryParams cannot be derived for unions",
            )),
        }
    }
}
