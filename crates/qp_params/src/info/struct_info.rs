use alloc::boxed::Box;

use crate::config::QueryConfig;
use crate::info::{AccessorInfo, PropertyInfo, Type, TypePath};

// -----------------------------------------------------------------------------
// SchemaSource

/// Where a struct's properties come from.
#[derive(Debug, Clone)]
pub enum SchemaSource {
    /// Declared components, read directly, in declaration order.
    Record(Box<[PropertyInfo]>),
    /// Accessor methods in declaration order, with metadata looked up on
    /// the same-named field.
    Class {
        accessors: Box<[AccessorInfo]>,
        fields: Box<[PropertyInfo]>,
    },
}

// -----------------------------------------------------------------------------
// StructInfo

/// The schema of a record-like or class-like type.
///
/// # Examples
///
/// ```
/// use qp_params::derive::QueryParams;
/// use qp_params::info::{SchemaSource, Typed};
///
/// #[derive(QueryParams)]
/// struct Page {
///     number: u32,
///     #[query(ignore)]
///     cursor: String,
/// }
///
/// let info = Page::type_info().as_struct().unwrap();
/// let SchemaSource::Record(components) = info.source() else { unreachable!() };
/// assert_eq!(components.len(), 2);
/// assert!(info.field("cursor").unwrap().meta().ignored());
/// ```
#[derive(Debug, Clone)]
pub struct StructInfo {
    ty: Type,
    source: SchemaSource,
    config: QueryConfig,
}

impl StructInfo {
    /// A record-like type. Component order is the slice order.
    pub fn record<T: TypePath + ?Sized>(components: &[PropertyInfo]) -> Self {
        Self {
            ty: Type::of_path::<T>(),
            source: SchemaSource::Record(components.into()),
            config: QueryConfig::new(),
        }
    }

    /// A class-like type. Accessor order is the slice order.
    pub fn class<T: TypePath + ?Sized>(accessors: &[AccessorInfo], fields: &[PropertyInfo]) -> Self {
        Self {
            ty: Type::of_path::<T>(),
            source: SchemaSource::Class {
                accessors: accessors.into(),
                fields: fields.into(),
            },
            config: QueryConfig::new(),
        }
    }

    #[inline]
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub const fn source(&self) -> &SchemaSource {
        &self.source
    }

    #[inline]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Finds a record component or class field by name.
    pub fn field(&self, name: &str) -> Option<&PropertyInfo> {
        let fields = match &self.source {
            SchemaSource::Record(components) => components,
            SchemaSource::Class { fields, .. } => fields,
        };
        fields.iter().find(|f| f.name() == name)
    }
}
