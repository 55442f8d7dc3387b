use crate::convert::ConverterFn;
use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// FieldMeta

/// Per-property metadata that shapes key resolution and encoding.
///
/// ```
/// use qp_params::info::FieldMeta;
///
/// const META: FieldMeta = FieldMeta::new().with_rename("q");
/// assert_eq!(META.rename(), Some("q"));
/// assert!(!META.ignored());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMeta {
    rename: Option<&'static str>,
    alias: Option<&'static str>,
    prefix: Option<&'static str>,
    ignored: bool,
    converter: Option<ConverterFn>,
}

impl FieldMeta {
    pub const fn new() -> Self {
        Self {
            rename: None,
            alias: None,
            prefix: None,
            ignored: false,
            converter: None,
        }
    }

    /// Key used verbatim, ahead of every other naming rule.
    pub const fn with_rename(mut self, rename: &'static str) -> Self {
        self.rename = Some(rename);
        self
    }

    /// External alias (such as a serde rename), used verbatim when there is no rename.
    pub const fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Local prefix that overrides the configured global prefix.
    pub const fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub const fn with_ignored(mut self, ignored: bool) -> Self {
        self.ignored = ignored;
        self
    }

    pub const fn with_converter(mut self, converter: ConverterFn) -> Self {
        self.converter = Some(converter);
        self
    }

    #[inline]
    pub const fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    #[inline]
    pub const fn alias(&self) -> Option<&'static str> {
        self.alias
    }

    #[inline]
    pub const fn prefix(&self) -> Option<&'static str> {
        self.prefix
    }

    #[inline]
    pub const fn ignored(&self) -> bool {
        self.ignored
    }

    #[inline]
    pub const fn converter(&self) -> Option<&ConverterFn> {
        self.converter.as_ref()
    }
}

// -----------------------------------------------------------------------------
// PropertyInfo

/// A record component, or a class-like field carrying metadata.
///
/// `index` is the position passed to
/// [`QueryStruct::property`](crate::value::QueryStruct::property).
#[derive(Debug, Clone)]
pub struct PropertyInfo {
    name: &'static str,
    index: usize,
    // Built on first access, which also lets a type name itself.
    type_info: fn() -> &'static TypeInfo,
    meta: FieldMeta,
}

impl PropertyInfo {
    #[inline]
    pub const fn new<T: Typed>(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            type_info: T::type_info,
            meta: FieldMeta::new(),
        }
    }

    /// A property whose type has no [`Typed`] implementation.
    ///
    /// Used for ignored properties and properties handled by a converter.
    #[inline]
    pub const fn opaque<T: ?Sized + 'static>(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            type_info: crate::impls::opaque_info::<T>,
            meta: FieldMeta::new(),
        }
    }

    #[inline]
    pub const fn with_meta(mut self, meta: FieldMeta) -> Self {
        self.meta = meta;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub(crate) const fn type_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.type_info
    }

    #[inline]
    pub const fn meta(&self) -> &FieldMeta {
        &self.meta
    }
}

// -----------------------------------------------------------------------------
// AccessorInfo

/// An accessor method of a class-like type.
///
/// Only public, non-static accessors without arguments named `get_x`,
/// `getX`, or `is_x`/`isX` returning `bool` describe a property.
///
/// ```
/// use qp_params::info::AccessorInfo;
///
/// let getter = AccessorInfo::new::<String>("get_name", 0);
/// assert!(getter.is_public() && !getter.is_static());
///
/// let helper = AccessorInfo::new::<String>("get_label", 1).with_arity(1);
/// assert_eq!(helper.arity(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AccessorInfo {
    name: &'static str,
    index: usize,
    return_info: fn() -> &'static TypeInfo,
    public: bool,
    is_static: bool,
    arity: usize,
}

impl AccessorInfo {
    /// A public, non-static, zero-argument accessor returning `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            return_info: T::type_info,
            public: true,
            is_static: false,
            arity: 0,
        }
    }

    pub const fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub const fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Number of arguments besides the receiver.
    pub const fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn return_info(&self) -> &'static TypeInfo {
        (self.return_info)()
    }

    #[inline]
    pub(crate) const fn return_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.return_info
    }

    #[inline]
    pub const fn is_public(&self) -> bool {
        self.public
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline]
    pub const fn arity(&self) -> usize {
        self.arity
    }
}
