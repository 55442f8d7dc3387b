use core::fmt;

use crate::info::{StructInfo, Type, Typed};

// -----------------------------------------------------------------------------
// DateTimeKind

/// The date-time representations understood by the marshaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeKind {
    /// A civil date, `jiff::civil::Date`.
    Date,
    /// A civil time of day, `jiff::civil::Time`.
    Time,
    /// A civil date and time, `jiff::civil::DateTime`.
    DateTime,
    /// A date-time in a time zone, `jiff::Zoned`.
    Zoned,
    /// An instant, `jiff::Timestamp`.
    Timestamp,
}

// -----------------------------------------------------------------------------
// TypeKind

/// What a described type looks like to the classifier.
///
/// Item, inner and value types are stored as function pointers so the
/// nested [`TypeInfo`] is only built on first access.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Renders as a single piece of text: numbers, booleans, chars,
    /// strings, big integers and unit-only enums.
    Scalar,
    /// A growable sequence (`Vec<T>`, `BTreeSet<T>`, ...).
    Collection { item: fn() -> &'static TypeInfo },
    /// A fixed-size array `[T; N]`.
    Array {
        item: fn() -> &'static TypeInfo,
        capacity: usize,
    },
    /// A value that may be absent, `Option<T>`.
    Nullable { inner: fn() -> &'static TypeInfo },
    /// A map with string keys.
    Map { value: fn() -> &'static TypeInfo },
    DateTime(DateTimeKind),
    Struct(StructInfo),
    /// A type without a schema the marshaller can use.
    Opaque,
}

impl TypeKind {
    /// Kind name for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::Collection { .. } => "Collection",
            Self::Array { .. } => "Array",
            Self::Nullable { .. } => "Nullable",
            Self::Map { .. } => "Map",
            Self::DateTime(_) => "DateTime",
            Self::Struct(_) => "Struct",
            Self::Opaque => "Opaque",
        }
    }

    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time description of a type: its [`Type`] and its [`TypeKind`].
///
/// Obtained through [`Typed::type_info`] and always `'static`.
///
/// # Examples
///
/// ```
/// use qp_params::info::{Typed, TypeKind};
///
/// let info = <Vec<u32> as Typed>::type_info();
/// let TypeKind::Collection { item } = info.kind() else { unreachable!() };
/// assert!(item().ty().is::<u32>());
/// ```
#[derive(Debug, Clone)]
pub struct TypeInfo {
    ty: Type,
    kind: TypeKind,
}

impl TypeInfo {
    #[inline]
    pub const fn new(ty: Type, kind: TypeKind) -> Self {
        Self { ty, kind }
    }

    pub const fn scalar<T: ?Sized + 'static>() -> Self {
        Self::new(Type::of::<T>(), TypeKind::Scalar)
    }

    pub const fn collection<T: ?Sized + 'static, I: Typed>() -> Self {
        Self::new(Type::of::<T>(), TypeKind::Collection { item: I::type_info })
    }

    pub const fn array<T: ?Sized + 'static, I: Typed>(capacity: usize) -> Self {
        Self::new(
            Type::of::<T>(),
            TypeKind::Array {
                item: I::type_info,
                capacity,
            },
        )
    }

    pub const fn nullable<T: ?Sized + 'static, I: Typed>() -> Self {
        Self::new(Type::of::<T>(), TypeKind::Nullable { inner: I::type_info })
    }

    pub const fn map<T: ?Sized + 'static, V: Typed>() -> Self {
        Self::new(Type::of::<T>(), TypeKind::Map { value: V::type_info })
    }

    pub const fn date_time<T: ?Sized + 'static>(kind: DateTimeKind) -> Self {
        Self::new(Type::of::<T>(), TypeKind::DateTime(kind))
    }

    pub const fn opaque<T: ?Sized + 'static>() -> Self {
        Self::new(Type::of::<T>(), TypeKind::Opaque)
    }

    /// Wraps a struct description, taking its [`Type`].
    pub fn structure(info: StructInfo) -> Self {
        Self::new(*info.ty(), TypeKind::Struct(info))
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Shorthand for `self.ty().path()`.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the struct description, if this is a struct.
    pub const fn as_struct(&self) -> Option<&StructInfo> {
        match &self.kind {
            TypeKind::Struct(info) => Some(info),
            _ => None,
        }
    }
}
