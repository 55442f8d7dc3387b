use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// Stable path and name of a described type.
///
/// Unlike [`core::any::type_name`], the derive macro builds the path from
/// `module_path!()`, so it does not change between compiler versions.
/// Paths never start with `::`.
///
/// ```
/// use qp_params::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
/// ```
pub trait TypePath: 'static {
    /// Fully qualified path, unique per type.
    fn type_path() -> &'static str;

    /// Short name without module path, may repeat across modules.
    fn type_name() -> &'static str;

    /// Module where the type is defined.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// Type

/// A [`TypeId`] together with lookups for the type's path and short name.
///
/// Built either from a [`TypePath`] implementation ([`Type::of_path`]) or
/// from [`core::any::type_name`] ([`Type::of`]).
///
/// # Examples
///
/// ```
/// use qp_params::info::Type;
///
/// let ty = Type::of::<Vec<String>>();
/// assert!(ty.is::<Vec<String>>());
/// assert_eq!(ty.name(), "Vec<alloc::string::String>");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    id: TypeId,
    path: fn() -> &'static str,
    name: fn() -> &'static str,
}

impl Type {
    /// Describes `T` through [`core::any::type_name`].
    #[inline]
    pub const fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>,
            name: short_type_name::<T>,
        }
    }

    /// Describes `T` through its [`TypePath`] implementation.
    #[inline]
    pub const fn of_path<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path,
            name: T::type_name,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &'static str {
        (self.path)()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    short_name(core::any::type_name::<T>())
}

// Strips the module path of the outermost type, keeping generics intact.
pub(crate) fn short_name(path: &'static str) -> &'static str {
    let head = path.find('<').unwrap_or(path.len());
    match path[..head].rfind("::") {
        Some(index) => &path[index + 2..],
        None => path,
    }
}
