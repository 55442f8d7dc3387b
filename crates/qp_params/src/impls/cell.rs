//! Containers for static storage of type information and compiled schemas.
//!
//! - [`NonGenericTypeCell`]: a [`OnceLock`], for non-generic types.
//! - [`GenericTypeCell`]: a [`TypeIdMap`] behind a [`RwLock`]. A `static`
//!   inside a generic function is shared by every instantiation, so
//!   entries are keyed by the concrete type.
//!
//! Each holds either a [`TypeInfo`] or a [`SchemaSlot`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use qp_utils::TypeIdMap;

use crate::error::CompileError;
use crate::info::TypeInfo;
use crate::schema::{CompiledSchema, compile};

/// The cached outcome of compiling a type's schema.
pub type SchemaSlot = Result<CompiledSchema, CompileError>;

mod sealed {
    use super::{SchemaSlot, TypeInfo};

    pub trait CellValue: Send + Sync + 'static {}

    impl CellValue for TypeInfo {}
    impl CellValue for SchemaSlot {}
}

use sealed::CellValue;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// Static storage for a non-generic type.
pub struct NonGenericTypeCell<T: CellValue>(OnceLock<T>);

/// Stores the [`TypeInfo`] of a non-generic type.
///
/// See [`Typed`](crate::info::Typed) for an example.
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

/// Stores the compiled schema of a non-generic type.
pub type NonGenericSchemaCell = NonGenericTypeCell<SchemaSlot>;

impl<T: CellValue> NonGenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, initializing it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

impl NonGenericTypeCell<SchemaSlot> {
    /// Compiles the schema described by `info` once and returns it.
    ///
    /// A failed compilation is cached too and returned on every call.
    pub fn get_or_compile(
        &self,
        info: fn() -> &'static TypeInfo,
    ) -> Result<&CompiledSchema, CompileError> {
        self.get_or_init(|| compile(info()))
            .as_ref()
            .map_err(Clone::clone)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Static storage shared by every instantiation of a generic type.
pub struct GenericTypeCell<T: CellValue>(RwLock<TypeIdMap<&'static T>>);

/// Stores the [`TypeInfo`] of each instantiation of a generic type.
///
/// ```
/// use qp_params::impls::GenericTypeInfoCell;
/// use qp_params::info::{TypeInfo, Typed};
///
/// struct Wrapper<T>(T);
///
/// impl<T: Typed> Typed for Wrapper<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(TypeInfo::collection::<Self, T>)
///     }
/// }
///
/// assert!(Wrapper::<u8>::type_info().ty().is::<Wrapper<u8>>());
/// assert!(Wrapper::<i8>::type_info().ty().is::<Wrapper<i8>>());
/// ```
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Stores the compiled schema of each instantiation of a generic type.
pub type GenericSchemaCell = GenericTypeCell<SchemaSlot>;

impl<T: CellValue> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, inserting the result of `f` first if absent.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(value) => value,
            // `f` runs without holding the lock, it may touch other cells.
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl GenericTypeCell<SchemaSlot> {
    /// Compiles the schema of `G` once and returns it.
    pub fn get_or_compile<G: Any + ?Sized>(
        &self,
        info: fn() -> &'static TypeInfo,
    ) -> Result<&CompiledSchema, CompileError> {
        self.get_or_insert::<G>(|| compile(info()))
            .as_ref()
            .map_err(Clone::clone)
    }
}
