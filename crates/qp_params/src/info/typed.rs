use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// Static access to a type's [`TypeInfo`].
///
/// Implemented by `#[derive(QueryParams)]` and, inside this crate, for
/// scalars, collections, maps and date-times. Manual implementations
/// usually store the info in a cell from [`crate::impls`]:
///
/// ```
/// use qp_params::impls::NonGenericTypeInfoCell;
/// use qp_params::info::{TypeInfo, Typed};
///
/// struct Sku(String);
///
/// impl Typed for Sku {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(TypeInfo::scalar::<Self>)
///     }
/// }
///
/// assert!(Sku::type_info().kind().is_scalar());
/// ```
pub trait Typed: 'static {
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Object-safe access to [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    fn query_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn query_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
