//! Runtime views over values.
//!
//! The marshaller never sees concrete types. It reads a value through
//! [`QueryValue::query_ref`], which exposes one of a few [`QueryRef`]
//! forms, and reads struct properties by index through [`QueryStruct`].
//!
//! ## Menu
//!
//! - [`QueryValue`]: anything that can appear as a property value.
//! - [`QueryRef`]: the borrowed form of a value (null, text, sequence, map, date-time, struct).
//! - [`QuerySeq`] / [`QueryMap`]: iteration over sequence items and map entries.
//! - [`QueryStruct`]: indexed access to a described type's properties.
//! - [`Property`]: a borrowed, owned or opaque property value.
//! - [`DateTimeRef`]: a borrowed `jiff` date-time.

// -----------------------------------------------------------------------------
// Modules

mod property;
mod query_ref;

// -----------------------------------------------------------------------------
// Exports

pub use property::Property;
pub use query_ref::{DateTimeRef, QueryRef};

use alloc::boxed::Box;
use core::any::Any;

// -----------------------------------------------------------------------------
// QueryValue

/// A value the marshaller can read.
///
/// Implemented for scalars, `Option`, `Box`, std collections and maps,
/// `jiff` date-times and `num-bigint` integers; derived by
/// `#[derive(QueryParams)]`.
///
/// ```
/// use std::any::Any;
/// use std::borrow::Cow;
/// use qp_params::value::{QueryRef, QueryValue};
///
/// struct Sku(u32);
///
/// impl QueryValue for Sku {
///     fn query_ref(&self) -> QueryRef<'_> {
///         QueryRef::Scalar(Cow::Owned(format!("SKU-{:05}", self.0)))
///     }
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// assert!(matches!(Sku(7).query_ref(), QueryRef::Scalar(s) if s == "SKU-00007"));
/// ```
pub trait QueryValue: Any {
    /// The borrowed form of this value.
    fn query_ref(&self) -> QueryRef<'_>;

    fn as_any(&self) -> &dyn Any;

    /// Name of the concrete type, for diagnostics.
    fn query_type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

// -----------------------------------------------------------------------------
// QuerySeq

/// Ordered items of a collection or array.
pub trait QuerySeq {
    fn len(&self) -> usize;

    /// Items in iteration order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn QueryValue> + '_>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// QueryMap

/// Entries of a map with string keys.
pub trait QueryMap {
    fn len(&self) -> usize;

    /// Entries in the map's iteration order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn QueryValue)> + '_>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// QueryStruct

/// Indexed property access for a described type.
///
/// The index is [`PropertyInfo::index`] for record components and
/// [`AccessorInfo::index`] for class-like accessors.
///
/// [`PropertyInfo::index`]: crate::info::PropertyInfo::index
/// [`AccessorInfo::index`]: crate::info::AccessorInfo::index
pub trait QueryStruct: QueryValue {
    /// The value at `index`, or `None` if there is no readable property there.
    fn property(&self, index: usize) -> Option<Property<'_>>;

    /// Number of indices this type answers for.
    fn property_len(&self) -> usize;
}
