//! [`Typed`] and [`QueryValue`] implementations for foreign types, and
//! the static cells used to implement them.
//!
//! ## Implemented Menu
//!
//! - Scalars: `bool`, `char`, `i8`-`i128`, `isize`, `u8`-`u128`, `usize`,
//!   `f32`, `f64`, `NonZero*`, `String`, `&'static str`, `Box<str>`,
//!   `Cow<'static, str>`, `Arc<str>`, `num_bigint::BigInt`, `num_bigint::BigUint`,
//!   `bigdecimal::BigDecimal`.
//! - Nullable: `Option<T>`. `Box<T>` is transparent.
//! - Collections: `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`, `BTreeSet<T>`,
//!   `HashSet<T, S>`; arrays `[T; N]`.
//! - Maps with string keys: `BTreeMap<K, V>`, `HashMap<K, V, S>`, `IndexMap<K, V, S>`.
//! - Date-times: `jiff::civil::{Date, Time, DateTime}`, `jiff::Zoned`, `jiff::Timestamp`.
//!
//! [`Typed`]: crate::info::Typed
//! [`QueryValue`]: crate::value::QueryValue

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod collections;
mod date_time;
mod maps;
mod option;
mod scalars;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeCell, NonGenericTypeCell, SchemaSlot};
pub use cell::{GenericSchemaCell, NonGenericSchemaCell};
pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};

use crate::info::TypeInfo;

/// An [`Opaque`](crate::info::TypeKind::Opaque) [`TypeInfo`] for any type.
///
/// Gives a type description to properties whose type is never read by
/// the marshaller.
pub fn opaque_info<T: ?Sized + 'static>() -> &'static TypeInfo {
    static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
    CELL.get_or_insert::<T>(TypeInfo::opaque::<T>)
}
