//! User-supplied converters.
//!
//! A converter replaces the default encoding of one property. It receives
//! the property's resolved key and value and returns the pairs to merge
//! into the output, overwriting keys that already exist.
//!
//! ```
//! use qp_params::QueryParams;
//! use qp_params::convert::ParamConverter;
//! use qp_params::derive::QueryParams;
//! use qp_params::error::ConvertError;
//! use qp_params::marshal::ParamMap;
//!
//! struct PriceRange(f64, f64);
//!
//! struct RangeConverter;
//!
//! impl ParamConverter<PriceRange> for RangeConverter {
//!     fn convert(key: &str, value: &PriceRange) -> Result<ParamMap, ConvertError> {
//!         let mut out = ParamMap::new();
//!         out.insert_one(format!("{key}_min"), format!("{:.1}", value.0));
//!         out.insert_one(format!("{key}_max"), format!("{:.1}", value.1));
//!         Ok(out)
//!     }
//! }
//!
//! #[derive(QueryParams)]
//! struct Search {
//!     #[query(converter = RangeConverter)]
//!     price: PriceRange,
//! }
//!
//! let search = Search { price: PriceRange(1.0, 3.0) };
//! assert_eq!(search.to_query_string().unwrap(), "price_min=1.0&price_max=3.0");
//! ```

use core::any::Any;
use core::fmt;

use crate::error::ConvertError;
use crate::info::Type;
use crate::marshal::ParamMap;

// -----------------------------------------------------------------------------
// ParamConverter

/// Turns a value of type `T` into query parameters.
///
/// Called once per property per marshal call. An error aborts the whole
/// marshal call.
pub trait ParamConverter<T: ?Sized> {
    fn convert(key: &str, value: &T) -> Result<ParamMap, ConvertError>;
}

// -----------------------------------------------------------------------------
// ConverterFn

/// A type-erased [`ParamConverter`] bound to its value type.
#[derive(Clone, Copy)]
pub struct ConverterFn {
    target: Type,
    call: fn(&str, &dyn Any) -> Result<ParamMap, ConvertError>,
}

impl ConverterFn {
    /// Erases converter `C` for values of type `T`.
    pub const fn of<T: Any, C: ParamConverter<T>>() -> Self {
        Self {
            target: Type::of::<T>(),
            call: call_erased::<T, C>,
        }
    }

    /// The value type this converter accepts.
    #[inline]
    pub const fn target(&self) -> &Type {
        &self.target
    }

    /// Runs the converter.
    ///
    /// Fails with [`ConvertError::TypeMismatch`] if `value` is not of the
    /// target type.
    #[inline]
    pub fn convert(&self, key: &str, value: &dyn Any) -> Result<ParamMap, ConvertError> {
        (self.call)(key, value)
    }
}

impl fmt::Debug for ConverterFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterFn")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

fn call_erased<T: Any, C: ParamConverter<T>>(
    key: &str,
    value: &dyn Any,
) -> Result<ParamMap, ConvertError> {
    match value.downcast_ref::<T>() {
        Some(value) => C::convert(key, value),
        None => Err(ConvertError::TypeMismatch {
            expected: core::any::type_name::<T>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConverterFn, ParamConverter};
    use crate::error::ConvertError;
    use crate::marshal::ParamMap;
    use alloc::format;

    struct Doubled;

    impl ParamConverter<u32> for Doubled {
        fn convert(key: &str, value: &u32) -> Result<ParamMap, ConvertError> {
            let mut out = ParamMap::new();
            out.insert_one(key, format!("{}", value * 2));
            Ok(out)
        }
    }

    #[test]
    fn erased_call() {
        let conv = ConverterFn::of::<u32, Doubled>();
        assert!(conv.target().is::<u32>());

        let out = conv.convert("n", &21_u32).unwrap();
        assert_eq!(out.get("n"), Some(&[format!("42")][..]));
    }

    #[test]
    fn type_mismatch() {
        let conv = ConverterFn::of::<u32, Doubled>();
        let err = conv.convert("n", &"text").unwrap_err();
        assert!(matches!(err, ConvertError::TypeMismatch { .. }));
    }
}
