use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::any::Any;
use core::num::{
    NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize, NonZeroU8,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize,
};

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeInfo, Typed};
use crate::value::{QueryRef, QueryValue};

/// Scalars rendered through their `Display` implementation.
///
/// Floats never use scientific notation and drop a zero fraction,
/// `1.0_f64` renders as `1`.
macro_rules! impl_display_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(TypeInfo::scalar::<Self>)
            }
        }

        impl QueryValue for $ty {
            #[inline]
            fn query_ref(&self) -> QueryRef<'_> {
                QueryRef::Scalar(Cow::Owned(self.to_string()))
            }

            #[inline]
            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    )*};
}

/// Text types, borrowed without copying.
macro_rules! impl_str_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(TypeInfo::scalar::<Self>)
            }
        }

        impl QueryValue for $ty {
            #[inline]
            fn query_ref(&self) -> QueryRef<'_> {
                QueryRef::Scalar(Cow::Borrowed(AsRef::<str>::as_ref(self)))
            }

            #[inline]
            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    )*};
}

impl_display_scalar!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

impl_display_scalar!(
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroU128,
    NonZeroUsize,
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroI128,
    NonZeroIsize,
);

impl_display_scalar!(BigInt, BigUint);

// `Display` switches to exponent notation for large exponents.
impl Typed for BigDecimal {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(TypeInfo::scalar::<Self>)
    }
}

impl QueryValue for BigDecimal {
    #[inline]
    fn query_ref(&self) -> QueryRef<'_> {
        QueryRef::Scalar(Cow::Owned(self.to_plain_string()))
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl_str_scalar!(String, &'static str, Box<str>, Cow<'static, str>, Arc<str>);

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::string::String;

    use bigdecimal::BigDecimal;
    use num_bigint::BigInt;

    use crate::info::{TypeKind, Typed};
    use crate::value::{QueryRef, QueryValue};

    fn scalar(value: &dyn QueryValue) -> String {
        match value.query_ref() {
            QueryRef::Scalar(text) => text.into_owned(),
            other => panic!("expected a scalar, got {other:?}"),
        }
    }

    #[test]
    fn numbers_render_plainly() {
        assert_eq!(scalar(&42_u32), "42");
        assert_eq!(scalar(&-7_i64), "-7");
        assert_eq!(scalar(&1.0_f64), "1");
        assert_eq!(scalar(&2.5_f32), "2.5");
        assert_eq!(scalar(&1e21_f64), "1000000000000000000000");
        assert_eq!(scalar(&true), "true");
        assert_eq!(scalar(&'x'), "x");
    }

    #[test]
    fn big_integers_keep_every_digit() {
        let big: BigInt = "-123456789012345678901234567890".parse().unwrap();
        assert_eq!(scalar(&big), "-123456789012345678901234567890");
    }

    #[test]
    fn big_decimals_render_without_exponent() {
        let thousand: BigDecimal = "1E+3".parse().unwrap();
        assert_eq!(scalar(&thousand), "1000");
        let small: BigDecimal = "1.5E-7".parse().unwrap();
        assert_eq!(scalar(&small), "0.00000015");
        assert!(BigDecimal::type_info().kind().is_scalar());
    }

    #[test]
    fn text_is_borrowed() {
        let owned = String::from("hello");
        let QueryRef::Scalar(Cow::Borrowed(text)) = owned.query_ref() else {
            panic!("expected borrowed text");
        };
        assert_eq!(text, "hello");
        assert_eq!(scalar(&"static"), "static");
    }

    #[test]
    fn scalar_kind() {
        assert!(u8::type_info().kind().is_scalar());
        assert!(matches!(String::type_info().kind(), TypeKind::Scalar));
        assert!(<&'static str>::type_info().ty().is::<&'static str>());
    }
}
