use alloc::boxed::Box;
use core::any::Any;

use crate::impls::GenericTypeInfoCell;
use crate::info::{TypeInfo, Typed};
use crate::value::{QueryRef, QueryValue};

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(TypeInfo::nullable::<Self, T>)
    }
}

impl<T: QueryValue> QueryValue for Option<T> {
    #[inline]
    fn query_ref(&self) -> QueryRef<'_> {
        match self {
            Some(value) => value.query_ref(),
            None => QueryRef::Null,
        }
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// `Box<T>` is described as `T`, which allows recursive struct types.
impl<T: Typed> Typed for Box<T> {
    #[inline]
    fn type_info() -> &'static TypeInfo {
        T::type_info()
    }
}

impl<T: QueryValue> QueryValue for Box<T> {
    #[inline]
    fn query_ref(&self) -> QueryRef<'_> {
        (**self).query_ref()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use crate::info::{TypeKind, Typed};
    use crate::value::{QueryRef, QueryValue};

    #[test]
    fn none_is_null() {
        assert!(None::<u32>.query_ref().is_null());
        assert!(matches!(Some(3_u32).query_ref(), QueryRef::Scalar(s) if s == "3"));
    }

    #[test]
    fn nested_options() {
        let TypeKind::Nullable { inner } = <Option<Option<u8>>>::type_info().kind() else {
            panic!("expected nullable");
        };
        assert!(inner().ty().is::<Option<u8>>());
        assert!(Some(None::<u8>).query_ref().is_null());
    }

    #[test]
    fn box_is_transparent() {
        assert!(<Box<u16>>::type_info().ty().is::<u16>());
        assert!(matches!(Box::new(9_u16).query_ref(), QueryRef::Scalar(s) if s == "9"));
    }
}
