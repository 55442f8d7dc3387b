use core::any::Any;

use jiff::civil::{Date, DateTime, Time};
use jiff::{Timestamp, Zoned};

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{DateTimeKind, TypeInfo, Typed};
use crate::value::{DateTimeRef, QueryRef, QueryValue};

macro_rules! impl_date_time {
    ($($ty:ident => $kind:ident),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::date_time::<Self>(DateTimeKind::$kind))
            }
        }
    )*};
}

impl_date_time! {
    Date => Date,
    Time => Time,
    DateTime => DateTime,
    Zoned => Zoned,
    Timestamp => Timestamp,
}

impl QueryValue for Date {
    fn query_ref(&self) -> QueryRef<'_> {
        QueryRef::DateTime(DateTimeRef::Date(*self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl QueryValue for Time {
    fn query_ref(&self) -> QueryRef<'_> {
        QueryRef::DateTime(DateTimeRef::Time(*self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl QueryValue for DateTime {
    fn query_ref(&self) -> QueryRef<'_> {
        QueryRef::DateTime(DateTimeRef::DateTime(*self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl QueryValue for Zoned {
    fn query_ref(&self) -> QueryRef<'_> {
        QueryRef::DateTime(DateTimeRef::Zoned(self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl QueryValue for Timestamp {
    fn query_ref(&self) -> QueryRef<'_> {
        QueryRef::DateTime(DateTimeRef::Timestamp(*self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::info::{DateTimeKind, TypeKind, Typed};
    use crate::value::{DateTimeRef, QueryRef, QueryValue};

    #[test]
    fn date_time_kinds() {
        assert!(matches!(
            jiff::civil::Date::type_info().kind(),
            TypeKind::DateTime(DateTimeKind::Date)
        ));
        assert!(matches!(
            jiff::Timestamp::type_info().kind(),
            TypeKind::DateTime(DateTimeKind::Timestamp)
        ));
    }

    #[test]
    fn date_time_values() {
        let value = date(2024, 3, 9).at(14, 5, 0, 0);
        let QueryRef::DateTime(DateTimeRef::DateTime(seen)) = value.query_ref() else {
            panic!("expected a date-time");
        };
        assert_eq!(seen, value);
    }
}
