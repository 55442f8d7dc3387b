use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::any::Any;
use core::hash::BuildHasher;
use std::collections::HashMap;

use indexmap::IndexMap;

use crate::impls::GenericTypeInfoCell;
use crate::info::{TypeInfo, Typed};
use crate::value::{QueryMap, QueryRef, QueryValue};

// Keys are used verbatim as query parameter names.

macro_rules! impl_map_value {
    ($ty:ident < K, V $(, $hasher:ident)? >) => {
        impl<K, V $(, $hasher)?> Typed for $ty<K, V $(, $hasher)?>
        where
            K: AsRef<str> + 'static,
            V: Typed,
            $($hasher: BuildHasher + 'static,)?
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(TypeInfo::map::<Self, V>)
            }
        }

        impl<K, V $(, $hasher)?> QueryValue for $ty<K, V $(, $hasher)?>
        where
            K: AsRef<str> + 'static,
            V: QueryValue,
            $($hasher: BuildHasher + 'static,)?
        {
            #[inline]
            fn query_ref(&self) -> QueryRef<'_> {
                QueryRef::Map(self)
            }

            #[inline]
            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        impl<K, V $(, $hasher)?> QueryMap for $ty<K, V $(, $hasher)?>
        where
            K: AsRef<str> + 'static,
            V: QueryValue,
            $($hasher: BuildHasher + 'static,)?
        {
            #[inline]
            fn len(&self) -> usize {
                $ty::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn QueryValue)> + '_> {
                Box::new($ty::iter(self).map(|(key, value)| (key.as_ref(), value as &dyn QueryValue)))
            }
        }
    };
}

impl_map_value!(BTreeMap<K, V>);
impl_map_value!(HashMap<K, V, S>);
impl_map_value!(IndexMap<K, V, S>);

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use indexmap::IndexMap;

    use crate::info::{TypeKind, Typed};
    use crate::value::{QueryRef, QueryValue};

    fn entries(value: &dyn QueryValue) -> Vec<(String, String)> {
        let QueryRef::Map(map) = value.query_ref() else {
            panic!("expected a map");
        };
        map.iter()
            .map(|(key, value)| match value.query_ref() {
                QueryRef::Scalar(text) => (String::from(key), text.into_owned()),
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn index_map_keeps_insertion_order() {
        let mut map = IndexMap::<String, u32>::new();
        map.insert(String::from("z"), 1);
        map.insert(String::from("a"), 2);
        assert_eq!(
            entries(&map),
            [(String::from("z"), String::from("1")), (String::from("a"), String::from("2"))]
        );
    }

    #[test]
    fn map_kind_points_at_values() {
        let TypeKind::Map { value } = <BTreeMap<&'static str, bool>>::type_info().kind() else {
            panic!("expected a map");
        };
        assert!(value().ty().is::<bool>());
    }
}
