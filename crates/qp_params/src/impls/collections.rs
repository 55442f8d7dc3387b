use alloc::boxed::Box;
use alloc::collections::{BTreeSet, LinkedList, VecDeque};
use alloc::vec::Vec;
use core::any::Any;
use core::hash::BuildHasher;
use std::collections::HashSet;

use crate::impls::GenericTypeInfoCell;
use crate::info::{TypeInfo, Typed};
use crate::value::{QueryRef, QuerySeq, QueryValue};

macro_rules! impl_collection {
    ($($ty:ident),* $(,)?) => {$(
        impl<T: Typed> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(TypeInfo::collection::<Self, T>)
            }
        }

        impl<T: QueryValue> QueryValue for $ty<T> {
            #[inline]
            fn query_ref(&self) -> QueryRef<'_> {
                QueryRef::Seq(self)
            }

            #[inline]
            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    )*};
}

impl_collection!(Vec, VecDeque, LinkedList, BTreeSet);

// Inherent `iter` and `len` are named explicitly, `self.iter()` would
// resolve to `QuerySeq::iter` itself.

impl<T: QueryValue> QuerySeq for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn QueryValue> + '_> {
        Box::new(<[T]>::iter(self).map(|item| item as &dyn QueryValue))
    }
}

impl<T: QueryValue> QuerySeq for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn QueryValue> + '_> {
        Box::new(VecDeque::iter(self).map(|item| item as &dyn QueryValue))
    }
}

impl<T: QueryValue> QuerySeq for LinkedList<T> {
    #[inline]
    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn QueryValue> + '_> {
        Box::new(LinkedList::iter(self).map(|item| item as &dyn QueryValue))
    }
}

impl<T: QueryValue> QuerySeq for BTreeSet<T> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn QueryValue> + '_> {
        Box::new(BTreeSet::iter(self).map(|item| item as &dyn QueryValue))
    }
}

// -----------------------------------------------------------------------------
// HashSet

impl<T: Typed, S: BuildHasher + 'static> Typed for HashSet<T, S> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(TypeInfo::collection::<Self, T>)
    }
}

impl<T: QueryValue, S: BuildHasher + 'static> QueryValue for HashSet<T, S> {
    #[inline]
    fn query_ref(&self) -> QueryRef<'_> {
        QueryRef::Seq(self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: QueryValue, S: BuildHasher + 'static> QuerySeq for HashSet<T, S> {
    #[inline]
    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn QueryValue> + '_> {
        Box::new(HashSet::iter(self).map(|item| item as &dyn QueryValue))
    }
}

// -----------------------------------------------------------------------------
// Array

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::array::<Self, T>(N))
    }
}

impl<T: QueryValue, const N: usize> QueryValue for [T; N] {
    #[inline]
    fn query_ref(&self) -> QueryRef<'_> {
        QueryRef::Seq(self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: QueryValue, const N: usize> QuerySeq for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn QueryValue> + '_> {
        Box::new(<[T]>::iter(self).map(|item| item as &dyn QueryValue))
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::info::{TypeKind, Typed};
    use crate::value::{QueryRef, QueryValue};

    fn items(value: &dyn QueryValue) -> Vec<String> {
        let QueryRef::Seq(seq) = value.query_ref() else {
            panic!("expected a sequence");
        };
        seq.iter()
            .map(|item| match item.query_ref() {
                QueryRef::Scalar(text) => text.into_owned(),
                QueryRef::Null => String::from("<null>"),
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn vec_items_in_order() {
        assert_eq!(items(&vec![3_u8, 1, 2]), ["3", "1", "2"]);
        assert_eq!(items(&vec![Some(1_u8), None]), ["1", "<null>"]);
    }

    #[test]
    fn sets_iterate_in_their_order() {
        let set: BTreeSet<&'static str> = ["b", "a"].into_iter().collect();
        assert_eq!(items(&set), ["a", "b"]);
    }

    #[test]
    fn arrays_record_capacity() {
        let TypeKind::Array { item, capacity } = <[u16; 4]>::type_info().kind() else {
            panic!("expected an array");
        };
        assert_eq!(*capacity, 4);
        assert!(item().ty().is::<u16>());
        assert_eq!(items(&[5_u16, 6]), ["5", "6"]);
    }

    #[test]
    fn generic_cells_are_per_instantiation() {
        assert!(<Vec<u8>>::type_info().ty().is::<Vec<u8>>());
        assert!(<Vec<i8>>::type_info().ty().is::<Vec<i8>>());
    }
}
