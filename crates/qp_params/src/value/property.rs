use alloc::boxed::Box;
use core::any::Any;

use crate::value::QueryValue;

/// A property value handed out by [`QueryStruct::property`].
///
/// Record components are borrowed. Class-like accessors may compute a new
/// value and return it owned. Values consumed only by a converter do not
/// need to implement [`QueryValue`] and are passed as [`Any`].
///
/// [`QueryStruct::property`]: crate::value::QueryStruct::property
pub enum Property<'a> {
    Borrowed(&'a dyn QueryValue),
    Owned(Box<dyn QueryValue>),
    Opaque(&'a dyn Any),
}

impl<'a> Property<'a> {
    /// Boxes a computed value.
    #[inline]
    pub fn owned(value: impl QueryValue) -> Self {
        Self::Owned(Box::new(value))
    }

    /// The readable value, `None` for [`Property::Opaque`].
    pub fn value(&self) -> Option<&dyn QueryValue> {
        match self {
            Self::Borrowed(value) => Some(*value),
            Self::Owned(value) => Some(&**value),
            Self::Opaque(_) => None,
        }
    }

    /// The value as [`Any`], for converters.
    pub fn as_any(&self) -> &dyn Any {
        match self {
            Self::Borrowed(value) => value.as_any(),
            Self::Owned(value) => (**value).as_any(),
            Self::Opaque(value) => *value,
        }
    }
}

impl core::fmt::Debug for Property<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Borrowed(v) => write!(f, "Borrowed({})", v.query_type_name()),
            Self::Owned(v) => write!(f, "Owned({})", v.query_type_name()),
            Self::Opaque(_) => f.pad("Opaque"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Property;
    use alloc::string::String;

    #[test]
    fn any_sees_the_inner_type() {
        let text = String::from("x");
        let borrowed = Property::Borrowed(&text);
        assert!(borrowed.as_any().is::<String>());

        let owned = Property::owned(5_u8);
        assert!(owned.as_any().is::<u8>());
        assert!(owned.value().is_some());

        let opaque = Property::Opaque(&1.5_f32);
        assert!(opaque.value().is_none());
        assert!(opaque.as_any().is::<f32>());
    }
}
