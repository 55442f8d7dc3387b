use alloc::string::ToString;
use core::fmt;

use crate::error::CompileError;
use crate::info::{TypeInfo, TypeKind};
use crate::schema::PropertyDescriptor;

// -----------------------------------------------------------------------------
// ElementShape

/// How the items of a collection, array, optional or map are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    Scalar,
    DateTime,
}

// -----------------------------------------------------------------------------
// ValueShape

/// The marshalling strategy of a property, computed once at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A single text value.
    Scalar,
    /// A growable sequence, exploded or comma-joined.
    Collection(ElementShape),
    /// A fixed-size array, rendered like a collection.
    FixedArray(ElementShape),
    /// `Option<Option<T>>`: emitted only when a value is present.
    Optional(ElementShape),
    /// Entries emitted under their own keys.
    MapLike(ElementShape),
    DateTime,
    /// A struct whose properties are flattened under a prefix chain.
    Nested,
    /// Rendered by a user converter.
    Converted,
}

impl ValueShape {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::Collection(_) => "Collection",
            Self::FixedArray(_) => "FixedArray",
            Self::Optional(_) => "Optional",
            Self::MapLike(_) => "MapLike",
            Self::DateTime => "DateTime",
            Self::Nested => "Nested",
            Self::Converted => "Converted",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// classify

/// Maps a property's declared type to its [`ValueShape`].
///
/// First match wins: a converter, then scalars, collections, arrays,
/// optionals, maps, date-times, and finally nested structs. A single
/// `Option` layer only marks the property as nullable and is looked
/// through; `Option<Option<T>>` is [`ValueShape::Optional`].
///
/// # Errors
///
/// [`CompileError::UnsupportedElement`] if the items of a collection,
/// array, optional or map cannot be rendered as text.
///
/// ```
/// use qp_params::derive::QueryParams;
/// use qp_params::info::Typed;
/// use qp_params::schema::{ElementShape, ValueShape, classify, extract};
///
/// #[derive(QueryParams)]
/// struct Search {
///     q: Option<String>,
///     tags: Vec<String>,
///     cursor: Option<Option<u64>>,
/// }
///
/// let info = Search::type_info().as_struct().unwrap();
/// let shapes: Vec<_> = extract(info).iter().map(|p| classify(p).unwrap()).collect();
/// assert_eq!(
///     shapes,
///     [
///         ValueShape::Scalar,
///         ValueShape::Collection(ElementShape::Scalar),
///         ValueShape::Optional(ElementShape::Scalar),
///     ]
/// );
/// ```
pub fn classify(property: &PropertyDescriptor) -> Result<ValueShape, CompileError> {
    if property.meta().converter().is_some() {
        return Ok(ValueShape::Converted);
    }

    let mut info = property.type_info();
    if let TypeKind::Nullable { inner } = info.kind() {
        info = inner();
    }

    let element = |item: &'static TypeInfo| {
        element_shape(item).ok_or_else(|| CompileError::UnsupportedElement {
            property: property.name().to_string(),
            element: item.type_path(),
        })
    };

    Ok(match info.kind() {
        TypeKind::Scalar => ValueShape::Scalar,
        TypeKind::Collection { item } => ValueShape::Collection(element(item())?),
        TypeKind::Array { item, .. } => ValueShape::FixedArray(element(item())?),
        TypeKind::Nullable { inner } => ValueShape::Optional(element(inner())?),
        TypeKind::Map { value } => ValueShape::MapLike(element(value())?),
        TypeKind::DateTime(_) => ValueShape::DateTime,
        TypeKind::Struct(_) | TypeKind::Opaque => ValueShape::Nested,
    })
}

/// Items may be nullable, nulls are dropped at marshal time.
fn element_shape(info: &'static TypeInfo) -> Option<ElementShape> {
    match info.kind() {
        TypeKind::Scalar => Some(ElementShape::Scalar),
        TypeKind::DateTime(_) => Some(ElementShape::DateTime),
        TypeKind::Nullable { inner } => element_shape(inner()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{ElementShape, ValueShape, classify};
    use crate::convert::{ConverterFn, ParamConverter};
    use crate::error::{CompileError, ConvertError};
    use crate::info::{FieldMeta, PropertyInfo, StructInfo, TypePath};
    use crate::marshal::ParamMap;
    use crate::schema::extract;

    struct Sample;

    impl TypePath for Sample {
        fn type_path() -> &'static str {
            "tests::Sample"
        }
        fn type_name() -> &'static str {
            "Sample"
        }
    }

    struct Range;

    struct RangeConverter;

    impl ParamConverter<Range> for RangeConverter {
        fn convert(_: &str, _: &Range) -> Result<ParamMap, ConvertError> {
            Ok(ParamMap::new())
        }
    }

    fn shapes(components: &[PropertyInfo]) -> Vec<Result<ValueShape, CompileError>> {
        let info = StructInfo::record::<Sample>(components);
        extract(&info).iter().map(classify).collect()
    }

    #[test]
    fn first_match_wins() {
        let converter = FieldMeta::new().with_converter(ConverterFn::of::<Range, RangeConverter>());
        let shapes = shapes(&[
            PropertyInfo::opaque::<Range>("range", 0).with_meta(converter),
            PropertyInfo::new::<Option<u32>>("page", 1),
            PropertyInfo::new::<[u8; 2]>("pair", 2),
            PropertyInfo::new::<Vec<Option<jiff::civil::Date>>>("days", 3),
            PropertyInfo::new::<BTreeMap<String, u8>>("extra", 4),
            PropertyInfo::new::<Option<jiff::Timestamp>>("since", 5),
            PropertyInfo::new::<Option<Option<jiff::civil::Date>>>("until", 6),
        ]);
        let shapes: Vec<_> = shapes.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            shapes,
            [
                ValueShape::Converted,
                ValueShape::Scalar,
                ValueShape::FixedArray(ElementShape::Scalar),
                ValueShape::Collection(ElementShape::DateTime),
                ValueShape::MapLike(ElementShape::Scalar),
                ValueShape::DateTime,
                ValueShape::Optional(ElementShape::DateTime),
            ]
        );
    }

    #[test]
    fn nested_element_is_rejected() {
        let shapes = shapes(&[PropertyInfo::new::<Vec<Vec<u8>>>("grid", 0)]);
        assert!(matches!(
            &shapes[0],
            Err(CompileError::UnsupportedElement { property, .. }) if property == "grid"
        ));
    }

    #[test]
    fn opaque_types_are_nested() {
        let shapes = shapes(&[PropertyInfo::opaque::<Range>("range", 0)]);
        assert_eq!(shapes[0], Ok(ValueShape::Nested));
    }
}
