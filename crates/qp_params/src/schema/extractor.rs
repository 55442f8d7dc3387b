use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::info::{AccessorInfo, FieldMeta, SchemaSource, StructInfo, TypeInfo};

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// A serializable property of a struct, with its metadata.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: Cow<'static, str>,
    index: usize,
    order: usize,
    type_info: fn() -> &'static TypeInfo,
    meta: FieldMeta,
}

impl PropertyDescriptor {
    /// The declared name, or the decapitalized accessor suffix.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index passed to [`QueryStruct::property`](crate::value::QueryStruct::property).
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Position in declaration order.
    #[inline]
    pub const fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    #[inline]
    pub const fn ignored(&self) -> bool {
        self.meta.ignored()
    }
}

// -----------------------------------------------------------------------------
// extract

/// Lists the properties of a struct in declaration order.
///
/// Ignored properties stay in the list. Names are unique: for class-like
/// types a later accessor resolving to an existing name replaces the
/// earlier one and keeps its position.
///
/// ```
/// use qp_params::derive::QueryParams;
/// use qp_params::info::Typed;
/// use qp_params::schema::extract;
///
/// #[derive(QueryParams)]
/// struct Page {
///     number: u32,
///     #[query(ignore)]
///     cursor: String,
/// }
///
/// let info = Page::type_info().as_struct().unwrap();
/// let names: Vec<_> = extract(info).iter().map(|p| p.name().to_owned()).collect();
/// assert_eq!(names, ["number", "cursor"]);
/// ```
pub fn extract(info: &StructInfo) -> Vec<PropertyDescriptor> {
    match info.source() {
        SchemaSource::Record(components) => components
            .iter()
            .enumerate()
            .map(|(order, component)| PropertyDescriptor {
                name: Cow::Borrowed(component.name()),
                index: component.index(),
                order,
                type_info: component.type_info_fn(),
                meta: *component.meta(),
            })
            .collect(),
        SchemaSource::Class { accessors, .. } => {
            let mut properties: Vec<PropertyDescriptor> = Vec::with_capacity(accessors.len());
            for accessor in accessors.iter() {
                let Some(name) = property_name(accessor) else {
                    continue;
                };
                let meta = info
                    .field(&name)
                    .map(|field| *field.meta())
                    .unwrap_or_default();
                let descriptor = PropertyDescriptor {
                    name,
                    index: accessor.index(),
                    order: properties.len(),
                    type_info: accessor.return_info_fn(),
                    meta,
                };
                match properties.iter_mut().find(|p| p.name == descriptor.name) {
                    Some(slot) => {
                        let order = slot.order;
                        *slot = PropertyDescriptor { order, ..descriptor };
                    }
                    None => properties.push(descriptor),
                }
            }
            properties
        }
    }
}

/// The property an accessor reads, if it is one.
fn property_name(accessor: &AccessorInfo) -> Option<Cow<'static, str>> {
    if !accessor.is_public() || accessor.is_static() || accessor.arity() != 0 {
        return None;
    }
    let name = accessor.name();
    if let Some(rest) = strip_accessor_prefix(name, "get") {
        return Some(rest);
    }
    if accessor.return_info().ty().is::<bool>() {
        return strip_accessor_prefix(name, "is");
    }
    None
}

/// `get_name` gives `name`, `getName` gives `name`, `getter` gives nothing.
fn strip_accessor_prefix(name: &'static str, prefix: &str) -> Option<Cow<'static, str>> {
    let rest = name.strip_prefix(prefix)?;
    if let Some(snake) = rest.strip_prefix('_') {
        return (!snake.is_empty()).then_some(Cow::Borrowed(snake));
    }
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    let mut decapitalized = String::with_capacity(rest.len());
    decapitalized.extend(first.to_lowercase());
    decapitalized.push_str(chars.as_str());
    Some(Cow::Owned(decapitalized))
}

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::vec::Vec;

    use super::{extract, strip_accessor_prefix};
    use crate::info::{AccessorInfo, FieldMeta, PropertyInfo, StructInfo};

    struct Account;

    impl crate::info::TypePath for Account {
        fn type_path() -> &'static str {
            "tests::Account"
        }
        fn type_name() -> &'static str {
            "Account"
        }
    }

    #[test]
    fn accessor_prefixes() {
        assert_eq!(strip_accessor_prefix("get_name", "get"), Some(Cow::Borrowed("name")));
        assert_eq!(strip_accessor_prefix("getUserId", "get"), Some(Cow::from("userId")));
        assert_eq!(strip_accessor_prefix("getter", "get"), None);
        assert_eq!(strip_accessor_prefix("get", "get"), None);
        assert_eq!(strip_accessor_prefix("get_", "get"), None);
        assert_eq!(strip_accessor_prefix("isActive", "is"), Some(Cow::from("active")));
    }

    #[test]
    fn class_like_accessors() {
        let info = StructInfo::class::<Account>(
            &[
                AccessorInfo::new::<u64>("getId", 0),
                AccessorInfo::new::<bool>("is_active", 1),
                AccessorInfo::new::<u32>("isCount", 2),
                AccessorInfo::new::<u32>("get_secret", 3).with_public(false),
                AccessorInfo::new::<u32>("get_total", 4).with_static(true),
                AccessorInfo::new::<u32>("get_label", 5).with_arity(1),
                AccessorInfo::new::<u32>("describe", 6),
                AccessorInfo::new::<bool>("get_active", 7),
            ],
            &[PropertyInfo::new::<u64>("id", 0).with_meta(FieldMeta::new().with_rename("account"))],
        );

        let properties = extract(&info);
        let names: Vec<_> = properties.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["id", "active"]);

        assert_eq!(properties[0].meta().rename(), Some("account"));
        assert_eq!(properties[0].index(), 0);
        // `get_active` replaced `is_active` in place.
        assert_eq!(properties[1].index(), 7);
        assert_eq!(properties[1].order(), 1);
        assert!(properties[1].meta().rename().is_none());
    }
}
