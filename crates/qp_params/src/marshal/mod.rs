//! Turning values into query parameters.
//!
//! ## Menu
//!
//! - [`marshal`]: runs a [`CompiledSchema`] over a value, producing a [`ParamMap`].
//! - [`ParamMap`]: ordered keys with ordered values, and its query-string form.
//! - [`encode_value`]: the percent-encoding applied to values.
//!
//! Marshalling is pure: it takes no locks, performs no I/O and only fails
//! when a user converter does.

// -----------------------------------------------------------------------------
// Modules

mod date_time;
mod encode;
mod output;

// -----------------------------------------------------------------------------
// Exports

pub use encode::{QUERY_VALUE, encode_value};
pub use output::ParamMap;

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::config::QueryConfig;
use crate::error::MarshalError;
use crate::schema::{CompiledSchema, PropertyPlan, ValueShape};
use crate::value::{Property, QueryRef, QueryStruct};

// -----------------------------------------------------------------------------
// marshal

/// Marshals `value` according to `schema`.
///
/// `value` must be an instance of the type `schema` was compiled from.
///
/// # Errors
///
/// [`MarshalError::Convert`] if a converter fails. No partial output is returned.
///
/// # Examples
///
/// ```
/// use qp_params::QueryParams;
/// use qp_params::derive::QueryParams;
/// use qp_params::marshal::marshal;
///
/// #[derive(QueryParams)]
/// #[query(include_nulls)]
/// struct Page {
///     number: u32,
///     cursor: Option<String>,
///     tags: Vec<String>,
/// }
///
/// let page = Page { number: 2, cursor: None, tags: vec![] };
/// let params = marshal(Page::compiled_schema().unwrap(), &page).unwrap();
/// assert_eq!(params.to_query_string(), "number=2&cursor=");
/// ```
pub fn marshal(schema: &CompiledSchema, value: &dyn QueryStruct) -> Result<ParamMap, MarshalError> {
    let mut out = ParamMap::with_capacity(schema.properties().len());
    Marshaller {
        config: schema.config(),
    }
    .write_struct(schema.properties(), value, &mut out)?;
    Ok(out)
}

/// Marshals `value` and joins the result into a query string.
#[inline]
pub fn serialize(schema: &CompiledSchema, value: &dyn QueryStruct) -> Result<String, MarshalError> {
    marshal(schema, value).map(|params| params.to_query_string())
}

struct Marshaller<'a> {
    config: &'a QueryConfig,
}

impl Marshaller<'_> {
    fn write_struct(
        &self,
        plans: &[PropertyPlan],
        value: &dyn QueryStruct,
        out: &mut ParamMap,
    ) -> Result<(), MarshalError> {
        for plan in plans {
            let Some(property) = value.property(plan.index()) else {
                // Nothing readable at this index, handled like a null value.
                self.write_null(plan, out);
                continue;
            };
            self.write_property(plan, &property, out)?;
        }
        Ok(())
    }

    fn write_property(
        &self,
        plan: &PropertyPlan,
        property: &Property<'_>,
        out: &mut ParamMap,
    ) -> Result<(), MarshalError> {
        if let ValueShape::Converted = plan.shape() {
            if let Some(converter) = plan.converter() {
                let converted = converter
                    .convert(plan.key(), property.as_any())
                    .map_err(|source| MarshalError::Convert {
                        key: plan.key().to_string(),
                        source,
                    })?;
                out.merge(converted);
            }
            return Ok(());
        }

        let query = match property.value() {
            Some(value) => value.query_ref(),
            None => QueryRef::Null,
        };

        match (plan.shape(), query) {
            (_, QueryRef::Null) => self.write_null(plan, out),
            (ValueShape::Collection(_) | ValueShape::FixedArray(_), QueryRef::Seq(seq)) => {
                if seq.is_empty() {
                    return Ok(());
                }
                // A non-empty collection keeps its key even if every item is null.
                let items: Vec<Cow<'_, str>> =
                    seq.iter().filter_map(|item| self.text(item.query_ref())).collect();
                let values = if self.config.explode_arrays() {
                    items.iter().map(|item| self.encode(item)).collect()
                } else {
                    alloc::vec![self.encode(&items.join(","))]
                };
                out.insert(plan.key(), values);
            }
            (ValueShape::MapLike(_), QueryRef::Map(map)) => {
                for (key, entry) in map.iter() {
                    if let Some(text) = self.text(entry.query_ref()) {
                        out.insert_one(key, self.encode(&text));
                    }
                }
            }
            (ValueShape::Nested, QueryRef::Struct(nested)) => {
                self.write_struct(plan.children(), nested, out)?;
            }
            (ValueShape::Scalar | ValueShape::Optional(_) | ValueShape::DateTime, query) => {
                if let Some(text) = self.text(query) {
                    out.insert_one(plan.key(), self.encode(&text));
                }
            }
            (shape, query) => {
                log::debug!(
                    "property `{}` has shape {shape} but holds a {} value, skipped",
                    plan.name(),
                    query.form()
                );
            }
        }
        Ok(())
    }

    /// Only scalars emit anything for a null, and only with `include_nulls`.
    fn write_null(&self, plan: &PropertyPlan, out: &mut ParamMap) {
        if self.config.include_nulls() && plan.shape() == ValueShape::Scalar {
            out.insert_one(plan.key(), String::new());
        }
    }

    /// The text of a scalar or date-time value, `None` for anything else.
    fn text<'v>(&self, query: QueryRef<'v>) -> Option<Cow<'v, str>> {
        match query {
            QueryRef::Scalar(text) => Some(text),
            QueryRef::DateTime(value) => Some(Cow::Owned(date_time::render(value, self.config))),
            _ => None,
        }
    }

    fn encode(&self, text: &str) -> String {
        if self.config.encoded() {
            text.to_string()
        } else {
            encode_value(text).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::Any;

    use jiff::civil;
    use serde::Serialize;

    use super::{ParamMap, serialize};
    use crate::QueryParams;
    use crate::case::CaseStrategy;
    use crate::config::QueryConfig;
    use crate::convert::ParamConverter;
    use crate::derive::QueryParams;
    use crate::error::{ConvertError, MarshalError};
    use crate::impls::NonGenericTypeInfoCell;
    use crate::info::{AccessorInfo, FieldMeta, PropertyInfo, StructInfo, TypeInfo, TypePath, Typed};
    use crate::schema::compile;
    use crate::value::{Property, QueryRef, QueryStruct, QueryValue};

    struct PriceRange(f64, f64);

    struct RangeConverter;

    impl ParamConverter<PriceRange> for RangeConverter {
        fn convert(key: &str, value: &PriceRange) -> Result<ParamMap, ConvertError> {
            if value.0 > value.1 {
                return Err(ConvertError::msg("inverted range"));
            }
            let mut out = ParamMap::new();
            out.insert_one(format!("{key}_min"), format!("{:.1}", value.0));
            out.insert_one(format!("{key}_max"), format!("{:.1}", value.1));
            Ok(out)
        }
    }

    #[derive(Serialize, QueryParams)]
    #[allow(non_snake_case)]
    struct Filter {
        brand: String,
        #[serde(rename = "in_stock")]
        #[query(use_serde_rename)]
        inStock: bool,
    }

    #[derive(QueryParams)]
    struct Search {
        #[query(rename = "q")]
        keyword: String,
        #[query(prefix = "filter.")]
        filter: Filter,
        tags: Vec<String>,
        #[query(converter = RangeConverter)]
        price: PriceRange,
    }

    fn search() -> Search {
        Search {
            keyword: "red shoes".into(),
            filter: Filter {
                brand: "acme".into(),
                inStock: true,
            },
            tags: vec!["a".into(), "b".into()],
            price: PriceRange(1.0, 3.0),
        }
    }

    #[test]
    fn declaration_order_with_every_rule() {
        assert_eq!(
            search().to_query_string().unwrap(),
            "q=red%20shoes&filter.brand=acme&filter.in_stock=true\
             &tags=a&tags=b&price_min=1.0&price_max=3.0"
        );
    }

    #[test]
    fn query_string_splits_back_into_params() {
        let params = search().to_query_params().unwrap();
        let mut rebuilt = ParamMap::new();
        for pair in params.to_query_string().split('&') {
            let (key, value) = pair.split_once('=').unwrap();
            rebuilt.append(key, value);
        }
        assert_eq!(rebuilt, params);
    }

    #[test]
    fn converter_failure_aborts() {
        let mut value = search();
        value.price = PriceRange(3.0, 1.0);
        let err = value.to_query_params().unwrap_err();
        let MarshalError::Convert { key, source } = err else {
            panic!("expected a converter error");
        };
        assert_eq!(key, "price");
        assert_eq!(source.to_string(), "inverted range");
    }

    #[derive(QueryParams)]
    struct Nullable {
        name: Option<String>,
        tags: Option<Vec<String>>,
        empty: Vec<String>,
        extra: Option<BTreeMap<String, String>>,
        when: Option<civil::Date>,
    }

    #[derive(QueryParams)]
    #[query(include_nulls)]
    struct NullableIncluded {
        name: Option<String>,
        tags: Option<Vec<String>>,
        empty: Vec<String>,
        when: Option<civil::Date>,
    }

    #[test]
    fn nulls_only_emit_for_scalars() {
        let value = Nullable {
            name: None,
            tags: None,
            empty: Vec::new(),
            extra: None,
            when: None,
        };
        assert!(value.to_query_params().unwrap().is_empty());

        let value = NullableIncluded {
            name: None,
            tags: None,
            empty: Vec::new(),
            when: None,
        };
        assert_eq!(value.to_query_string().unwrap(), "name=");
    }

    #[derive(QueryParams)]
    #[query(explode_arrays = false)]
    struct Joined {
        tags: Vec<Option<String>>,
        ids: [u32; 3],
    }

    #[derive(QueryParams)]
    struct Exploded {
        tags: Vec<Option<String>>,
    }

    #[test]
    fn null_elements_are_dropped() {
        let value = Exploded {
            tags: vec![Some("x".into()), None, Some("y".into())],
        };
        let params = value.to_query_params().unwrap();
        assert_eq!(params.get("tags").unwrap(), ["x", "y"]);

        let value = Exploded {
            tags: vec![None, None],
        };
        let params = value.to_query_params().unwrap();
        assert_eq!(params.get("tags"), Some(&[][..]));
        assert_eq!(params.to_query_string(), "");

        let value = Exploded { tags: vec![] };
        assert!(value.to_query_params().unwrap().is_empty());
    }

    #[test]
    fn joined_null_elements_keep_the_key() {
        let value = Joined {
            tags: vec![None, None],
            ids: [4, 5, 6],
        };
        assert_eq!(value.to_query_string().unwrap(), "tags=&ids=4%2C5%2C6");

        let value = Joined {
            tags: vec![],
            ids: [4, 5, 6],
        };
        assert_eq!(value.to_query_string().unwrap(), "ids=4%2C5%2C6");
    }

    #[test]
    fn joined_values_encode_as_one_unit() {
        let value = Joined {
            tags: vec![Some("a b".into()), None, Some("c".into())],
            ids: [1, 2, 3],
        };
        assert_eq!(
            value.to_query_string().unwrap(),
            "tags=a%20b%2Cc&ids=1%2C2%2C3"
        );
    }

    #[derive(QueryParams)]
    #[query(encoded)]
    struct PreEncoded {
        path: String,
    }

    #[test]
    fn encoded_values_are_written_raw() {
        let value = PreEncoded {
            path: "a%2Fb c".into(),
        };
        assert_eq!(value.to_query_string().unwrap(), "path=a%2Fb c");
    }

    #[derive(QueryParams)]
    #[query(prefix = "api.")]
    struct WithMap {
        id: u32,
        extra: BTreeMap<String, Option<String>>,
    }

    #[test]
    fn map_entries_bypass_keys() {
        let mut extra = BTreeMap::new();
        extra.insert(String::from("sort"), Some(String::from("price desc")));
        extra.insert(String::from("skip"), None);
        let value = WithMap { id: 7, extra };
        assert_eq!(
            value.to_query_string().unwrap(),
            "api.id=7&sort=price%20desc"
        );
    }

    #[derive(QueryParams)]
    struct Optional {
        level: Option<Option<u8>>,
    }

    #[test]
    fn optional_unwraps_once_present() {
        let absent = Optional { level: Some(None) };
        assert!(absent.to_query_params().unwrap().is_empty());

        let present = Optional {
            level: Some(Some(3)),
        };
        assert_eq!(present.to_query_string().unwrap(), "level=3");
    }

    #[derive(QueryParams)]
    struct Overlap {
        #[query(rename = "q")]
        first: String,
        #[query(rename = "q")]
        second: String,
        tail: u8,
    }

    #[test]
    fn later_duplicate_overwrites() {
        let value = Overlap {
            first: "one".into(),
            second: "two".into(),
            tail: 0,
        };
        assert_eq!(value.to_query_string().unwrap(), "q=two&tail=0");
    }

    #[derive(QueryParams)]
    struct Unprefixed {
        filter: Filter,
        page: u32,
    }

    #[test]
    fn nested_without_prefix_is_silent() {
        let value = Unprefixed {
            filter: Filter {
                brand: "acme".into(),
                inStock: false,
            },
            page: 1,
        };
        assert_eq!(value.to_query_string().unwrap(), "page=1");
    }

    #[derive(QueryParams)]
    struct MaybeFiltered {
        #[query(prefix = "f.")]
        filter: Option<Filter>,
    }

    #[test]
    fn absent_nested_value_is_omitted() {
        let value = MaybeFiltered { filter: None };
        assert!(value.to_query_params().unwrap().is_empty());

        let value = MaybeFiltered {
            filter: Some(Filter {
                brand: "acme".into(),
                inStock: true,
            }),
        };
        assert_eq!(
            value.to_query_string().unwrap(),
            "f.brand=acme&f.in_stock=true"
        );
    }

    #[derive(QueryParams)]
    #[query(date_time_format = "pattern", pattern = "%Y/%m/%d")]
    struct Patterned {
        day: civil::Date,
        at: civil::Time,
    }

    #[derive(QueryParams)]
    #[query(date_time_format = "iso_local_date")]
    struct DateOnly {
        at: civil::DateTime,
    }

    #[derive(QueryParams)]
    struct Natural {
        at: civil::DateTime,
    }

    #[test]
    fn date_time_formats() {
        let value = Patterned {
            day: civil::date(2024, 6, 19),
            at: civil::time(15, 22, 45, 0),
        };
        // A time has no year, so the natural form is used.
        assert_eq!(
            value.to_query_string().unwrap(),
            "day=2024%2F06%2F19&at=15%3A22%3A45"
        );

        let at = civil::date(2024, 6, 19).at(15, 22, 45, 0);
        assert_eq!(
            DateOnly { at }.to_query_string().unwrap(),
            "at=2024-06-19"
        );
        assert_eq!(
            Natural { at }.to_query_string().unwrap(),
            "at=2024-06-19T15%3A22%3A45"
        );
    }

    #[derive(QueryParams)]
    enum Sort {
        Price,
        #[query(rename = "newest")]
        Recent,
    }

    #[derive(QueryParams)]
    #[query(case = "kebab")]
    struct Sorted {
        sort_order: Sort,
        fallbacks: Vec<Sort>,
    }

    #[test]
    fn unit_enums_render_variant_names() {
        let value = Sorted {
            sort_order: Sort::Recent,
            fallbacks: vec![Sort::Price, Sort::Recent],
        };
        assert_eq!(
            value.to_query_string().unwrap(),
            "sort-order=newest&fallbacks=Price&fallbacks=newest"
        );
    }

    #[derive(QueryParams)]
    #[query(case = "camel")]
    struct Paged<T> {
        page_size: u32,
        items: Vec<T>,
    }

    #[test]
    fn generic_types_compile_per_instantiation() {
        let numbers = Paged {
            page_size: 2,
            items: vec![1_u8, 2],
        };
        let words = Paged {
            page_size: 1,
            items: vec![String::from("x")],
        };
        assert_eq!(
            numbers.to_query_string().unwrap(),
            "pageSize=2&items=1&items=2"
        );
        assert_eq!(words.to_query_string().unwrap(), "pageSize=1&items=x");
        assert_ne!(
            Paged::<u8>::compiled_schema().unwrap().type_path(),
            Paged::<String>::compiled_schema().unwrap().type_path()
        );
    }

    // Described through accessors, the way a class-like type is.
    struct Account {
        id: u64,
        active: bool,
        display_name: String,
        secret: String,
    }

    impl TypePath for Account {
        fn type_path() -> &'static str {
            "tests::Account"
        }
        fn type_name() -> &'static str {
            "Account"
        }
    }

    impl Typed for Account {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::structure(
                    StructInfo::class::<Self>(
                        &[
                            AccessorInfo::new::<u64>("getUserId", 0),
                            AccessorInfo::new::<bool>("isActive", 1),
                            AccessorInfo::new::<String>("getDisplayName", 2),
                            AccessorInfo::new::<String>("getSecret", 3).with_public(false),
                            AccessorInfo::new::<u32>("isCount", 4),
                        ],
                        &[PropertyInfo::new::<String>("displayName", 2)
                            .with_meta(FieldMeta::new().with_rename("name"))],
                    )
                    .with_config(QueryConfig::new().with_case(CaseStrategy::Snake)),
                )
            })
        }
    }

    impl QueryValue for Account {
        fn query_ref(&self) -> QueryRef<'_> {
            QueryRef::Struct(self)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl QueryStruct for Account {
        fn property(&self, index: usize) -> Option<Property<'_>> {
            match index {
                0 => Some(Property::owned(self.id)),
                1 => Some(Property::owned(self.active)),
                2 => Some(Property::owned(self.display_name.to_uppercase())),
                3 => Some(Property::Borrowed(&self.secret)),
                _ => None,
            }
        }

        fn property_len(&self) -> usize {
            5
        }
    }

    #[test]
    fn class_like_accessors() {
        let schema = compile(Account::type_info()).unwrap();
        let indices: Vec<_> = schema.properties().iter().map(|p| p.index()).collect();
        assert_eq!(indices, [0, 1, 2]);

        let account = Account {
            id: 42,
            active: true,
            display_name: "ada l".into(),
            secret: "hunter2".into(),
        };
        assert_eq!(
            serialize(&schema, &account).unwrap(),
            "user_id=42&active=true&name=ADA%20L"
        );
    }
}
