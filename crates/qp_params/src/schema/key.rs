use alloc::string::{String, ToString};

use qp_utils::hash::HashMap;

use crate::case::convert;
use crate::config::QueryConfig;
use crate::error::CompileError;
use crate::schema::PropertyDescriptor;

// -----------------------------------------------------------------------------
// KeyResolver

/// Computes query keys for the properties of one type and tracks the keys
/// already in use.
///
/// A resolved key is, in order of precedence:
///
/// 1. the property's rename, verbatim;
/// 2. its external alias, verbatim;
/// 3. its name converted with the configured case strategy, after the
///    local prefix, or the global prefix when there is none.
///
/// Inside a nested struct the key is the prefix chain, followed by the
/// property's own local prefix, followed by the rename, alias, or
/// converted name.
///
/// ```
/// use qp_params::derive::QueryParams;
/// use qp_params::info::Typed;
/// use qp_params::schema::{KeyResolver, extract};
///
/// #[derive(QueryParams)]
/// #[query(case = "snake", prefix = "f_")]
/// #[allow(non_snake_case)]
/// struct Filter {
///     #[query(rename = "q")]
///     keyword: String,
///     inStock: bool,
/// }
///
/// let info = Filter::type_info().as_struct().unwrap();
/// let properties = extract(info);
/// let resolver = KeyResolver::new(info.config());
/// assert_eq!(resolver.resolve(&properties[0], None), "q");
/// assert_eq!(resolver.resolve(&properties[1], None), "f_in_stock");
/// assert_eq!(resolver.resolve(&properties[1], Some("filter.")), "filter.in_stock");
/// ```
pub struct KeyResolver {
    config: QueryConfig,
    // key -> property that first claimed it
    seen: HashMap<String, String>,
}

impl KeyResolver {
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            config: *config,
            seen: HashMap::default(),
        }
    }

    #[inline]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// The key of `property`, top-level when `chain` is `None`.
    pub fn resolve(&self, property: &PropertyDescriptor, chain: Option<&str>) -> String {
        let meta = property.meta();
        let verbatim = meta.rename().or(meta.alias());
        let mut key = String::new();
        match chain {
            Some(chain) => {
                key.push_str(chain);
                key.push_str(meta.prefix().unwrap_or(""));
            }
            // Top-level renames and aliases are never prefixed.
            None if verbatim.is_some() => {}
            None => key.push_str(self.prefix_of(property)),
        }
        match verbatim {
            Some(name) => key.push_str(name),
            None => key.push_str(&convert(property.name(), self.config.case())),
        }
        key
    }

    /// The local prefix of a top-level property, else the global prefix.
    #[inline]
    pub fn prefix_of(&self, property: &PropertyDescriptor) -> &'static str {
        property.meta().prefix().unwrap_or(self.config.prefix())
    }

    /// The prefix chain under which a top-level nested property is
    /// flattened, or `None` if it is not flattened.
    pub fn nested_chain(&self, property: &PropertyDescriptor) -> Option<String> {
        match property.meta().prefix() {
            Some(prefix) => Some(prefix.to_string()),
            None if self.config.flatten_nested() => Some(self.config.prefix().to_string()),
            None => None,
        }
    }

    /// Records `key` as used by `property`.
    ///
    /// # Errors
    ///
    /// [`CompileError::DuplicateKey`] if the key is taken and duplicate keys
    /// are configured to fail. Otherwise a duplicate is logged and the later
    /// property overwrites the earlier one at marshal time.
    pub fn claim(&mut self, key: &str, property: &str) -> Result<(), CompileError> {
        match self.seen.get(key) {
            Some(previous) if self.config.fail_on_duplicate_keys() => {
                Err(CompileError::DuplicateKey {
                    key: key.to_string(),
                    property: property.to_string(),
                    previous: previous.clone(),
                })
            }
            Some(previous) => {
                log::warn!(
                    "query key `{key}` of `{property}` is already used by `{previous}`, the later value wins"
                );
                Ok(())
            }
            None => {
                self.seen.insert(key.to_string(), property.to_string());
                Ok(())
            }
        }
    }

    /// Whether `key` has been claimed.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyResolver;
    use crate::case::CaseStrategy;
    use crate::config::QueryConfig;
    use crate::error::CompileError;
    use crate::info::{FieldMeta, PropertyInfo, StructInfo, TypePath};
    use crate::schema::{PropertyDescriptor, extract};

    struct Sample;

    impl TypePath for Sample {
        fn type_path() -> &'static str {
            "tests::Sample"
        }
        fn type_name() -> &'static str {
            "Sample"
        }
    }

    fn descriptors(config: QueryConfig) -> alloc::vec::Vec<PropertyDescriptor> {
        let info = StructInfo::record::<Sample>(&[
            PropertyInfo::new::<u32>("pageSize", 0),
            PropertyInfo::new::<u32>("keyword", 1).with_meta(FieldMeta::new().with_rename("q")),
            PropertyInfo::new::<u32>("inStock", 2).with_meta(FieldMeta::new().with_alias("in_stock")),
            PropertyInfo::new::<u32>("sortBy", 3).with_meta(FieldMeta::new().with_prefix("s.")),
        ])
        .with_config(config);
        extract(&info)
    }

    #[test]
    fn precedence() {
        let config = QueryConfig::new()
            .with_case(CaseStrategy::Kebab)
            .with_prefix("p.");
        let properties = descriptors(config);
        let resolver = KeyResolver::new(&config);

        assert_eq!(resolver.resolve(&properties[0], None), "p.page-size");
        assert_eq!(resolver.resolve(&properties[1], None), "q");
        assert_eq!(resolver.resolve(&properties[2], None), "in_stock");
        assert_eq!(resolver.resolve(&properties[3], None), "s.sort-by");
    }

    #[test]
    fn prefix_chain() {
        let config = QueryConfig::new().with_case(CaseStrategy::Snake);
        let properties = descriptors(config);
        let resolver = KeyResolver::new(&config);

        assert_eq!(resolver.resolve(&properties[0], Some("filter.")), "filter.page_size");
        assert_eq!(resolver.resolve(&properties[1], Some("filter.")), "filter.q");
        assert_eq!(resolver.resolve(&properties[2], Some("filter.")), "filter.in_stock");
        assert_eq!(resolver.resolve(&properties[3], Some("filter.")), "filter.s.sort_by");
    }

    #[test]
    fn nested_chain_needs_prefix_or_flatten() {
        let properties = descriptors(QueryConfig::new());

        let resolver = KeyResolver::new(&QueryConfig::new().with_prefix("g."));
        assert_eq!(resolver.nested_chain(&properties[0]), None);
        assert_eq!(resolver.nested_chain(&properties[3]).as_deref(), Some("s."));

        let config = QueryConfig::new().with_prefix("g.").with_flatten_nested(true);
        let resolver = KeyResolver::new(&config);
        assert_eq!(resolver.nested_chain(&properties[0]).as_deref(), Some("g."));
    }

    #[test]
    fn duplicates() {
        let mut lenient = KeyResolver::new(&QueryConfig::new());
        assert!(lenient.claim("q", "keyword").is_ok());
        assert!(lenient.claim("q", "query").is_ok());
        assert!(lenient.contains("q"));

        let mut strict = KeyResolver::new(&QueryConfig::new().with_fail_on_duplicate_keys(true));
        strict.claim("q", "keyword").unwrap();
        assert_eq!(
            strict.claim("q", "query"),
            Err(CompileError::DuplicateKey {
                key: "q".into(),
                property: "query".into(),
                previous: "keyword".into(),
            })
        );
    }
}
