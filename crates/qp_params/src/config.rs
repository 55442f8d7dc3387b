//! Per-type marshalling configuration.

use core::fmt;

use crate::case::CaseStrategy;

// -----------------------------------------------------------------------------
// DateTimeFormat

/// How date-time values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateTimeFormat {
    /// The value's natural ISO-8601 form (instants end in `Z`).
    #[default]
    IsoInstant,
    /// `2024-06-19T15:22:45` for values carrying a date and a time.
    IsoLocalDateTime,
    /// `2024-06-19` for values carrying a date.
    IsoLocalDate,
    /// A `strftime`-style pattern, see [`QueryConfig::pattern`].
    Pattern,
}

impl DateTimeFormat {
    /// All formats, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::IsoInstant,
        Self::IsoLocalDateTime,
        Self::IsoLocalDate,
        Self::Pattern,
    ];

    /// The lowercase name used by `#[query(date_time_format = "...")]`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsoInstant => "iso_instant",
            Self::IsoLocalDateTime => "iso_local_date_time",
            Self::IsoLocalDate => "iso_local_date",
            Self::Pattern => "pattern",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for DateTimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// QueryConfig

/// Configuration resolved once per described type.
///
/// Built in `const` context by the derive macro, or by hand:
///
/// ```
/// use qp_params::case::CaseStrategy;
/// use qp_params::config::QueryConfig;
///
/// const CONFIG: QueryConfig = QueryConfig::new()
///     .with_case(CaseStrategy::Snake)
///     .with_prefix("api.")
///     .with_explode_arrays(false);
///
/// assert_eq!(CONFIG.prefix(), "api.");
/// assert!(!CONFIG.include_nulls());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    case: CaseStrategy,
    prefix: &'static str,
    include_nulls: bool,
    explode_arrays: bool,
    encoded: bool,
    date_time_format: DateTimeFormat,
    pattern: &'static str,
    flatten_nested: bool,
    fail_on_duplicate_keys: bool,
}

impl Default for QueryConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl QueryConfig {
    /// The default configuration.
    ///
    /// | option | default |
    /// |---|---|
    /// | case | `Identity` |
    /// | prefix | `""` |
    /// | include_nulls | `false` |
    /// | explode_arrays | `true` |
    /// | encoded | `false` |
    /// | date_time_format | `IsoInstant` |
    /// | pattern | `""` |
    /// | flatten_nested | `false` |
    /// | fail_on_duplicate_keys | `false` |
    pub const fn new() -> Self {
        Self {
            case: CaseStrategy::Identity,
            prefix: "",
            include_nulls: false,
            explode_arrays: true,
            encoded: false,
            date_time_format: DateTimeFormat::IsoInstant,
            pattern: "",
            flatten_nested: false,
            fail_on_duplicate_keys: false,
        }
    }

    pub const fn with_case(mut self, case: CaseStrategy) -> Self {
        self.case = case;
        self
    }

    /// Prefix prepended to case-converted keys of properties without a local prefix.
    pub const fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    /// Emit null scalars as a key with an empty value.
    pub const fn with_include_nulls(mut self, include_nulls: bool) -> Self {
        self.include_nulls = include_nulls;
        self
    }

    /// One value per element (`true`) or a single comma-joined value (`false`).
    pub const fn with_explode_arrays(mut self, explode_arrays: bool) -> Self {
        self.explode_arrays = explode_arrays;
        self
    }

    /// Values are already percent-encoded and are emitted verbatim.
    pub const fn with_encoded(mut self, encoded: bool) -> Self {
        self.encoded = encoded;
        self
    }

    pub const fn with_date_time_format(mut self, format: DateTimeFormat) -> Self {
        self.date_time_format = format;
        self
    }

    /// `strftime` pattern used with [`DateTimeFormat::Pattern`].
    pub const fn with_pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = pattern;
        self
    }

    /// Flatten nested properties that have no prefix of their own.
    pub const fn with_flatten_nested(mut self, flatten_nested: bool) -> Self {
        self.flatten_nested = flatten_nested;
        self
    }

    /// Reject schemas in which two properties resolve to the same key.
    pub const fn with_fail_on_duplicate_keys(mut self, fail: bool) -> Self {
        self.fail_on_duplicate_keys = fail;
        self
    }

    #[inline]
    pub const fn case(&self) -> CaseStrategy {
        self.case
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn include_nulls(&self) -> bool {
        self.include_nulls
    }

    #[inline]
    pub const fn explode_arrays(&self) -> bool {
        self.explode_arrays
    }

    #[inline]
    pub const fn encoded(&self) -> bool {
        self.encoded
    }

    #[inline]
    pub const fn date_time_format(&self) -> DateTimeFormat {
        self.date_time_format
    }

    #[inline]
    pub const fn pattern(&self) -> &'static str {
        self.pattern
    }

    #[inline]
    pub const fn flatten_nested(&self) -> bool {
        self.flatten_nested
    }

    #[inline]
    pub const fn fail_on_duplicate_keys(&self) -> bool {
        self.fail_on_duplicate_keys
    }

    /// The pattern to format date-times with, if one applies.
    ///
    /// `Some` only for [`DateTimeFormat::Pattern`] with a non-empty pattern.
    pub const fn active_pattern(&self) -> Option<&'static str> {
        match self.date_time_format {
            DateTimeFormat::Pattern if !self.pattern.is_empty() => Some(self.pattern),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DateTimeFormat, QueryConfig};
    use crate::case::CaseStrategy;

    #[test]
    fn defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.case(), CaseStrategy::Identity);
        assert_eq!(config.prefix(), "");
        assert!(!config.include_nulls());
        assert!(config.explode_arrays());
        assert!(!config.encoded());
        assert_eq!(config.date_time_format(), DateTimeFormat::IsoInstant);
        assert_eq!(config.pattern(), "");
        assert!(!config.flatten_nested());
        assert!(!config.fail_on_duplicate_keys());
    }

    #[test]
    fn active_pattern_needs_both() {
        let pattern_only = QueryConfig::new().with_pattern("%Y");
        assert_eq!(pattern_only.active_pattern(), None);

        let empty = QueryConfig::new().with_date_time_format(DateTimeFormat::Pattern);
        assert_eq!(empty.active_pattern(), None);

        let both = empty.with_pattern("%Y");
        assert_eq!(both.active_pattern(), Some("%Y"));
    }

    #[test]
    fn format_names() {
        for format in DateTimeFormat::ALL {
            assert_eq!(DateTimeFormat::from_name(format.as_str()), Some(format));
        }
    }
}
