//! Identifier case conversion.
//!
//! [`convert`] splits an identifier into words and joins them again in the
//! requested [`CaseStrategy`].
//!
//! Splitting rules, applied in order:
//!
//! 1. The name contains `_`: split on `_`.
//! 2. The name contains `-`: split on `-`.
//! 3. Otherwise a new word starts at every uppercase letter except the
//!    first character, so a run of capitals yields one word per letter.
//!
//! Empty segments are dropped and every word is lowercased before joining.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// CaseStrategy

/// A naming convention for query keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseStrategy {
    /// Keep the name as written.
    #[default]
    Identity,
    /// `myFieldName`
    Camel,
    /// `MyFieldName`
    Pascal,
    /// `my_field_name`
    Snake,
    /// `my-field-name`
    Kebab,
    /// `MY_FIELD_NAME`
    UpperSnake,
    /// `MY-FIELD-NAME`
    UpperKebab,
}

impl CaseStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Identity,
        Self::Camel,
        Self::Pascal,
        Self::Snake,
        Self::Kebab,
        Self::UpperSnake,
        Self::UpperKebab,
    ];

    /// The lowercase name used by `#[query(case = "...")]`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Camel => "camel",
            Self::Pascal => "pascal",
            Self::Snake => "snake",
            Self::Kebab => "kebab",
            Self::UpperSnake => "upper_snake",
            Self::UpperKebab => "upper_kebab",
        }
    }

    /// Parses a name produced by [`as_str`](Self::as_str).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Shorthand for [`convert(name, self)`](convert).
    #[inline]
    pub fn apply(self, name: &str) -> String {
        convert(name, self)
    }
}

impl fmt::Display for CaseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// convert

/// Converts `name` to `strategy`.
///
/// Total and deterministic; an empty name stays empty for every strategy.
///
/// # Examples
///
/// ```
/// use qp_params::case::{CaseStrategy, convert};
///
/// assert_eq!(convert("myFieldName", CaseStrategy::Snake), "my_field_name");
/// assert_eq!(convert("myFieldName", CaseStrategy::UpperKebab), "MY-FIELD-NAME");
/// assert_eq!(convert("my_field_name", CaseStrategy::Pascal), "MyFieldName");
/// assert_eq!(convert("my_field_name", CaseStrategy::Identity), "my_field_name");
/// ```
pub fn convert(name: &str, strategy: CaseStrategy) -> String {
    if name.is_empty() {
        return String::new();
    }

    let words = split_words(name);

    match strategy {
        CaseStrategy::Identity => String::from(name),
        CaseStrategy::Camel => {
            let mut out = String::with_capacity(name.len());
            let mut iter = words.iter();
            if let Some(first) = iter.next() {
                out.push_str(first);
            }
            iter.for_each(|w| push_capitalized(&mut out, w));
            out
        }
        CaseStrategy::Pascal => {
            let mut out = String::with_capacity(name.len());
            words.iter().for_each(|w| push_capitalized(&mut out, w));
            out
        }
        CaseStrategy::Snake => words.join("_"),
        CaseStrategy::Kebab => words.join("-"),
        CaseStrategy::UpperSnake => words.join("_").to_uppercase(),
        CaseStrategy::UpperKebab => words.join("-").to_uppercase(),
    }
}

fn split_words(name: &str) -> Vec<String> {
    let separator = if name.contains('_') {
        Some('_')
    } else if name.contains('-') {
        Some('-')
    } else {
        None
    };

    if let Some(sep) = separator {
        return name
            .split(sep)
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
    }

    let mut words = Vec::new();
    let mut current = String::new();
    for (index, c) in name.chars().enumerate() {
        if index > 0 && c.is_uppercase() && !current.is_empty() {
            words.push(core::mem::take(&mut current).to_lowercase());
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current.to_lowercase());
    }
    words
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::{CaseStrategy, convert};

    #[test]
    fn camel_source() {
        let name = "myFieldName";
        assert_eq!(convert(name, CaseStrategy::Snake), "my_field_name");
        assert_eq!(convert(name, CaseStrategy::Kebab), "my-field-name");
        assert_eq!(convert(name, CaseStrategy::UpperSnake), "MY_FIELD_NAME");
        assert_eq!(convert(name, CaseStrategy::UpperKebab), "MY-FIELD-NAME");
        assert_eq!(convert(name, CaseStrategy::Pascal), "MyFieldName");
        assert_eq!(convert(name, CaseStrategy::Camel), "myFieldName");
    }

    #[test]
    fn separated_source() {
        assert_eq!(convert("in_stock", CaseStrategy::Camel), "inStock");
        assert_eq!(convert("page-size", CaseStrategy::Snake), "page_size");
        assert_eq!(convert("__a__b_", CaseStrategy::Kebab), "a-b");
        assert_eq!(convert("Mixed_CASE", CaseStrategy::Pascal), "MixedCase");
    }

    #[test]
    fn capital_runs_split_per_letter() {
        assert_eq!(convert("URL", CaseStrategy::Snake), "u_r_l");
        assert_eq!(convert("parseHTTP", CaseStrategy::Kebab), "parse-h-t-t-p");
        assert_eq!(convert("Name", CaseStrategy::Snake), "name");
    }

    #[test]
    fn identity_and_empty() {
        for strategy in CaseStrategy::ALL {
            assert_eq!(convert("", strategy), "");
        }
        assert_eq!(convert("Weird-Name_x", CaseStrategy::Identity), "Weird-Name_x");
        assert_eq!(convert("___", CaseStrategy::Snake), "");
    }

    #[test]
    fn deterministic() {
        for strategy in CaseStrategy::ALL {
            assert_eq!(
                convert("someValueX", strategy),
                convert("someValueX", strategy)
            );
        }
    }

    #[test]
    fn strategy_names() {
        for strategy in CaseStrategy::ALL {
            assert_eq!(CaseStrategy::from_name(strategy.as_str()), Some(strategy));
        }
        assert_eq!(CaseStrategy::from_name("shouting"), None);
    }
}
