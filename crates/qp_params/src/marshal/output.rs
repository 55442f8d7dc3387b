use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;

// -----------------------------------------------------------------------------
// ParamMap

/// Ordered query parameters: each key maps to an ordered list of values.
///
/// Keys keep the position of their first insertion. Replacing the values
/// of a key does not move it.
///
/// # Examples
///
/// ```
/// use qp_params::marshal::ParamMap;
///
/// let mut params = ParamMap::new();
/// params.insert_one("q", "shoes");
/// params.insert("tag", vec!["a".into(), "b".into()]);
/// params.insert_one("q", "boots");
///
/// assert_eq!(params.get("q"), Some(&["boots".to_string()][..]));
/// assert_eq!(params.to_query_string(), "q=boots&tag=a&tag=b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: IndexMap<String, Vec<String>>,
}

impl ParamMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets the values of `key`, returning the previous ones.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(key.into(), values)
    }

    /// Sets `key` to a single value, returning the previous values.
    pub fn insert_one(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<Vec<String>> {
        self.insert(key, vec![value.into()])
    }

    /// Adds a value after the existing values of `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        match self.entries.entry(key.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value.into()),
            Entry::Vacant(entry) => {
                entry.insert(vec![value.into()]);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// The first value of `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes `key`, keeping the order of the other keys.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys with their values, in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// One `(key, value)` pair per value, in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// Moves every key of `other` into `self`, replacing existing values.
    pub fn merge(&mut self, other: ParamMap) {
        self.entries.extend(other.entries);
    }

    /// `key=value` pairs joined by `&`. A key with several values repeats.
    ///
    /// Keys and values are written as they are; encoding happens when
    /// values are marshalled.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.pairs() {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }

    /// The underlying map.
    #[inline]
    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.entries
    }
}

impl fmt::Display for ParamMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.pairs().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>> Extend<(K, Vec<String>)> for ParamMap {
    fn extend<I: IntoIterator<Item = (K, Vec<String>)>>(&mut self, iter: I) {
        for (key, values) in iter {
            self.insert(key, values);
        }
    }
}

impl IntoIterator for ParamMap {
    type Item = (String, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<ParamMap> for IndexMap<String, Vec<String>> {
    #[inline]
    fn from(params: ParamMap) -> Self {
        params.entries
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use super::ParamMap;

    #[test]
    fn replacing_keeps_position() {
        let mut params = ParamMap::new();
        params.insert_one("a", "1");
        params.insert_one("b", "2");
        assert_eq!(params.insert_one("a", "3"), Some(vec!["1".to_string()]));
        assert_eq!(params.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(params.to_query_string(), "a=3&b=2");
    }

    #[test]
    fn append_and_pairs() {
        let mut params = ParamMap::new();
        params.append("tag", "a");
        params.append("tag", "b");
        params.insert("empty", Vec::new());
        assert_eq!(params.len(), 2);
        assert_eq!(params.pairs().collect::<Vec<_>>(), [("tag", "a"), ("tag", "b")]);
        assert_eq!(params.first("tag"), Some("a"));
        assert_eq!(params.to_string(), "tag=a&tag=b");
    }

    #[test]
    fn query_string_splits_back() {
        let params: ParamMap = [
            ("q", vec![String::from("red%20shoes")]),
            ("tags", vec![String::from("a"), String::from("b")]),
        ]
        .into_iter()
        .collect();

        let mut rebuilt = ParamMap::new();
        for pair in params.to_query_string().split('&') {
            let (key, value) = pair.split_once('=').unwrap();
            rebuilt.append(key, value);
        }
        assert_eq!(rebuilt, params);
    }

    #[test]
    fn merge_overwrites() {
        let mut params = ParamMap::new();
        params.insert_one("price", "0");
        params.insert_one("page", "1");

        let mut other = ParamMap::new();
        other.insert_one("price_min", "1.0");
        other.insert_one("price", "9");
        params.merge(other);

        assert_eq!(params.to_query_string(), "price=9&page=1&price_min=1.0");
        assert_eq!(params.remove("page"), Some(vec!["1".to_string()]));
        assert_eq!(params.to_query_string(), "price=9&price_min=1.0");
    }
}
