use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except the RFC 3986 unreserved characters gets percent-encoded.
pub(crate) const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Ordered query parameters of a request.
///
/// A key may carry several values (`sort` does); they are emitted as repeated
/// `key=value` pairs in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QueryParams {
    params: IndexMap<String, Vec<String>>,
}

impl QueryParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to a single value, replacing previous values.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), vec![value.into()]);
    }

    /// Adds one more value for `key`.
    pub(crate) fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn encode_pairs<'a>(pairs: impl Iterator<Item = (&'a String, &'a String)>) -> String {
        pairs
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn pairs(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value)))
    }

    /// Encodes the parameters in insertion order.
    pub(crate) fn to_query_string(&self) -> String {
        Self::encode_pairs(self.pairs())
    }

    /// Encodes the parameters sorted by key, as used for request signatures.
    ///
    /// The sort is stable, so repeated values keep their relative order.
    pub(crate) fn to_sorted_query_string(&self) -> String {
        let mut pairs: Vec<_> = self.pairs().collect();
        pairs.sort_by(|left, right| left.0.cmp(right.0));
        Self::encode_pairs(pairs.into_iter())
    }
}
