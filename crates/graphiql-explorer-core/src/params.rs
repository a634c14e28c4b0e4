//! Query-string parameters.
//!
//! [`Parameters`] is the explorer's whole persistent state: an ordered
//! mapping from decoded query-string keys to decoded values. It is built
//! once from the page's location search, edited in place, and serialized
//! back into the address bar after every edit.
//!
//! Components are encoded with the same unreserved set as a browser's
//! `encodeURIComponent` (ASCII alphanumerics and `- _ . ! ~ * ' ( )`), and
//! decoded without treating `+` as a space, so every value survives an
//! encode/decode round trip unchanged.
//!
//! # Example
//!
//! ```
//! use graphiql_explorer_core::Parameters;
//!
//! let mut params = Parameters::parse("?query=%7Bfoo%7D&operationName=");
//! assert_eq!(params.query(), Some("{foo}"));
//!
//! params.set("operationName", "Foo");
//! assert_eq!(params.to_search(), "?query=%7Bfoo%7D&operationName=Foo");
//! ```

use std::borrow::Cow;
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::error::ParamsError;
use crate::logging::targets;

/// The key holding the GraphQL document text.
pub const QUERY: &str = "query";
/// The key holding the JSON variables text.
pub const VARIABLES: &str = "variables";
/// The key holding the selected operation name.
pub const OPERATION_NAME: &str = "operationName";

/// Characters left unescaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single key or value.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Percent-decode a single key or value.
///
/// `+` is kept literally. A `%` must start a two-digit hex escape and the
/// decoded bytes must form UTF-8; anything else is rejected, as a browser's
/// `decodeURIComponent` would.
pub fn decode_component(input: &str) -> Result<String, ParamsError> {
    let bytes = input.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || (i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit())
    });
    if !well_formed {
        return Err(ParamsError::MalformedEscape {
            component: input.to_string(),
        });
    }

    percent_decode_str(input)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| ParamsError::InvalidUtf8 {
            component: input.to_string(),
        })
}

/// Re-serialize a JSON document with two-space indentation.
///
/// Object keys keep their original order. Numbers are written the way a
/// browser's `JSON.stringify` writes them, so `1.0` and `1e2` come out as
/// `1` and `100`.
pub fn pretty_json(raw: &str) -> Result<String, ParamsError> {
    let mut value: Value = serde_json::from_str(raw).map_err(|e| ParamsError::InvalidVariables {
        message: e.to_string(),
    })?;
    integralize(&mut value);
    serde_json::to_string_pretty(&value).map_err(|e| ParamsError::InvalidVariables {
        message: e.to_string(),
    })
}

/// Rewrite whole-valued floats as integers, recursively.
fn integralize(value: &mut Value) {
    // 2^63, the first whole f64 outside i64
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(f) = n.as_f64()
                && f.is_finite()
                && f.fract() == 0.0
                && f.abs() < I64_BOUND
            {
                *value = Value::from(f as i64);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integralize),
        Value::Object(map) => map.values_mut().for_each(integralize),
        _ => {}
    }
}

/// An ordered mapping of decoded query-string keys to decoded values.
///
/// Keys keep the position of their first insertion; setting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a location search string.
    ///
    /// The leading `?` is optional. Entries are split on `&` and then on
    /// their first `=`; entries without `=` produce nothing, and so do
    /// entries whose key or value has a malformed escape or does not decode
    /// to UTF-8. A later entry
    /// for the same key overwrites the earlier value.
    ///
    /// If a non-empty `variables` value parses as JSON it is stored
    /// pretty-printed, otherwise verbatim.
    pub fn parse(search: &str) -> Self {
        let search = search.strip_prefix('?').unwrap_or(search);
        let mut params = Self::new();

        for entry in search.split('&') {
            let Some((raw_key, raw_value)) = entry.split_once('=') else {
                if !entry.is_empty() {
                    tracing::trace!(target: targets::PARAMS, entry, "ignoring entry without '='");
                }
                continue;
            };
            match (decode_component(raw_key), decode_component(raw_value)) {
                (Ok(key), Ok(value)) => {
                    params.set(key, value);
                }
                (Err(err), _) | (_, Err(err)) => {
                    tracing::debug!(target: targets::PARAMS, %err, "skipping undecodable entry");
                }
            }
        }

        params.normalize_variables();
        params
    }

    /// Pretty-print `variables` in place when it holds valid JSON.
    ///
    /// Returns `true` if the value was rewritten. Invalid JSON is left
    /// untouched.
    pub fn normalize_variables(&mut self) -> bool {
        let Some(raw) = self.variables().filter(|v| !v.is_empty()) else {
            return false;
        };
        match pretty_json(raw) {
            Ok(pretty) => {
                self.set(VARIABLES, pretty);
                true
            }
            Err(err) => {
                tracing::trace!(target: targets::PARAMS, %err, "keeping variables verbatim");
                false
            }
        }
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether `key` is present, even with an empty value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries, including empty ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The GraphQL document text.
    pub fn query(&self) -> Option<&str> {
        self.get(QUERY)
    }

    /// The variables text, pretty-printed if it was valid JSON at load.
    pub fn variables(&self) -> Option<&str> {
        self.get(VARIABLES)
    }

    /// The selected operation name.
    pub fn operation_name(&self) -> Option<&str> {
        self.get(OPERATION_NAME)
    }

    /// Parse the variables text as JSON.
    ///
    /// Absent and empty variables are `Ok(None)`.
    pub fn variables_json(&self) -> Result<Option<Value>, ParamsError> {
        match self.variables().filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| ParamsError::InvalidVariables {
                    message: e.to_string(),
                }),
        }
    }

    /// Serialize into a location search string.
    ///
    /// Entries with empty values are omitted. The result always starts with
    /// `?`, so an empty mapping yields `"?"`.
    pub fn to_search(&self) -> String {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_search())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decodes_query() {
        let params = Parameters::parse("?query=%7Bfoo%7D");
        assert_eq!(params.query(), Some("{foo}"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_parse_without_question_mark() {
        let params = Parameters::parse("operationName=Foo");
        assert_eq!(params.operation_name(), Some("Foo"));
    }

    #[test]
    fn test_parse_pretty_prints_variables() {
        let params = Parameters::parse("?variables=%7B%22a%22%3A1%7D");
        assert_eq!(params.variables(), Some("{\n  \"a\": 1\n}"));
    }

    #[test]
    fn test_parse_keeps_invalid_variables() {
        let params = Parameters::parse("?variables=not-json");
        assert_eq!(params.variables(), Some("not-json"));
    }

    #[test]
    fn test_pretty_print_keeps_key_order() {
        let params = Parameters::parse("?variables=%7B%22z%22%3A1%2C%22a%22%3A2%7D");
        assert_eq!(params.variables(), Some("{\n  \"z\": 1,\n  \"a\": 2\n}"));
    }

    #[test]
    fn test_parse_ignores_entries_without_equals() {
        let params = Parameters::parse("?flag&query=x&&");
        assert_eq!(params.len(), 1);
        assert!(!params.contains_key("flag"));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let params = Parameters::parse("?query=a=b");
        assert_eq!(params.query(), Some("a=b"));
    }

    #[test]
    fn test_parse_plus_is_literal() {
        let params = Parameters::parse("?query=a+b%20c");
        assert_eq!(params.query(), Some("a+b c"));
    }

    #[test]
    fn test_parse_skips_invalid_utf8() {
        let params = Parameters::parse("?query=%FF&operationName=Op");
        assert!(!params.contains_key("query"));
        assert_eq!(params.operation_name(), Some("Op"));
    }

    #[test]
    fn test_parse_skips_malformed_escape() {
        let mut params = Parameters::parse("?query=100%&operationName=Op");
        assert!(!params.contains_key("query"));
        assert_eq!(params.operation_name(), Some("Op"));

        params.set(OPERATION_NAME, "Other");
        assert_eq!(params.to_search(), "?operationName=Other");
    }

    #[test]
    fn test_pretty_print_writes_whole_floats_as_integers() {
        let params = Parameters::parse(
            "?variables=%7B%22a%22%3A1.0%2C%22b%22%3A1e2%2C%22c%22%3A%5B-2.0%2C0.5%5D%7D",
        );
        assert_eq!(
            params.variables(),
            Some("{\n  \"a\": 1,\n  \"b\": 100,\n  \"c\": [\n    -2,\n    0.5\n  ]\n}")
        );
    }

    #[test]
    fn test_duplicate_key_keeps_position() {
        let params = Parameters::parse("?a=1&b=2&a=3");
        let entries: Vec<_> = params.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_to_search_drops_empty_values() {
        let params: Parameters = [("query", "{a}"), ("variables", ""), ("operationName", "Op")]
            .into_iter()
            .collect();
        assert_eq!(params.to_search(), "?query=%7Ba%7D&operationName=Op");
    }

    #[test]
    fn test_empty_to_search() {
        assert_eq!(Parameters::new().to_search(), "?");
        assert_eq!(Parameters::parse("").to_search(), "?");
    }

    #[test]
    fn test_round_trip() {
        let search = "?query=%7B%20user(id%3A%201)%20%7B%20name%20%7D%20%7D&operationName=Get";
        assert_eq!(Parameters::parse(search).to_search(), search);
    }

    #[test]
    fn test_encode_component_matches_uri_component() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("é"), "%C3%A9");
        assert_eq!(encode_component("{\"a\":1}"), "%7B%22a%22%3A1%7D");
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("%C3%A9").unwrap(), "é");
        assert_eq!(decode_component("a+b").unwrap(), "a+b");
        assert!(matches!(
            decode_component("100%"),
            Err(ParamsError::MalformedEscape { .. })
        ));
        assert!(matches!(
            decode_component("%zz"),
            Err(ParamsError::MalformedEscape { .. })
        ));
        assert!(matches!(
            decode_component("%4"),
            Err(ParamsError::MalformedEscape { .. })
        ));
        assert!(matches!(
            decode_component("%C3"),
            Err(ParamsError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn test_set_and_remove() {
        let mut params = Parameters::new();
        assert_eq!(params.set(QUERY, "a"), None);
        assert_eq!(params.set(QUERY, "b"), Some("a".to_string()));
        assert_eq!(params.remove(QUERY), Some("b".to_string()));
        assert!(params.is_empty());
    }

    #[test]
    fn test_variables_json() {
        let params = Parameters::parse("?variables=%7B%22id%22%3A%227%22%7D");
        let value = params.variables_json().unwrap().unwrap();
        assert_eq!(value["id"], "7");

        assert_eq!(Parameters::new().variables_json(), Ok(None));
        assert!(Parameters::parse("?variables=nope").variables_json().is_err());
    }
}
