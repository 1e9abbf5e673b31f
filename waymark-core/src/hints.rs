//! Free-form key/value options attached to requests and responses.
//!
//! Keys keep the spelling they were inserted with but are compared
//! case-insensitively, matching how HTTP header names behave. This matters for
//! responses: header names are copied into the hints verbatim and callers must
//! be able to look them up regardless of the casing the server used.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Ordered, case-insensitive bag of named JSON values.
///
/// # Examples
///
/// ```
/// use waymark_core::Hints;
///
/// let mut hints = Hints::new();
/// hints.put("X-Rate-Limit-Remaining", vec!["123"]);
/// assert_eq!(
///     hints.get("x-rate-limit-remaining"),
///     Some(&serde_json::json!(["123"]))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hints {
    entries: Vec<(String, Value)>,
}

impl Hints {
    /// Create an empty hint bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a hint.
    ///
    /// An existing entry whose key matches case-insensitively is replaced in
    /// place and takes the new key spelling.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => {
                if let Some(entry) = self.entries.get_mut(index) {
                    *entry = (key, value);
                }
            }
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Look up a hint by key, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    }

    /// Whether a hint with the given key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Remove a hint, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key)
            .map(|index| self.entries.remove(index).1)
    }

    /// Read a boolean hint, accepting JSON booleans and the strings
    /// `"true"`/`"false"`.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(text)) => text.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Read a non-negative integer hint, accepting JSON numbers and numeric
    /// strings.
    #[must_use]
    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        match self.get(key) {
            Some(Value::Number(number)) => number.as_u64().unwrap_or(default),
            Some(Value::String(text)) => text.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Read a hint as text. Non-string scalars are rendered with their JSON
    /// representation.
    #[must_use]
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(value_as_text)
            .unwrap_or_else(|| default.to_owned())
    }

    /// Iterate over hints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Number of hints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge every entry of `other` into `self`, replacing matching keys.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.entries {
            self.put(key, value);
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(key))
    }
}

/// Render a scalar JSON value as plain text.
///
/// Strings are returned without quotes; `null`, arrays and objects yield
/// `None` for `null` and their compact JSON form otherwise.
#[must_use]
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Hints {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut hints = Self::new();
        for (key, value) in iter {
            hints.put(key, value);
        }
        hints
    }
}

impl Serialize for Hints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Hints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HintsVisitor)
    }
}

struct HintsVisitor;

impl<'de> Visitor<'de> for HintsVisitor {
    type Value = Hints;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object of hints")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut hints = Hints::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            hints.put(key, value);
        }
        Ok(hints)
    }
}
