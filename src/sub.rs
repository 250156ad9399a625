//! The atomic LPS record: a name and one typed info value.
//!
//! On the wire a sub is `name#storedInfo:|`, or just `name:|` when its info is
//! empty. Inside a [`Line`](crate::Line) every segment between the header and
//! the trailing text is one sub.
//!
//! ```rust
//! use lineput::{Record, Sub};
//!
//! let sub: Sub = "level#3".parse().unwrap();
//! assert_eq!(sub.name(), "level");
//! assert_eq!(sub.info_int(), 3);
//! assert_eq!(sub.to_string(), "level#3:|");
//! ```

use crate::escape::{self, INFO_SEPARATOR, LIST_SEPARATOR, SEGMENT_DELIMITER};
use crate::hash::string_hash;
use crate::record::Record;
use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A named value.
///
/// Equality and [`Hash`] follow [`Record::long_hash`]; ordering is available
/// through [`Sub::compare`].
#[derive(Clone, Debug, Default)]
pub struct Sub {
    name: String,
    value: Value,
}

impl Sub {
    /// Creates a sub with an empty info.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Sub {
            name: name.into(),
            value: Value::default(),
        }
    }

    /// Parses a wire fragment of the form `name[#storedInfo]`.
    ///
    /// Only the first `#` splits; the info is taken as stored text.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let mut sub = Sub::default();
        sub.load(fragment);
        sub
    }

    /// Creates a sub from a name and display info, escaping the info.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lineput::{Record, Sub};
    ///
    /// let sub = Sub::with_info("path", "a,b#c");
    /// assert_eq!(sub.stored_info(), "a/comb/idc");
    /// assert_eq!(sub.info(), "a,b#c");
    /// ```
    #[must_use]
    pub fn with_info(name: impl Into<String>, display: &str) -> Self {
        Sub {
            name: name.into(),
            value: Value::from_display(display),
        }
    }

    /// Creates a sub holding several display values separated by `,`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lineput::{Record, Sub};
    ///
    /// let sub = Sub::with_infos("tags", &["red", "a,b"]);
    /// assert_eq!(sub.stored_info(), "red,a/comb");
    /// assert_eq!(sub.infos(), vec!["red", "a,b"]);
    /// ```
    #[must_use]
    pub fn with_infos(name: impl Into<String>, displays: &[&str]) -> Self {
        let joined = displays
            .iter()
            .map(|d| escape::encode(d))
            .collect::<Vec<_>>()
            .join(&LIST_SEPARATOR.to_string());
        Sub {
            name: name.into(),
            value: Value::from_stored(joined.trim_end_matches(LIST_SEPARATOR)),
        }
    }

    /// Creates a sub holding a typed value.
    #[must_use]
    pub fn with_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Sub {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Replaces name and info from a wire fragment.
    pub fn load(&mut self, fragment: &str) {
        let (name, info) = fragment
            .split_once(INFO_SEPARATOR)
            .unwrap_or((fragment, ""));
        self.name = name.to_string();
        self.value = Value::from_stored(info);
    }

    /// Copies name and value from another sub.
    pub fn set(&mut self, other: &Sub) {
        self.name.clone_from(&other.name);
        self.value.clone_from(&other.value);
    }

    /// Orders by name (ordinal), then by display info.
    #[must_use]
    pub fn compare(&self, other: &Sub) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.info().cmp(&other.info()))
    }

    /// Like [`Sub::compare`], with an absent `other` sorting first.
    #[must_use]
    pub fn compare_opt(&self, other: Option<&Sub>) -> Ordering {
        match other {
            Some(other) => self.compare(other),
            None => Ordering::Greater,
        }
    }

    pub(crate) fn write_wire(&self, out: &mut String) {
        out.push_str(&self.name);
        let stored = self.value.stored_text();
        if !stored.is_empty() {
            out.push(INFO_SEPARATOR);
            out.push_str(&stored);
        }
        out.push_str(SEGMENT_DELIMITER);
    }
}

impl Record for Sub {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn value(&self) -> &Value {
        &self.value
    }

    fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    fn long_hash(&self) -> i64 {
        string_hash(&self.name)
            .wrapping_mul(2)
            .wrapping_add(string_hash(&self.value.stored_text()).wrapping_mul(3))
    }
}

impl PartialEq for Sub {
    fn eq(&self, other: &Self) -> bool {
        self.long_hash() == other.long_hash()
    }
}

impl Eq for Sub {}

impl Hash for Sub {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.long_hash());
    }
}

/// Formats the wire text, delimiter included.
impl fmt::Display for Sub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.name.len() + 16);
        self.write_wire(&mut out);
        f.write_str(&out)
    }
}

impl FromStr for Sub {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Sub::parse(s))
    }
}

impl Serialize for Sub {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut fragment = self.to_string();
        fragment.truncate(fragment.len() - SEGMENT_DELIMITER.len());
        serializer.serialize_str(&fragment)
    }
}

impl<'de> Deserialize<'de> for Sub {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fragment = String::deserialize(deserializer)?;
        Ok(Sub::parse(&fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_first_hash_only() {
        let sub = Sub::parse("key#a#b");
        assert_eq!(sub.name(), "key");
        assert_eq!(sub.stored_info(), "a#b");
    }

    #[test]
    fn test_parse_without_info() {
        let sub = Sub::parse("flag");
        assert_eq!(sub.name(), "flag");
        assert_eq!(sub.stored_info(), "");
        assert_eq!(sub.to_string(), "flag:|");
    }

    #[test]
    fn test_display_info_is_escaped() {
        let mut sub = Sub::new("note");
        sub.set_info(":|");
        assert!(!sub.stored_info().contains(":|"));
        assert_eq!(sub.info(), ":|");
        let wire = sub.to_string();
        let fragment = wire.strip_suffix(SEGMENT_DELIMITER).unwrap();
        assert_eq!(Sub::parse(fragment).info(), ":|");
    }

    #[test]
    fn test_typed_roundtrip_through_wire() {
        let mut sub = Sub::new("money");
        sub.set_info_int(10000);
        let wire = sub.to_string();
        assert_eq!(wire, "money#10000:|");
        let back = Sub::parse(wire.trim_end_matches(SEGMENT_DELIMITER));
        assert_eq!(back.info_int(), 10000);
        assert_eq!(back, sub);
    }

    #[test]
    fn test_hash_formula() {
        let sub = Sub::with_info("name", "Alex");
        let expected = string_hash("name")
            .wrapping_mul(2)
            .wrapping_add(string_hash("Alex").wrapping_mul(3));
        assert_eq!(sub.long_hash(), expected);
        assert_eq!(sub.hash32(), expected as i32);
    }

    #[test]
    fn test_equality_ignores_value_type() {
        let typed = Sub::with_value("level", 3);
        let text = Sub::parse("level#3");
        assert_eq!(typed, text);
        assert_ne!(typed, Sub::parse("level#4"));
    }

    #[test]
    fn test_compare() {
        let a = Sub::with_info("a", "2");
        let b = Sub::with_info("b", "1");
        let a1 = Sub::with_info("a", "1");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(a.compare(&a1), Ordering::Greater);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
        assert_eq!(a.compare_opt(None), Ordering::Greater);
    }

    #[test]
    fn test_id() {
        let mut sub = Sub::new("42");
        assert_eq!(sub.id(), 42);
        sub.set_name("player".to_string());
        assert_eq!(sub.id(), string_hash("player"));
        sub.set_id(-7);
        assert_eq!(sub.name(), "-7");
    }

    #[test]
    fn test_infos_skip_empty_items() {
        let sub = Sub::parse("list#a,,b/comc,");
        assert_eq!(sub.infos(), vec!["a", "b,c"]);
        assert_eq!(sub.first_info().as_deref(), Some("a"));
        assert_eq!(sub.last_info().as_deref(), Some("b,c"));
        assert_eq!(Sub::new("empty").first_info(), None);
    }

    #[test]
    fn test_with_infos_trims_trailing_separator() {
        let sub = Sub::with_infos("tags", &["a", ""]);
        assert_eq!(sub.stored_info(), "a");
    }

    #[test]
    fn test_set_copies_other() {
        let mut sub = Sub::new("x");
        sub.set(&Sub::with_info("y", "z"));
        assert_eq!(sub.to_string(), "y#z:|");
    }
}
