//! The composite LPS record: a header, child subs, trailing text and a comment.
//!
//! ## Wire Layout
//!
//! ```text
//! name[#info]:|child[#info]:|child[#info]:|trailing text///comment
//! ```
//!
//! Loading runs in a fixed order:
//!
//! 1. Split once on `///`; the right side is the comment, kept verbatim.
//! 2. Split the rest on every `:|`.
//! 3. The first segment is the header (`name[#info]`).
//! 4. The last segment is the trailing text, kept in stored form.
//! 5. Every segment in between becomes one [`Sub`], added in order.
//!
//! Writing walks the same structure back out. For text produced by this crate
//! the two are inverse:
//!
//! ```rust
//! use lineput::{Line, Record};
//!
//! let line: Line = Line::parse("player:|name#Thomas1000:|level#3:|");
//! assert_eq!(line.name(), "player");
//! assert_eq!(line.get_string("name").as_deref(), Some("Thomas1000"));
//! assert_eq!(line.get_int("level", 0), 3);
//! assert_eq!(line.to_string(), "player:|name#Thomas1000:|level#3:|");
//! ```
//!
//! ## Storage Strategy
//!
//! The child container is fixed by the type parameter: [`Unique`] (the
//! default) keeps one child per name, [`Ordered`](crate::Ordered) keeps every
//! child in insertion order. See [`crate::storage`].
//!
//! ## Hashing and Ordering
//!
//! The 64-bit hash sums the child hashes, so it ignores child order, while
//! [`Line::compare`] falls back to the full wire text and does not. Two ordered
//! lines holding the same children in a different order are therefore equal
//! (same hash) yet compare as unequal.

use crate::escape::{self, COMMENT_MARKER, INFO_SEPARATOR, SEGMENT_DELIMITER};
use crate::hash::string_hash;
use crate::record::Record;
use crate::storage::{Storage, Unique};
use crate::value::Value;
use crate::Sub;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::{trace, warn};

/// A named value with child subs, trailing text and an optional comment.
#[derive(Clone, Debug, Default)]
pub struct Line<S: Storage = Unique> {
    name: String,
    value: Value,
    subs: S,
    raw_text: String,
    comments: String,
}

impl<S: Storage> Line<S> {
    /// Creates an empty line.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Line {
            name: name.into(),
            value: Value::default(),
            subs: S::default(),
            raw_text: String::new(),
            comments: String::new(),
        }
    }

    /// Creates a line from display info, display trailing text and children.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lineput::{Line, Ordered, Sub};
    ///
    /// let line: Line<Ordered> = Line::with_info(
    ///     "item",
    ///     "sword",
    ///     "sharp, shiny",
    ///     [Sub::with_value("atk", 12)],
    /// );
    /// assert_eq!(line.to_string(), "item#sword:|atk#12:|sharp/com shiny");
    /// ```
    #[must_use]
    pub fn with_info(
        name: impl Into<String>,
        info: &str,
        text: &str,
        subs: impl IntoIterator<Item = Sub>,
    ) -> Self {
        let mut line = Line::new(name);
        line.value = Value::from_display(info);
        line.raw_text = escape::encode(text);
        line.extend(subs);
        line
    }

    /// Parses one line of LPS text.
    #[must_use]
    pub fn parse(wire: &str) -> Self {
        let mut line = Line::new(String::new());
        line.load(wire);
        line
    }

    /// Replaces the whole line (header, children, text and comment) with the
    /// content of `wire`.
    ///
    /// A line without any `:|` has a single segment, which is both the header
    /// and the trailing text.
    pub fn load(&mut self, wire: &str) {
        let (body, comments) = wire.split_once(COMMENT_MARKER).unwrap_or((wire, ""));
        self.comments = comments.to_string();

        let mut segments = body.split(SEGMENT_DELIMITER);
        let header = segments.next().unwrap_or_default();
        let (name, info) = header.split_once(INFO_SEPARATOR).unwrap_or((header, ""));
        self.name = name.to_string();
        self.value = Value::from_stored(info);

        self.subs = S::default();
        let rest: Vec<&str> = segments.collect();
        match rest.split_last() {
            Some((text, children)) => {
                self.raw_text = (*text).to_string();
                for segment in children {
                    if let Some(replaced) = self.subs.add(Sub::parse(segment)) {
                        warn!(
                            target: "lineput::line",
                            line = %self.name,
                            sub = %replaced.name(),
                            "duplicate child replaced while loading"
                        );
                    }
                }
            }
            None => self.raw_text = body.to_string(),
        }

        trace!(
            target: "lineput::line",
            name = %self.name,
            subs = self.subs.len(),
            storage = %S::KIND,
            "loaded line"
        );
    }

    /// Copies another line, possibly built over a different strategy.
    ///
    /// Converting to [`Unique`] collapses duplicate names, last one winning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lineput::{Line, Ordered, Unique};
    ///
    /// let list: Line<Ordered> = Line::parse("tags:|t#a:|t#b:|");
    /// let map: Line<Unique> = Line::from_line(&list);
    /// assert_eq!(map.to_string(), "tags:|t#b:|");
    /// ```
    #[must_use]
    pub fn from_line<T: Storage>(other: &Line<T>) -> Self {
        let mut line = Line {
            name: other.name.clone(),
            value: other.value.clone(),
            subs: S::default(),
            raw_text: other.raw_text.clone(),
            comments: other.comments.clone(),
        };
        line.extend(other.subs.iter().cloned());
        line
    }

    /// The child container.
    #[must_use]
    pub fn subs(&self) -> &S {
        &self.subs
    }

    /// Mutable access to the child container, including its positional
    /// operations.
    pub fn subs_mut(&mut self) -> &mut S {
        &mut self.subs
    }

    /// Adds a child. Under [`Unique`] a same-named child is replaced and
    /// returned.
    pub fn add(&mut self, sub: Sub) -> Option<Sub> {
        self.subs.add(sub)
    }

    pub fn remove(&mut self, name: &str) -> Option<Sub> {
        self.subs.remove(name)
    }

    pub fn remove_sub(&mut self, sub: &Sub) -> bool {
        self.subs.remove_sub(sub)
    }

    pub fn remove_all(&mut self, name: &str) -> usize {
        self.subs.remove_all(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.subs.contains(name)
    }

    #[must_use]
    pub fn contains_sub(&self, sub: &Sub) -> bool {
        self.subs.contains_sub(sub)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Sub> {
        self.subs.find(name)
    }

    /// Mutable access to the first child with this name. Under [`Unique`] a
    /// rename through the handle re-keys the child when the handle drops.
    pub fn find_mut(&mut self, name: &str) -> Option<S::SubMut<'_>> {
        self.subs.find_mut(name)
    }

    /// First child with this name whose display info equals `display`.
    #[must_use]
    pub fn find_with_info(&self, name: &str, display: &str) -> Option<&Sub> {
        self.subs
            .iter()
            .find(|s| s.name() == name && s.info() == display)
    }

    #[must_use]
    pub fn find_all(&self, name: &str) -> Vec<&Sub> {
        self.subs.find_all(name)
    }

    #[must_use]
    pub fn find_info(&self, display: &str) -> Option<&Sub> {
        self.subs.find_info(display)
    }

    #[must_use]
    pub fn find_all_info(&self, display: &str) -> Vec<&Sub> {
        self.subs.find_all_info(display)
    }

    #[must_use]
    pub fn search(&self, pattern: &str) -> Option<&Sub> {
        self.subs.search(pattern)
    }

    #[must_use]
    pub fn search_all(&self, pattern: &str) -> Vec<&Sub> {
        self.subs.search_all(pattern)
    }

    /// First child with this name, created empty when missing.
    pub fn find_or_add(&mut self, name: &str) -> S::SubMut<'_> {
        self.subs.find_or_add(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    pub fn clear(&mut self) {
        self.subs.clear();
    }

    pub fn iter(&self) -> S::Iter<'_> {
        self.subs.iter()
    }

    /// Trailing text in stored form.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Trailing text in display form.
    #[must_use]
    pub fn text(&self) -> String {
        escape::decode(&self.raw_text)
    }

    pub fn set_text(&mut self, display: &str) {
        self.raw_text = escape::encode(display);
    }

    /// Trailing text in stored form read as an integer, or zero.
    #[must_use]
    pub fn text_to_int(&self) -> i32 {
        self.raw_text.trim().parse().unwrap_or(0)
    }

    pub fn set_text_int(&mut self, value: i32) {
        self.raw_text = value.to_string();
    }

    /// Stored trailing text read as an `i64`, or zero.
    #[must_use]
    pub fn text_to_int64(&self) -> i64 {
        self.raw_text.trim().parse().unwrap_or(0)
    }

    pub fn set_text_int64(&mut self, value: i64) {
        self.raw_text = value.to_string();
    }

    /// Stored trailing text read as a double, or zero.
    #[must_use]
    pub fn text_to_double(&self) -> f64 {
        self.raw_text.trim().parse().unwrap_or(0.0)
    }

    pub fn set_text_double(&mut self, value: f64) {
        self.raw_text = value.to_string();
    }

    /// The comment after `///`, verbatim.
    #[must_use]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Sets the comment. It is written verbatim, so it must not contain a
    /// newline if the line is part of a document.
    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.comments = comments.into();
    }

    #[must_use]
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.find(name).map_or(default, Record::info_bool)
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.find_or_add(name).set_info_bool(value);
    }

    #[must_use]
    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        self.find(name).map_or(default, Record::info_int)
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.find_or_add(name).set_info_int(value);
    }

    #[must_use]
    pub fn get_int64(&self, name: &str, default: i64) -> i64 {
        self.find(name).map_or(default, Record::info_int64)
    }

    pub fn set_int64(&mut self, name: &str, value: i64) {
        self.find_or_add(name).set_info_int64(value);
    }

    #[must_use]
    pub fn get_double(&self, name: &str, default: f64) -> f64 {
        self.find(name).map_or(default, Record::info_double)
    }

    pub fn set_double(&mut self, name: &str, value: f64) {
        self.find_or_add(name).set_info_double(value);
    }

    #[must_use]
    pub fn get_float(&self, name: &str, default: f64) -> f64 {
        self.find(name).map_or(default, Record::info_float)
    }

    pub fn set_float(&mut self, name: &str, value: f64) {
        self.find_or_add(name).set_info_float(value);
    }

    #[must_use]
    pub fn get_datetime(&self, name: &str, default: DateTime<Utc>) -> DateTime<Utc> {
        self.find(name).map_or(default, Record::info_datetime)
    }

    pub fn set_datetime(&mut self, name: &str, value: DateTime<Utc>) {
        self.find_or_add(name).set_info_datetime(value);
    }

    /// Display info of the named child, or `None` when there is no such child.
    #[must_use]
    pub fn get_string(&self, name: &str) -> Option<String> {
        self.find(name).map(Record::info)
    }

    pub fn set_string(&mut self, name: &str, display: &str) {
        self.find_or_add(name).set_info(display);
    }

    /// Orders by name, then by info value, then by full wire text.
    ///
    /// The info step compares `other` against `self`, the reverse of what a
    /// reader might expect. Existing data sorts this way, so it is kept.
    #[must_use]
    pub fn compare<T: Storage>(&self, other: &Line<T>) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| other.value.compare(&self.value))
            .then_with(|| self.to_string().cmp(&other.to_string()))
    }

    /// Like [`Line::compare`], with an absent `other` sorting first.
    #[must_use]
    pub fn compare_opt<T: Storage>(&self, other: Option<&Line<T>>) -> Ordering {
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
        for sub in self.subs.iter() {
            sub.write_wire(out);
        }
        out.push_str(&self.raw_text);
        if !self.comments.is_empty() {
            out.push_str(COMMENT_MARKER);
            out.push_str(&self.comments);
        }
    }
}

impl<S: Storage> Record for Line<S> {
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
        let children = self
            .subs
            .iter()
            .fold(0i64, |acc, sub| acc.wrapping_add(sub.long_hash()));
        string_hash(&self.name)
            .wrapping_mul(2)
            .wrapping_add(string_hash(&self.value.stored_text()).wrapping_mul(3))
            .wrapping_add(string_hash(&self.raw_text).wrapping_mul(4))
            .wrapping_add(children)
    }
}

impl<S: Storage> PartialEq for Line<S> {
    fn eq(&self, other: &Self) -> bool {
        self.long_hash() == other.long_hash()
    }
}

impl<S: Storage> Eq for Line<S> {}

impl<S: Storage> Hash for Line<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.long_hash());
    }
}

/// Formats the wire text.
impl<S: Storage> fmt::Display for Line<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(64);
        self.write_wire(&mut out);
        f.write_str(&out)
    }
}

impl<S: Storage> FromStr for Line<S> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Line::parse(s))
    }
}

impl<S: Storage> Extend<Sub> for Line<S> {
    fn extend<I: IntoIterator<Item = Sub>>(&mut self, iter: I) {
        for sub in iter {
            self.subs.add(sub);
        }
    }
}

impl<'a, S: Storage> IntoIterator for &'a Line<S> {
    type Item = &'a Sub;
    type IntoIter = S::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.subs.iter()
    }
}

impl<S: Storage> Serialize for Line<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, S: Storage> Deserialize<'de> for Line<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = String::deserialize(deserializer)?;
        Ok(Line::parse(&wire))
    }
}
