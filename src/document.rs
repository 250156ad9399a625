//! Multi-line LPS documents.
//!
//! A document is a list of [`Line`]s, one per text line. Reading drops `\r`
//! and skips blank lines; writing joins lines with the configured line ending.
//!
//! ```rust
//! use lineput::Document;
//!
//! let mut doc: Document = "money#10000:|\ncomputer:|name#我的电脑:|".parse().unwrap();
//! let money = doc.get_int("money", 0);
//! doc.set_int("money", money + 500);
//! assert_eq!(doc.to_string(), "money#10500:|\ncomputer:|name#我的电脑:|");
//! ```

use crate::line::Line;
use crate::options::LpsOptions;
use crate::record::Record;
use crate::storage::{Storage, Unique};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// An ordered collection of lines whose children use strategy `S`.
#[derive(Clone, Debug, Default)]
pub struct Document<S: Storage = Unique> {
    lines: Vec<Line<S>>,
}

impl<S: Storage> Document<S> {
    #[must_use]
    pub fn new() -> Self {
        Document { lines: Vec::new() }
    }

    /// Parses a whole document.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut doc = Document::new();
        doc.load(text);
        doc
    }

    /// Appends every non-blank line of `text`.
    pub fn load(&mut self, text: &str) {
        let before = self.lines.len();
        for (number, raw) in text.split('\n').enumerate() {
            let line = raw.replace('\r', "");
            if line.trim().is_empty() {
                continue;
            }
            trace!(target: "lineput::document", line = number + 1, "parsing line");
            self.lines.push(Line::parse(&line));
        }
        debug!(
            target: "lineput::document",
            loaded = self.lines.len() - before,
            total = self.lines.len(),
            "loaded document"
        );
    }

    #[must_use]
    pub fn lines(&self) -> &[Line<S>] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut Vec<Line<S>> {
        &mut self.lines
    }

    pub fn add_line(&mut self, line: Line<S>) {
        self.lines.push(line);
    }

    /// First line with this name.
    #[must_use]
    pub fn find_line(&self, name: &str) -> Option<&Line<S>> {
        self.lines.iter().find(|l| l.name() == name)
    }

    pub fn find_line_mut(&mut self, name: &str) -> Option<&mut Line<S>> {
        self.lines.iter_mut().find(|l| l.name() == name)
    }

    /// First line with this name, appending an empty one when missing.
    pub fn find_or_add_line(&mut self, name: &str) -> &mut Line<S> {
        let index = match self.lines.iter().position(|l| l.name() == name) {
            Some(index) => index,
            None => {
                self.lines.push(Line::new(name));
                self.lines.len() - 1
            }
        };
        &mut self.lines[index]
    }

    #[must_use]
    pub fn find_all_lines(&self, name: &str) -> Vec<&Line<S>> {
        self.lines.iter().filter(|l| l.name() == name).collect()
    }

    /// Removes the first line with this name.
    pub fn remove_line(&mut self, name: &str) -> Option<Line<S>> {
        let index = self.lines.iter().position(|l| l.name() == name)?;
        Some(self.lines.remove(index))
    }

    #[must_use]
    pub fn contains_line(&self, name: &str) -> bool {
        self.find_line(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line<S>> {
        self.lines.iter()
    }

    #[must_use]
    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        self.find_line(name).map_or(default, |l| l.info_int())
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.find_or_add_line(name).set_info_int(value);
    }

    #[must_use]
    pub fn get_int64(&self, name: &str, default: i64) -> i64 {
        self.find_line(name).map_or(default, |l| l.info_int64())
    }

    pub fn set_int64(&mut self, name: &str, value: i64) {
        self.find_or_add_line(name).set_info_int64(value);
    }

    #[must_use]
    pub fn get_double(&self, name: &str, default: f64) -> f64 {
        self.find_line(name).map_or(default, |l| l.info_double())
    }

    pub fn set_double(&mut self, name: &str, value: f64) {
        self.find_or_add_line(name).set_info_double(value);
    }

    #[must_use]
    pub fn get_float(&self, name: &str, default: f64) -> f64 {
        self.find_line(name).map_or(default, |l| l.info_float())
    }

    pub fn set_float(&mut self, name: &str, value: f64) {
        self.find_or_add_line(name).set_info_float(value);
    }

    #[must_use]
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.find_line(name).map_or(default, |l| l.info_bool())
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.find_or_add_line(name).set_info_bool(value);
    }

    #[must_use]
    pub fn get_datetime(&self, name: &str, default: DateTime<Utc>) -> DateTime<Utc> {
        self.find_line(name).map_or(default, |l| l.info_datetime())
    }

    pub fn set_datetime(&mut self, name: &str, value: DateTime<Utc>) {
        self.find_or_add_line(name).set_info_datetime(value);
    }

    #[must_use]
    pub fn get_string(&self, name: &str) -> Option<String> {
        self.find_line(name).map(|l| l.info())
    }

    pub fn set_string(&mut self, name: &str, display: &str) {
        self.find_or_add_line(name).set_info(display);
    }

    /// Writes the document using `options`.
    #[must_use]
    pub fn to_string_with_options(&self, options: &LpsOptions) -> String {
        let separator = options.line_ending.as_str();
        let mut out = String::with_capacity(self.lines.len() * 32);
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            line.write_wire(&mut out);
        }
        if options.trailing_newline && !self.lines.is_empty() {
            out.push_str(separator);
        }
        out
    }
}

/// Line-by-line equality using [`Line`] equality.
impl<S: Storage> PartialEq for Document<S> {
    fn eq(&self, other: &Self) -> bool {
        self.lines == other.lines
    }
}

impl<S: Storage> fmt::Display for Document<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_options(&LpsOptions::default()))
    }
}

impl<S: Storage> FromStr for Document<S> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Document::parse(s))
    }
}

impl<S: Storage> Extend<Line<S>> for Document<S> {
    fn extend<I: IntoIterator<Item = Line<S>>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

impl<S: Storage> FromIterator<Line<S>> for Document<S> {
    fn from_iter<I: IntoIterator<Item = Line<S>>>(iter: I) -> Self {
        Document {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<'a, S: Storage> IntoIterator for &'a Document<S> {
    type Item = &'a Line<S>;
    type IntoIter = std::slice::Iter<'a, Line<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl<S: Storage> IntoIterator for Document<S> {
    type Item = Line<S>;
    type IntoIter = std::vec::IntoIter<Line<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

/// Serializes as a sequence of wire lines.
impl<S: Storage> Serialize for Document<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.collect_seq(self.lines.iter())
    }
}

impl<'de, S: Storage> Deserialize<'de> for Document<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let lines = Vec::<Line<S>>::deserialize(deserializer)?;
        Ok(Document { lines })
    }
}
