//! # lineput
//!
//! Reader and writer for LPS, a line-oriented text format for small keyed
//! records such as game saves and settings files.
//!
//! ## What is LPS?
//!
//! Every text line is one record: a name with an optional info value, any
//! number of named children, a free trailing text and an optional comment.
//!
//! ```text
//! money#10500:|
//! computer:|name#我的电脑:|cores#8:|bought last year///from the old shop
//! ```
//!
//! Values are escaped so that they never contain the structural tokens, which
//! keeps the format trivially splittable. See [`format`] for the full grammar.
//!
//! ## Key Features
//!
//! - **Typed values**: integers, doubles, nine-digit fixed decimals, booleans
//!   and UTC datetimes, all readable leniently from text
//! - **Two child strategies**: [`Ordered`] keeps duplicates and positions,
//!   [`Unique`] keeps one child per name
//! - **Content hashing**: records compare equal when their 64-bit content
//!   hashes agree
//! - **Serde bridge**: [`Sub`], [`Line`], [`Document`] and [`Value`] serialize
//!   as their wire text
//!
//! ## Quick Start
//!
//! ```rust
//! use lineput::Document;
//!
//! let mut doc: Document = lineput::from_str("money#10000:|");
//! let money = doc.get_int("money", 0);
//! doc.set_int("money", money + 500);
//! assert_eq!(lineput::to_string(&doc), "money#10500:|");
//! ```
//!
//! ### Children
//!
//! ```rust
//! use lineput::Line;
//!
//! let mut line: Line = "computer:|name#我的电脑:|".parse().unwrap();
//! line.set_int("cores", 8);
//! assert_eq!(line.get_string("name").as_deref(), Some("我的电脑"));
//! assert_eq!(line.to_string(), "computer:|name#我的电脑:|cores#8:|");
//! ```
//!
//! ### Building lines with lps_line!
//!
//! ```rust
//! use lineput::{lps_line, Line};
//!
//! let line: Line = lps_line!("player" => "Alex", { "level": 3 });
//! assert_eq!(line.to_string(), "player#Alex:|level#3:|");
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events under the
//! `lineput::line`, `lineput::storage` and `lineput::document` targets. No
//! subscriber is installed.
//!
//! ## Examples
//!
//! - **`simple.rs`** - Loading, editing and writing a document
//! - **`storage_strategies.rs`** - Ordered versus unique children
//!
//! Run any example with: `cargo run --example <name>`

pub mod document;
pub mod error;
pub mod escape;
pub mod format;
pub mod hash;
pub mod line;
pub mod macros;
pub mod options;
pub mod record;
pub mod storage;
pub mod sub;
pub mod value;

pub use document::Document;
pub use error::{Error, Result};
pub use line::Line;
pub use options::{LineEnding, LpsOptions};
pub use record::Record;
pub use storage::{Ordered, Storage, StorageKind, Unique};
pub use sub::Sub;
pub use value::{Fixed, Number, Value};

use std::io;

/// Parses LPS text into a document.
///
/// Parsing is total: malformed segments degrade to empty names or infos.
///
/// # Examples
///
/// ```rust
/// use lineput::{Document, Ordered};
///
/// let doc: Document<Ordered> = lineput::from_str("a#1:|\r\n\r\nb#2:|");
/// assert_eq!(doc.len(), 2);
/// ```
#[must_use]
pub fn from_str<S: Storage>(s: &str) -> Document<S> {
    Document::parse(s)
}

/// Writes a document with the default options.
#[must_use]
pub fn to_string<S: Storage>(doc: &Document<S>) -> String {
    doc.to_string_with_options(&LpsOptions::default())
}

/// Writes a document with custom options.
///
/// # Examples
///
/// ```rust
/// use lineput::{Document, LineEnding, LpsOptions};
///
/// let doc: Document = lineput::from_str("a:|\nb:|");
/// let options = LpsOptions::new()
///     .with_line_ending(LineEnding::CrLf)
///     .with_trailing_newline(true);
/// assert_eq!(lineput::to_string_with_options(&doc, &options), "a:|\r\nb:|\r\n");
/// ```
#[must_use]
pub fn to_string_with_options<S: Storage>(doc: &Document<S>, options: &LpsOptions) -> String {
    doc.to_string_with_options(options)
}

/// Writes a document to a writer with the default options.
///
/// # Examples
///
/// ```rust
/// use lineput::Document;
///
/// let doc: Document = lineput::from_str("money#10500:|");
/// let mut buffer = Vec::new();
/// lineput::to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"money#10500:|");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, S>(writer: W, doc: &Document<S>) -> Result<()>
where
    W: io::Write,
    S: Storage,
{
    to_writer_with_options(writer, doc, &LpsOptions::default())
}

/// Writes a document to a writer with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, S>(
    mut writer: W,
    doc: &Document<S>,
    options: &LpsOptions,
) -> Result<()>
where
    W: io::Write,
    S: Storage,
{
    let text = doc.to_string_with_options(options);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Reads a whole document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use lineput::Document;
/// use std::io::Cursor;
///
/// let doc: Document = lineput::from_reader(Cursor::new(b"money#10500:|\n")).unwrap();
/// assert_eq!(doc.get_int("money", 0), 10500);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the input is not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, S>(mut reader: R) -> Result<Document<S>>
where
    R: io::Read,
    S: Storage,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(from_str(&string))
}

/// Reads a document from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<S: Storage>(v: &[u8]) -> Result<Document<S>> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    Ok(from_str(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_increment_money() {
        let mut doc: Document = from_str("money#10000:|");
        let money = doc.get_int("money", 0);
        doc.set_int("money", money + 500);
        assert_eq!(to_string(&doc), "money#10500:|");
    }

    #[test]
    fn test_two_line_document() {
        let text = "money#10500:|\ncomputer:|name#我的电脑:|";
        let doc: Document = from_str(text);
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc.find_line("computer")
                .and_then(|l| l.get_string("name"))
                .as_deref(),
            Some("我的电脑")
        );
        assert_eq!(to_string(&doc), text);
    }

    #[test]
    fn test_writer_and_reader() {
        let doc: Document<Ordered> = from_str("a#1:|\nb:|x#2:|text");
        let options = LpsOptions::new().with_trailing_newline(true);
        let mut buffer = Vec::new();
        to_writer_with_options(&mut buffer, &doc, &options).unwrap();
        assert_eq!(buffer, b"a#1:|\nb:|x#2:|text\n");

        let back: Document<Ordered> = from_reader(Cursor::new(buffer)).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let result = from_slice::<Unique>(&[0xff, 0xfe]);
        assert!(matches!(result, Err(Error::Custom(_))));
    }

    #[test]
    fn test_reader_error_is_io() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "boom"))
            }
        }
        let result = from_reader::<_, Unique>(Failing);
        assert!(matches!(result, Err(Error::Io(msg)) if msg.contains("boom")));
    }
}
