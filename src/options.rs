//! Output options for multi-line documents.
//!
//! - [`LpsOptions`]: how a [`Document`](crate::Document) is written
//! - [`LineEnding`]: separator placed between lines
//!
//! Reading never needs options: `\r` is dropped and blank lines are skipped
//! whatever ending was used to write the text.
//!
//! ## Examples
//!
//! ```rust
//! use lineput::{Document, LineEnding, LpsOptions};
//!
//! let doc: Document = "a#1:|\nb#2:|".parse().unwrap();
//! let options = LpsOptions::new().with_line_ending(LineEnding::CrLf);
//! assert_eq!(doc.to_string_with_options(&options), "a#1:|\r\nb#2:|");
//! ```

/// Separator written between document lines.
///
/// # Examples
///
/// ```rust
/// use lineput::LineEnding;
///
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Options for writing documents.
///
/// The defaults reproduce the canonical form: `\n` between lines and nothing
/// after the last one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LpsOptions {
    pub line_ending: LineEnding,
    pub trailing_newline: bool,
}

impl LpsOptions {
    /// Creates the default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lineput::{LineEnding, LpsOptions};
    ///
    /// let options = LpsOptions::new();
    /// assert_eq!(options.line_ending, LineEnding::Lf);
    /// assert!(!options.trailing_newline);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Ends the output with one more line ending when the document is not
    /// empty.
    #[must_use]
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }
}
