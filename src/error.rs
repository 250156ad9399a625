//! Error types for LPS parsing, mutation and writing.
//!
//! Loading LPS text never fails: every input splits into a header, child
//! segments and trailing text. The errors below come from the places where a
//! caller can ask for something the data model cannot do.
//!
//! ## Error Categories
//!
//! - **Unsupported Operations**: Positional access on a name-keyed container
//! - **Index Errors**: Positional access past the end of an ordered container
//! - **I/O Errors**: Reader/writer failures in the document helpers
//! - **Custom**: Messages raised through the serde bridge
//!
//! ## Examples
//!
//! ```rust
//! use lineput::{Error, Line, Storage, Sub};
//!
//! let mut line: Line = Line::new("player");
//! line.add(Sub::with_info("name", "Alex"));
//!
//! // A Unique-strategy line is keyed by name and has no positions
//! let err = line.subs().get(0).unwrap_err();
//! assert!(matches!(err, Error::UnsupportedOperation { .. }));
//! ```

use crate::storage::StorageKind;
use std::fmt;
use thiserror::Error;

/// Represents all errors surfaced by the LPS data model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Positional operation invoked on a container that has no positions
    #[error("Unsupported operation: `{operation}` is not available on {storage} storage")]
    UnsupportedOperation {
        operation: &'static str,
        storage: StorageKind,
    },

    /// Positional operation past the end of an ordered container
    #[error("Index out of bounds: index {index}, length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported-operation error for a positional call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lineput::{Error, StorageKind};
    ///
    /// let err = Error::unsupported("index_of", StorageKind::Unique);
    /// assert!(err.to_string().contains("index_of"));
    /// ```
    pub fn unsupported(operation: &'static str, storage: StorageKind) -> Self {
        Error::UnsupportedOperation { operation, storage }
    }

    /// Creates an index error for a position outside `0..len`.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lineput::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_names_operation_and_storage() {
        let err = Error::unsupported("remove_at", StorageKind::Unique);
        let msg = err.to_string();
        assert!(msg.contains("remove_at"));
        assert!(msg.contains("unique"));
    }

    #[test]
    fn test_index_out_of_bounds_message() {
        let err = Error::index_out_of_bounds(5, 2);
        assert_eq!(err.to_string(), "Index out of bounds: index 5, length 2");
    }
}
