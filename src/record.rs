//! The capability interface shared by [`Sub`](crate::Sub) and
//! [`Line`](crate::Line).
//!
//! Both node kinds are "a name plus one [`Value`]". Everything that only needs
//! that much (the typed info accessors, display-text handling, ids and the
//! 32-bit hash) is written once here as provided methods.

use crate::escape;
use crate::hash::{low_bits, string_hash};
use crate::value::Value;
use chrono::{DateTime, Utc};

/// A named node carrying a typed info value.
///
/// # Examples
///
/// ```rust
/// use lineput::{Record, Sub};
///
/// let mut sub = Sub::new("money");
/// sub.set_info_int(10000);
/// sub.set_info_int(sub.info_int() + 500);
/// assert_eq!(sub.to_string(), "money#10500:|");
/// ```
pub trait Record {
    /// Name of the node. Names carry no uniqueness guarantee at this level.
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    fn value(&self) -> &Value;

    fn value_mut(&mut self) -> &mut Value;

    /// 64-bit content hash. Equality of records is defined by this hash.
    fn long_hash(&self) -> i64;

    /// Low 32 bits of [`Record::long_hash`].
    fn hash32(&self) -> i32 {
        low_bits(self.long_hash())
    }

    /// The name read as an integer, or the string hash of the name when it is
    /// not numeric.
    fn id(&self) -> i64 {
        self.name()
            .parse()
            .unwrap_or_else(|_| string_hash(self.name()))
    }

    fn set_id(&mut self, id: i64) {
        self.set_name(id.to_string());
    }

    /// Escaped info text as written to the wire.
    fn stored_info(&self) -> String {
        self.value().stored_text().into_owned()
    }

    /// Unescaped info text.
    fn info(&self) -> String {
        self.value().display_text()
    }

    fn set_info(&mut self, display: &str) {
        self.value_mut().set_display_text(display);
    }

    /// Splits the stored info on `,` and decodes each non-empty item.
    fn infos(&self) -> Vec<String> {
        self.value()
            .stored_text()
            .split(escape::LIST_SEPARATOR)
            .filter(|item| !item.is_empty())
            .map(escape::decode)
            .collect()
    }

    fn first_info(&self) -> Option<String> {
        self.infos().into_iter().next()
    }

    fn last_info(&self) -> Option<String> {
        self.infos().pop()
    }

    fn info_int(&self) -> i32 {
        self.value().integer()
    }

    fn set_info_int(&mut self, value: i32) {
        self.value_mut().set_integer(value);
    }

    fn info_int64(&self) -> i64 {
        self.value().integer64()
    }

    fn set_info_int64(&mut self, value: i64) {
        self.value_mut().set_integer64(value);
    }

    fn info_double(&self) -> f64 {
        self.value().double()
    }

    fn set_info_double(&mut self, value: f64) {
        self.value_mut().set_double(value);
    }

    fn info_float(&self) -> f64 {
        self.value().float()
    }

    fn set_info_float(&mut self, value: f64) {
        self.value_mut().set_float(value);
    }

    fn info_bool(&self) -> bool {
        self.value().boolean()
    }

    fn set_info_bool(&mut self, value: bool) {
        self.value_mut().set_boolean(value);
    }

    fn info_datetime(&self) -> DateTime<Utc> {
        self.value().datetime()
    }

    fn set_info_datetime(&mut self, value: DateTime<Utc>) {
        self.value_mut().set_datetime(value);
    }

    /// Replaces the value wholesale, keeping whatever type it carries.
    fn set_value(&mut self, value: Value) {
        *self.value_mut() = value;
    }
}
