//! Typed scalar values carried by records.
//!
//! Every record and line holds exactly one [`Value`]. A value remembers what it
//! was last set to (text, integer, double, fixed-point decimal, boolean or
//! date-time) and can project itself as any of those types on demand. What
//! ends up on the wire is its *stored text*, which is always escape safe.
//!
//! ## Core Types
//!
//! - [`Value`]: the scalar itself
//! - [`Number`]: integer, double or fixed-point payloads
//! - [`Fixed`]: a decimal with nine fractional digits backing the float projection
//!
//! ## Lenient Projections
//!
//! Getters never fail. Text that does not parse as the requested type yields
//! the zero value of that type:
//!
//! ```rust
//! use lineput::Value;
//!
//! let value = Value::from_stored("12");
//! assert_eq!(value.integer(), 12);
//! assert_eq!(value.double(), 12.0);
//!
//! let value = Value::from_stored("not a number");
//! assert_eq!(value.integer(), 0);
//! assert!(!value.boolean());
//! ```
//!
//! ## Decimal-Safe Floats
//!
//! The float projection goes through [`Fixed`], so decimal fractions survive
//! without binary drift:
//!
//! ```rust
//! use lineput::Value;
//!
//! let mut value = Value::default();
//! value.set_float(0.1 + 0.2);
//! assert_eq!(value.stored_text(), "0.3");
//! assert_eq!(value.float(), 0.3);
//! ```

use crate::escape;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// A single typed scalar with a canonical, escape-safe stored text form.
#[derive(Clone, Debug)]
pub enum Value {
    /// Stored (already escaped) text.
    Text(String),
    Number(Number),
    Bool(bool),
    DateTime(DateTime<Utc>),
}

/// A numeric payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Double(f64),
    Fixed(Fixed),
}

/// A decimal number with nine fractional digits, stored as a scaled `i128`.
///
/// # Examples
///
/// ```rust
/// use lineput::Fixed;
///
/// let fixed: Fixed = "6969.69".parse().unwrap();
/// assert_eq!(fixed.to_string(), "6969.69");
/// assert_eq!(fixed.to_f64(), 6969.69);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i128);

impl Fixed {
    /// Number of fractional digits kept.
    pub const FRACTION_DIGITS: usize = 9;

    const SCALE: i128 = 1_000_000_000;

    /// Returns the underlying value scaled by 10^9.
    #[inline]
    #[must_use]
    pub const fn scaled(self) -> i128 {
        self.0
    }

    /// Builds a fixed decimal from a value already scaled by 10^9.
    #[inline]
    #[must_use]
    pub const fn from_scaled(scaled: i128) -> Self {
        Fixed(scaled)
    }

    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Fixed(i128::from(value) * Self::SCALE)
    }

    /// Converts a double through its shortest decimal representation, keeping
    /// at most nine fractional digits. Non-finite input becomes zero.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Fixed::default();
        }
        Self::parse_decimal(&value.to_string()).unwrap_or_else(|| {
            if value.is_sign_negative() {
                Fixed(i128::MIN)
            } else {
                Fixed(i128::MAX)
            }
        })
    }

    /// Converts to the nearest double by parsing the decimal text.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.to_string().parse().unwrap_or(0.0)
    }

    /// Integer part, truncated toward zero and saturated to `i64`.
    #[must_use]
    pub fn trunc(self) -> i64 {
        let whole = self.0 / Self::SCALE;
        i64::try_from(whole).unwrap_or(if whole < 0 { i64::MIN } else { i64::MAX })
    }

    fn parse_decimal(text: &str) -> Option<Self> {
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let whole: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut frac: i128 = 0;
        for b in fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(Self::FRACTION_DIGITS)
        {
            frac = frac * 10 + i128::from(b - b'0');
        }

        let magnitude = whole.checked_mul(Self::SCALE)?.checked_add(frac)?;
        Some(Fixed(if negative { -magnitude } else { magnitude }))
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let scale = Self::SCALE.unsigned_abs();
        let whole = magnitude / scale;
        let frac = magnitude % scale;
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let digits = format!("{:09}", frac);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

impl std::str::FromStr for Fixed {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let trimmed = s.trim();
        Fixed::parse_decimal(trimmed)
            .or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Fixed::from_f64)
            })
            .ok_or_else(|| crate::Error::custom(format!("invalid decimal: {:?}", s)))
    }
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[must_use]
    pub fn as_i64(&self) -> i64 {
        match self {
            Number::Integer(i) => *i,
            // `as` saturates and maps NaN to zero
            Number::Double(d) => *d as i64,
            Number::Fixed(x) => x.trunc(),
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Double(d) => *d,
            Number::Fixed(x) => x.to_f64(),
        }
    }

    #[must_use]
    pub fn as_fixed(&self) -> Fixed {
        match self {
            Number::Integer(i) => Fixed::from_i64(*i),
            Number::Double(d) => Fixed::from_f64(*d),
            Number::Fixed(x) => *x,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Double(d) => write!(f, "{}", d),
            Number::Fixed(x) => write!(f, "{}", x),
        }
    }
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y/%m/%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

impl Value {
    /// Wraps text that is already in stored (escaped) form.
    #[must_use]
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Value::Text(stored.into())
    }

    /// Wraps display text, escaping it first.
    #[must_use]
    pub fn from_display(display: &str) -> Self {
        Value::Text(escape::encode(display))
    }

    /// The canonical, escape-safe text written to the wire.
    #[must_use]
    pub fn stored_text(&self) -> Cow<'_, str> {
        match self {
            Value::Text(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::DateTime(dt) => Cow::Owned(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }

    /// Replaces the value with already-escaped text.
    pub fn set_stored_text(&mut self, stored: impl Into<String>) {
        *self = Value::Text(stored.into());
    }

    /// The unescaped text of the value.
    #[must_use]
    pub fn display_text(&self) -> String {
        escape::decode(&self.stored_text())
    }

    pub fn set_display_text(&mut self, display: &str) {
        *self = Value::from_display(display);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    #[must_use]
    pub fn integer64(&self) -> i64 {
        match self {
            Value::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|d| d as i64))
                    .unwrap_or(0)
            }
            Value::Number(n) => n.as_i64(),
            Value::Bool(b) => i64::from(*b),
            Value::DateTime(dt) => dt.timestamp(),
        }
    }

    pub fn set_integer64(&mut self, value: i64) {
        *self = Value::Number(Number::Integer(value));
    }

    /// Projects as `i32`; values outside the `i32` range read as zero.
    #[must_use]
    pub fn integer(&self) -> i32 {
        i32::try_from(self.integer64()).unwrap_or(0)
    }

    pub fn set_integer(&mut self, value: i32) {
        self.set_integer64(i64::from(value));
    }

    #[must_use]
    pub fn double(&self) -> f64 {
        match self {
            Value::Text(s) => s.trim().parse().unwrap_or(0.0),
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::DateTime(dt) => dt.timestamp() as f64,
        }
    }

    pub fn set_double(&mut self, value: f64) {
        *self = Value::Number(Number::Double(value));
    }

    #[must_use]
    pub fn fixed(&self) -> Fixed {
        match self {
            Value::Text(s) => s.parse().unwrap_or_default(),
            Value::Number(n) => n.as_fixed(),
            Value::Bool(b) => Fixed::from_i64(i64::from(*b)),
            Value::DateTime(dt) => Fixed::from_i64(dt.timestamp()),
        }
    }

    /// Float projection, routed through [`Fixed`] so decimal fractions of up
    /// to nine digits come back exactly.
    #[must_use]
    pub fn float(&self) -> f64 {
        self.fixed().to_f64()
    }

    pub fn set_float(&mut self, value: f64) {
        *self = Value::Number(Number::Fixed(Fixed::from_f64(value)));
    }

    #[must_use]
    pub fn boolean(&self) -> bool {
        match self {
            Value::Text(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    true
                } else if s.eq_ignore_ascii_case("false") {
                    false
                } else {
                    s.parse::<f64>().map(|d| d != 0.0).unwrap_or(false)
                }
            }
            Value::Number(n) => n.as_f64() != 0.0,
            Value::Bool(b) => *b,
            Value::DateTime(_) => false,
        }
    }

    pub fn set_boolean(&mut self, value: bool) {
        *self = Value::Bool(value);
    }

    /// Projects as a UTC date-time; unparseable text reads as the Unix epoch.
    #[must_use]
    pub fn datetime(&self) -> DateTime<Utc> {
        match self {
            Value::Text(s) => parse_datetime(s).unwrap_or_else(epoch),
            Value::Number(n) => DateTime::<Utc>::from_timestamp(n.as_i64(), 0).unwrap_or_else(epoch),
            Value::Bool(_) => epoch(),
            Value::DateTime(dt) => *dt,
        }
    }

    pub fn set_datetime(&mut self, value: DateTime<Utc>) {
        *self = Value::DateTime(value);
    }

    /// Orders numerically when both sides hold numbers, otherwise by the
    /// ordinal order of their stored text.
    #[must_use]
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(Number::Integer(a)), Value::Number(Number::Integer(b))) => a.cmp(b),
            (Value::Number(Number::Fixed(a)), Value::Number(Number::Fixed(b))) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a
                .as_f64()
                .partial_cmp(&b.as_f64())
                .unwrap_or_else(|| self.stored_text().cmp(&other.stored_text())),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            _ => self.stored_text().cmp(&other.stored_text()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Text(String::new())
    }
}

/// Two values are equal when their stored text is equal, whatever type they
/// were last set through.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.stored_text() == other.stored_text()
    }
}

impl Eq for Value {}

/// Formats the display (unescaped) text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Text(s) => serializer.serialize_str(&escape::decode(s)),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Double(d)) => serializer.serialize_f64(*d),
            Value::Number(Number::Fixed(x)) => serializer.serialize_str(&x.to_string()),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::DateTime(_) => serializer.serialize_str(&self.stored_text()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => Value::Number(Number::Integer(i)),
                    Err(_) => Value::Number(Number::Double(value as f64)),
                })
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Double(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::from_display(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::default())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(i64::from(value)))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(i64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Double(value))
    }
}

impl From<Fixed> for Value {
    fn from(value: Fixed) -> Self {
        Value::Number(Number::Fixed(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

/// Display text; it is escaped on the way in.
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::from_display(value)
    }
}

/// Display text; it is escaped on the way in.
impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::from_display(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_from_stored_text() {
        let value = Value::from_stored("10000");
        assert_eq!(value.integer(), 10000);
        assert_eq!(value.integer64(), 10000);
    }

    #[test]
    fn test_integer_overflow_reads_zero() {
        let value = Value::from(i64::MAX);
        assert_eq!(value.integer(), 0);
        assert_eq!(value.integer64(), i64::MAX);
    }

    #[test]
    fn test_integer_stored_text() {
        let mut value = Value::default();
        value.set_integer(i32::MIN);
        assert_eq!(value.stored_text(), "-2147483648");
        assert_eq!(Value::from_stored(value.stored_text().into_owned()).integer(), i32::MIN);
    }

    #[test]
    fn test_double_roundtrip_through_text() {
        let mut value = Value::default();
        value.set_double(std::f64::consts::PI);
        let back = Value::from_stored(value.stored_text().into_owned());
        assert_eq!(back.double(), std::f64::consts::PI);
    }

    #[test]
    fn test_float_keeps_nine_digits() {
        let mut value = Value::default();
        value.set_float(1.123456789);
        assert_eq!(value.stored_text(), "1.123456789");
        assert_eq!(value.float(), 1.123456789);

        value.set_float(6969.69);
        let back = Value::from_stored(value.stored_text().into_owned());
        assert_eq!(back.float(), 6969.69);
    }

    #[test]
    fn test_float_truncates_beyond_nine_digits() {
        let mut value = Value::default();
        value.set_float(0.1234567891234);
        assert_eq!(value.stored_text(), "0.123456789");
    }

    #[test]
    fn test_fixed_negative_and_whole() {
        assert_eq!(Fixed::from_f64(-2.5).to_string(), "-2.5");
        assert_eq!(Fixed::from_f64(-0.25).to_string(), "-0.25");
        assert_eq!(Fixed::from_i64(42).to_string(), "42");
        assert_eq!(Fixed::from_f64(f64::NAN), Fixed::default());
        assert_eq!(Fixed::from_f64(-7.9).trunc(), -7);
    }

    #[test]
    fn test_fixed_from_str() {
        assert_eq!("1.5".parse::<Fixed>().unwrap().scaled(), 1_500_000_000);
        assert_eq!(".5".parse::<Fixed>().unwrap().scaled(), 500_000_000);
        assert_eq!("1e3".parse::<Fixed>().unwrap(), Fixed::from_i64(1000));
        assert!("abc".parse::<Fixed>().is_err());
        assert!(".".parse::<Fixed>().is_err());
    }

    #[test]
    fn test_boolean_projection() {
        assert!(Value::from_stored("True").boolean());
        assert!(!Value::from_stored("false").boolean());
        assert!(Value::from_stored("1").boolean());
        assert!(!Value::from_stored("").boolean());
        assert_eq!(Value::from(true).stored_text(), "true");
    }

    #[test]
    fn test_datetime_projection() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let value = Value::from(dt);
        assert_eq!(value.stored_text(), "2024-01-15T10:30:00Z");
        assert_eq!(Value::from_stored(value.stored_text().into_owned()).datetime(), dt);
        assert_eq!(Value::from_stored("2024-01-15 10:30:00").datetime(), dt);
        assert_eq!(Value::from_stored("garbage").datetime(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_stored_text_is_escape_safe() {
        let value = Value::from("a:|b#c,d");
        assert!(!value.stored_text().contains(":|"));
        assert!(!value.stored_text().contains('#'));
        assert_eq!(value.display_text(), "a:|b#c,d");
    }

    #[test]
    fn test_equality_by_stored_text() {
        assert_eq!(Value::from(3), Value::from_stored("3"));
        assert_ne!(Value::from(3), Value::from_stored("03"));
    }

    #[test]
    fn test_compare() {
        assert_eq!(Value::from(9).compare(&Value::from(10)), Ordering::Less);
        assert_eq!(
            Value::from_stored("9").compare(&Value::from_stored("10")),
            Ordering::Greater
        );
        assert_eq!(Value::from(2.5).compare(&Value::from(2)), Ordering::Greater);
    }
}
