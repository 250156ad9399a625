//! Stable 64-bit string hashing used by records and lines.
//!
//! The hash is the first eight bytes of the MD5 digest of the UTF-8 text, read
//! as a little-endian `i64`. It only has to be stable across runs and spread
//! well; nothing here relies on MD5 being collision resistant.

/// Hashes a string to a stable 64-bit value.
///
/// # Examples
///
/// ```rust
/// use lineput::hash::string_hash;
///
/// assert_eq!(string_hash("money"), string_hash("money"));
/// assert_ne!(string_hash("money"), string_hash("Money"));
/// ```
#[must_use]
pub fn string_hash(text: &str) -> i64 {
    let digest = md5::compute(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.0[..8]);
    i64::from_le_bytes(head)
}

/// Truncates a 64-bit hash to its low 32 bits.
#[inline]
#[must_use]
pub const fn low_bits(hash: i64) -> i32 {
    hash as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_digest() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        let expected = i64::from_le_bytes([0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04]);
        assert_eq!(string_hash(""), expected);
    }

    #[test]
    fn test_low_bits() {
        assert_eq!(low_bits(0x1_0000_0002), 2);
        assert_eq!(low_bits(-1), -1);
    }
}
