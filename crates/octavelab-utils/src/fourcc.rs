//! Four-character codes for component identity.
//!
//! Audio component registries identify manufacturers and plugin subtypes by
//! four-character codes. This module provides a validated wrapper plus a
//! compile-time construction macro.

/// Four-character code (FourCC) used for component identity.
///
/// Must be exactly 4 ASCII characters.
///
/// # Example
///
/// ```
/// use octavelab_utils::{fourcc, FourCharCode};
///
/// // Using the macro (compile-time validated)
/// const MANUFACTURER: FourCharCode = fourcc!(b"alab");
///
/// // Or parsed from a string at runtime
/// let subtype = FourCharCode::from_str("octv").unwrap();
/// assert_eq!(subtype.as_u32(), 0x6F637476);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FourCharCode(pub [u8; 4]);

impl FourCharCode {
    /// Create a new FourCharCode from a 4-byte array.
    ///
    /// # Panics
    /// Debug builds will panic if any byte is not ASCII.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        debug_assert!(bytes[0].is_ascii(), "FourCC bytes must be ASCII");
        debug_assert!(bytes[1].is_ascii(), "FourCC bytes must be ASCII");
        debug_assert!(bytes[2].is_ascii(), "FourCC bytes must be ASCII");
        debug_assert!(bytes[3].is_ascii(), "FourCC bytes must be ASCII");
        Self(*bytes)
    }

    /// Parse a FourCharCode from a string.
    ///
    /// Returns `None` unless the string is exactly 4 characters that encode
    /// to exactly 4 bytes (i.e. plain ASCII). Multi-byte characters make the
    /// code ambiguous, so they are rejected rather than truncated.
    pub fn from_str(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if s.chars().count() != 4 || bytes.len() != 4 {
            return None;
        }
        Some(Self([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Get the FourCC as a 32-bit value (big-endian).
    pub const fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Get the FourCC as a string slice.
    pub fn as_str(&self) -> &str {
        // ASCII is validated in new()/from_str()
        std::str::from_utf8(&self.0).unwrap_or("????")
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl std::fmt::Display for FourCharCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Macro for creating a [`FourCharCode`] at compile time with validation.
///
/// # Example
///
/// ```
/// use octavelab_utils::{fourcc, FourCharCode};
///
/// const MANUFACTURER: FourCharCode = fourcc!(b"alab");
/// const SUBTYPE: FourCharCode = fourcc!(b"octv");
/// ```
///
/// # Compile-time Errors
///
/// The macro will fail to compile if the input is not exactly 4 ASCII bytes.
#[macro_export]
macro_rules! fourcc {
    ($s:literal) => {{
        const BYTES: &[u8] = $s;
        const _: () = assert!(BYTES.len() == 4, "FourCC must be exactly 4 bytes");
        const _: () = assert!(BYTES[0].is_ascii(), "FourCC byte 0 must be ASCII");
        const _: () = assert!(BYTES[1].is_ascii(), "FourCC byte 1 must be ASCII");
        const _: () = assert!(BYTES[2].is_ascii(), "FourCC byte 2 must be ASCII");
        const _: () = assert!(BYTES[3].is_ascii(), "FourCC byte 3 must be ASCII");
        $crate::FourCharCode::new(&[BYTES[0], BYTES[1], BYTES[2], BYTES[3]])
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_round_trip() {
        const CODE: FourCharCode = fourcc!(b"demo");
        assert_eq!(CODE.as_str(), "demo");
        assert_eq!(CODE.as_bytes(), b"demo");
    }

    #[test]
    fn test_as_u32_big_endian() {
        // 'o' 'c' 't' 'v' packed high byte first
        let code = FourCharCode::new(b"octv");
        assert_eq!(code.as_u32(), 0x6F63_7476);
    }

    #[test]
    fn test_from_str_valid() {
        let code = FourCharCode::from_str("alab").unwrap();
        assert_eq!(code, FourCharCode::new(b"alab"));
    }

    #[test]
    fn test_from_str_wrong_length() {
        assert!(FourCharCode::from_str("abc").is_none());
        assert!(FourCharCode::from_str("abcde").is_none());
        assert!(FourCharCode::from_str("").is_none());
    }

    #[test]
    fn test_from_str_rejects_multibyte() {
        // 4 characters but more than 4 UTF-8 bytes
        assert!(FourCharCode::from_str("ab\u{e9}c").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", FourCharCode::new(b"gain")), "gain");
    }
}
