//! Equality and ASCII classification
//!
//! Equality follows a three-way rule on absence: two absent strings are
//! equal, an absent and a present string are not, and two present strings
//! are equal when their content bytes match. Classification is ASCII only.

use crate::buffer::DynString;
use crate::error::IntegerError;

impl DynString {
    /// Byte-for-byte comparison against a raw text literal
    pub fn equals_text(&self, text: impl AsRef<[u8]>) -> bool {
        self.as_bytes() == text.as_ref()
    }

    /// Non-empty and made only of ASCII letters
    pub fn is_alpha(&self) -> bool {
        !self.is_empty() && self.as_bytes().iter().all(u8::is_ascii_alphabetic)
    }

    /// Non-empty and made only of ASCII letters and digits
    pub fn is_alphanumeric(&self) -> bool {
        !self.is_empty() && self.as_bytes().iter().all(u8::is_ascii_alphanumeric)
    }

    /// Contains no ASCII letter. An empty string qualifies.
    pub fn is_non_alpha(&self) -> bool {
        !self.as_bytes().iter().any(u8::is_ascii_alphabetic)
    }

    /// Digits with an optional leading `-`
    pub fn is_integer(&self) -> bool {
        integer_parts(self.as_bytes()).is_some()
    }

    /// Parse the content as a signed decimal integer
    pub fn to_integer(&self) -> Result<i64, IntegerError> {
        if self.is_empty() {
            return Err(IntegerError::Empty);
        }
        let (negative, digits) =
            integer_parts(self.as_bytes()).ok_or(IntegerError::Malformed)?;

        // Accumulate towards the sign so i64::MIN parses.
        digits
            .iter()
            .try_fold(0i64, |acc, &d| {
                let digit = i64::from(d - b'0');
                let shifted = acc.checked_mul(10)?;
                if negative {
                    shifted.checked_sub(digit)
                } else {
                    shifted.checked_add(digit)
                }
            })
            .ok_or(IntegerError::OutOfRange)
    }
}

/// Split off the sign and check that what remains is a non-empty digit run
fn integer_parts(bytes: &[u8]) -> Option<(bool, &[u8])> {
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, bytes),
    };
    (!digits.is_empty() && digits.iter().all(u8::is_ascii_digit)).then_some((negative, digits))
}

impl PartialEq for DynString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for DynString {}

impl PartialEq<[u8]> for DynString {
    fn eq(&self, other: &[u8]) -> bool {
        self.equals_text(other)
    }
}

impl PartialEq<&[u8]> for DynString {
    fn eq(&self, other: &&[u8]) -> bool {
        self.equals_text(other)
    }
}

impl PartialEq<str> for DynString {
    fn eq(&self, other: &str) -> bool {
        self.equals_text(other)
    }
}

impl PartialEq<&str> for DynString {
    fn eq(&self, other: &&str) -> bool {
        self.equals_text(other)
    }
}

pub fn equals(a: Option<&DynString>, b: Option<&DynString>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

pub fn equals_text(a: Option<&DynString>, text: Option<&[u8]>) -> bool {
    match (a, text) {
        (None, None) => true,
        (Some(a), Some(text)) => a.equals_text(text),
        _ => false,
    }
}

pub fn is_alpha(s: Option<&DynString>) -> bool {
    s.is_some_and(DynString::is_alpha)
}

pub fn is_alphanumeric(s: Option<&DynString>) -> bool {
    s.is_some_and(DynString::is_alphanumeric)
}

/// True for absent strings as well as strings without letters
pub fn is_non_alpha(s: Option<&DynString>) -> bool {
    s.is_none_or(DynString::is_non_alpha)
}

pub fn is_integer(s: Option<&DynString>) -> bool {
    s.is_some_and(DynString::is_integer)
}

pub fn to_integer(s: Option<&DynString>) -> Result<i64, IntegerError> {
    s.ok_or(IntegerError::Absent)?.to_integer()
}
