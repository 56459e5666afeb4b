//! Error types for buffer growth and integer conversion
//!
//! Neither error is fatal. A `GrowError` means the mutation that asked for
//! more room was abandoned and the string still holds its previous content.

use std::collections::TryReserveError;
use thiserror::Error;

/// A reallocation could not be satisfied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrowError {
    /// The requested size does not fit in `usize`
    #[error("requested capacity overflows usize")]
    CapacityOverflow,

    /// The allocator refused the request
    #[error("failed to grow buffer from {current} to {requested} bytes: {source}")]
    Allocation {
        current: usize,
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Why a string could not be converted to an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntegerError {
    /// There was no string to convert
    #[error("no string to convert")]
    Absent,

    /// The string has zero length
    #[error("cannot convert an empty string")]
    Empty,

    /// The string contains something other than an optional leading `-` and digits
    #[error("not a valid integer")]
    Malformed,

    /// The digits are well formed but the value does not fit in an `i64`
    #[error("integer does not fit in 64 bits")]
    OutOfRange,
}

impl IntegerError {
    /// Flat sentinel encoding for callers that store the outcome as an integer
    pub const fn code(self) -> i32 {
        match self {
            IntegerError::Absent => -1,
            IntegerError::Empty => -2,
            IntegerError::Malformed => -3,
            IntegerError::OutOfRange => -4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_error_codes_are_distinct() {
        let codes = [
            IntegerError::Absent.code(),
            IntegerError::Empty.code(),
            IntegerError::Malformed.code(),
            IntegerError::OutOfRange.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(IntegerError::Absent.code(), -1);
        assert_eq!(IntegerError::Empty.code(), -2);
        assert_eq!(IntegerError::Malformed.code(), -3);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(IntegerError::Empty.to_string(), "cannot convert an empty string");
        assert_eq!(
            GrowError::CapacityOverflow.to_string(),
            "requested capacity overflows usize"
        );
    }
}
