//! Substring search
//!
//! The scan is naive: every candidate start position is tried in order and
//! the whole needle is compared there, so the first hit is always the lowest
//! matching index at or after the start.

use crate::buffer::DynString;

impl DynString {
    /// Lowest index `i >= start` where `needle` occurs
    ///
    /// Returns `None` for an empty needle or a `start` outside `0..len`.
    pub fn find_from(&self, needle: impl AsRef<[u8]>, start: usize) -> Option<usize> {
        find_bytes(self.as_bytes(), needle.as_ref(), start)
    }

    /// Lowest index where `needle` occurs
    pub fn find(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        self.find_from(needle, 0)
    }

    pub fn contains(&self, needle: impl AsRef<[u8]>) -> bool {
        self.find(needle).is_some()
    }
}

pub(crate) fn find_bytes(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if needle.is_empty() || start >= haystack.len() {
        return None;
    }
    haystack[start..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| start + offset)
}

pub fn find_from(haystack: Option<&DynString>, needle: Option<&[u8]>, start: usize) -> Option<usize> {
    haystack?.find_from(needle?, start)
}

pub fn contains(haystack: Option<&DynString>, needle: Option<&[u8]>) -> bool {
    find_from(haystack, needle, 0).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "This is a test string literal.";

    #[test]
    fn test_find_from() {
        let s = DynString::from_text(SAMPLE);
        assert_eq!(s.find_from("This", 0), Some(0));
        assert_eq!(s.find_from("ing", 5), Some(18));
        assert_eq!(s.find_from("J", 0), None);
        assert_eq!(find_from(Some(&s), None, 10), None);
        assert_eq!(find_from(None, Some(b"test".as_slice()), 10), None);
        assert_eq!(find_from(None, None, 0), None);
        assert_eq!(DynString::new().find_from("abc", 0), None);
    }

    #[test]
    fn test_find_start_bounds() {
        let s = DynString::from_text("abcabc");
        assert_eq!(s.find_from("abc", 1), Some(3));
        assert_eq!(s.find_from("c", 5), Some(5));
        assert_eq!(s.find_from("c", 6), None);
        assert_eq!(s.find_from("", 0), None);
        assert_eq!(s.find_from("abcabcd", 0), None);
    }

    #[test]
    fn test_find_restarts_after_partial_match() {
        // A partial match must not swallow the start of the real one.
        let s = DynString::from_text("aaab");
        assert_eq!(s.find("aab"), Some(1));
        let s = DynString::from_text("abababc");
        assert_eq!(s.find("ababc"), Some(2));
    }

    #[test]
    fn test_contains() {
        let s = DynString::from_text(SAMPLE);
        assert!(!s.contains("clock"));
        assert!(!contains(None, Some(b"jason".as_slice())));
        assert!(!contains(Some(&s), None));
        assert!(s.contains("This"));
        assert!(s.contains("literal"));
        assert!(!contains(None, None));
        let empty = DynString::new();
        assert!(!contains(Some(&empty), None));
        assert!(!empty.contains("test"));
    }

    #[test]
    fn test_find_with_string_needle() {
        let s = DynString::from_text(SAMPLE);
        let needle = DynString::from_text("test");
        assert_eq!(s.find(&needle), Some(10));
    }
}
