//! Bounded extraction: ranged copy and slicing
//!
//! Slice bounds are cut points between bytes: bound `k` sits just before byte
//! `k`. `None` means the bound was left unspecified, so `(None, None)` copies
//! everything and `(Some(k), None)` runs to the end.

use crate::buffer::DynString;
use crate::error::GrowError;

impl DynString {
    /// Overwrite this string with up to `count` bytes of `source` from `start`
    ///
    /// The copy is clamped to the end of `source`. Nothing happens when
    /// `source` is empty, `count` is zero, or `start` is not below
    /// `source.len() - 1`.
    pub fn copy_range(&mut self, source: &DynString, start: usize, count: usize) -> Result<(), GrowError> {
        let src = source.as_bytes();
        if src.is_empty() || count == 0 || start >= src.len() - 1 {
            return Ok(());
        }
        self.copy_clamped(src, start, count)
    }

    fn copy_clamped(&mut self, src: &[u8], start: usize, count: usize) -> Result<(), GrowError> {
        let count = count.min(src.len() - start);
        self.overwrite(&src[start..start + count])
    }

    /// Extract the bytes between two cut points into a new string
    ///
    /// Returns `None` when this string is empty, when `begin` is past the
    /// last byte, when `end` is past the end, or when the range is empty.
    /// An unspecified `begin` is only accepted together with an unspecified
    /// `end`. The result is allocated with exactly the room it needs.
    pub fn slice(&self, begin: Option<usize>, end: Option<usize>) -> Option<DynString> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        let (begin, end) = match (begin, end) {
            (None, None) => (0, len),
            (Some(begin), None) if begin < len => (begin, len),
            (Some(begin), Some(end)) if begin < len && end <= len && begin < end => (begin, end),
            _ => return None,
        };

        let count = end - begin;
        let mut out = DynString::with_policy(count + 1, self.policy())?;
        out.copy_clamped(self.as_bytes(), begin, count).ok()?;
        Some(out)
    }
}

pub fn copy_range(
    dest: Option<&mut DynString>,
    source: Option<&DynString>,
    start: usize,
    count: usize,
) -> Result<(), GrowError> {
    match (dest, source) {
        (Some(dest), Some(source)) => dest.copy_range(source, start, count),
        _ => Ok(()),
    }
}

pub fn slice(source: Option<&DynString>, begin: Option<usize>, end: Option<usize>) -> Option<DynString> {
    source?.slice(begin, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "Today I will program in C. Will you?";
    const LONG: &str = "This will be a moderately lengthened string for testing.";

    #[test]
    fn test_copy_range_sequence() {
        let input = DynString::from_text(INPUT);
        let mut output = DynString::new();

        output.copy_range(&input, 1, 4).unwrap();
        assert_eq!(output, "oday");

        output.copy_range(&input, 6, 12).unwrap();
        assert_eq!(output, "I will progr");

        let before = output.clone();
        copy_range(Some(&mut output), Some(&input), 0, 0).unwrap();
        assert_eq!(output, before);

        // count past the end copies the rest
        output.copy_range(&input, 5, 200).unwrap();
        assert_eq!(output, " I will program in C. Will you?");

        let before = output.clone();
        output.copy_range(&input, 1000, 5).unwrap();
        assert_eq!(output, before);

        copy_range(Some(&mut output), None, 5, 1).unwrap();
        assert_eq!(output, before);

        output.copy_range(&input, 15, 0).unwrap();
        assert_eq!(output, before);
    }

    #[test]
    fn test_copy_range_excludes_last_start_index() {
        let input = DynString::from_text("abc");
        let mut output = DynString::from_text("old");
        output.copy_range(&input, 2, 1).unwrap();
        assert_eq!(output, "old");
        output.copy_range(&input, 1, 5).unwrap();
        assert_eq!(output, "bc");
    }

    #[test]
    fn test_copy_range_grows_destination() {
        let input = DynString::from_text(INPUT);
        let mut output = DynString::with_capacity(3).unwrap();
        output.copy_range(&input, 0, INPUT.len()).unwrap();
        assert_eq!(output, INPUT);
        assert!(output.capacity() > output.len());
    }

    #[test]
    fn test_slice_cases() {
        let s = DynString::from_text(LONG);

        assert_eq!(s.slice(Some(5), Some(10)).unwrap(), "will ");
        assert_eq!(s.slice(None, None).unwrap(), LONG);
        assert_eq!(s.slice(Some(23), Some(56)).unwrap(), "ly lengthened string for testing.");
        assert_eq!(s.slice(Some(10), None).unwrap(), "be a moderately lengthened string for testing.");

        assert!(slice(Some(&DynString::new()), Some(0), Some(10)).is_none());
        assert!(slice(None, Some(1), Some(5)).is_none());
    }

    #[test]
    fn test_slice_rejects_bad_ranges() {
        let s = DynString::from_text("abcdef");
        assert!(s.slice(Some(3), Some(3)).is_none());
        assert!(s.slice(Some(4), Some(2)).is_none());
        assert!(s.slice(Some(6), None).is_none());
        assert!(s.slice(Some(0), Some(7)).is_none());
        assert!(s.slice(None, Some(3)).is_none());
    }

    #[test]
    fn test_slice_last_byte_and_exact_capacity() {
        let s = DynString::from_text("abcdef");
        let last = s.slice(Some(5), None).unwrap();
        assert_eq!(last, "f");
        assert_eq!(last.capacity(), 2);

        let whole = s.slice(None, None).unwrap();
        assert_eq!(whole.capacity(), s.len() + 1);
    }
}
