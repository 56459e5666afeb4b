//! In-place transformations: case folding, letter filtering, ranged overwrite

use crate::buffer::DynString;

impl DynString {
    /// ASCII lowercase in place
    pub fn to_lower(&mut self) {
        self.content_mut().make_ascii_lowercase();
    }

    /// ASCII uppercase in place
    pub fn to_upper(&mut self) {
        self.content_mut().make_ascii_uppercase();
    }

    /// Remove every byte that is not an ASCII letter, keeping the order of the rest
    pub fn strip_non_alpha(&mut self) {
        let content = self.content_mut();
        let mut kept = 0;
        for i in 0..content.len() {
            let byte = content[i];
            if byte.is_ascii_alphabetic() {
                content[kept] = byte;
                kept += 1;
            }
        }
        self.set_len(kept);
    }

    /// Overwrite bytes `start..=end` with the head of `replacement`
    ///
    /// At most `end - start + 1` bytes are written, fewer if `replacement` is
    /// shorter. Nothing happens unless `start <= end < len`. Length and
    /// capacity never change: this is an overwrite, not an insert.
    pub fn set_range(&mut self, replacement: impl AsRef<[u8]>, start: usize, end: usize) {
        let replacement = replacement.as_ref();
        if replacement.is_empty() || start > end || end >= self.len() {
            return;
        }
        let count = replacement.len().min(end - start + 1);
        self.content_mut()[start..start + count].copy_from_slice(&replacement[..count]);
    }
}

pub fn to_lower(s: Option<&mut DynString>) {
    if let Some(s) = s {
        s.to_lower();
    }
}

pub fn to_upper(s: Option<&mut DynString>) {
    if let Some(s) = s {
        s.to_upper();
    }
}

pub fn strip_non_alpha(s: Option<&mut DynString>) {
    if let Some(s) = s {
        s.strip_non_alpha();
    }
}

pub fn set_range(dest: Option<&mut DynString>, replacement: Option<&[u8]>, start: usize, end: usize) {
    if let (Some(dest), Some(replacement)) = (dest, replacement) {
        dest.set_range(replacement, start, end);
    }
}
