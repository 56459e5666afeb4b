//! Resumable first-occurrence replacement
//!
//! A [`ReplaceCursor`] remembers where the last replacement ended and which
//! `(destination, pattern, replacement)` triple it belongs to. Calling
//! [`ReplaceCursor::replace_first`] repeatedly with the same triple walks the
//! occurrences left to right; any change in the triple restarts from the
//! beginning. Each cursor is independent, so separate sequences over
//! separate strings never disturb one another.

use crate::buffer::DynString;
use crate::error::GrowError;

/// The triple a cursor position is valid for. The destination is identified
/// by its [`DynString`] identity, the pattern and replacement by content.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    dest: u64,
    pattern: Vec<u8>,
    replacement: Vec<u8>,
}

impl Target {
    fn matches(&self, dest: u64, pattern: &[u8], replacement: &[u8]) -> bool {
        self.dest == dest && self.pattern == pattern && self.replacement == replacement
    }
}

/// Resumption state for iterative replacement
#[derive(Debug, Clone, Default)]
pub struct ReplaceCursor {
    position: usize,
    target: Option<Target>,
}

impl ReplaceCursor {
    pub const fn new() -> Self {
        Self {
            position: 0,
            target: None,
        }
    }

    /// Where the next search starts
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Forget the remembered triple so the next call starts from the beginning
    pub fn reset(&mut self) {
        self.position = 0;
        self.target = None;
    }

    /// Replace the next occurrence of `pattern` in `dest` with `replacement`
    ///
    /// Returns `Ok(false)` when nothing was replaced: `dest`, `pattern` or
    /// `replacement` is empty, or no occurrence remains past the cursor.
    /// After a replacement the cursor sits just past the inserted text, so a
    /// replacement containing the pattern is never matched again.
    ///
    /// The destination is tracked by identity, not by address: moving it
    /// keeps the cursor, while a different string (a clone included) starts
    /// over. If `dest` has to grow and cannot, `dest` and the cursor are
    /// unchanged.
    pub fn replace_first(
        &mut self,
        dest: &mut DynString,
        pattern: impl AsRef<[u8]>,
        replacement: impl AsRef<[u8]>,
    ) -> Result<bool, GrowError> {
        let pattern = pattern.as_ref();
        let replacement = replacement.as_ref();
        if dest.is_empty() || pattern.is_empty() || replacement.is_empty() {
            return Ok(false);
        }

        let same_target = self
            .target
            .as_ref()
            .is_some_and(|target| target.matches(dest.id(), pattern, replacement));
        let start = if same_target { self.position } else { 0 };

        let found = dest.find_from(pattern, start);
        if let Some(at) = found {
            dest.splice(at, pattern.len(), replacement)?;
        }

        if !same_target {
            tracing::debug!(previous = self.position, "replace cursor reset for new target");
            self.target = Some(Target {
                dest: dest.id(),
                pattern: pattern.to_vec(),
                replacement: replacement.to_vec(),
            });
        }

        match found {
            Some(at) => {
                self.position = at + replacement.len();
                Ok(true)
            }
            None => {
                self.position = start;
                Ok(false)
            }
        }
    }
}

impl DynString {
    /// Replace every occurrence of `pattern`, left to right, returning how many were replaced
    ///
    /// Text inserted by a replacement is not searched again. On a growth
    /// failure the replacements made so far stay in the string but their
    /// count is lost; drive a [`ReplaceCursor`] directly to keep track of it.
    pub fn replace_all(
        &mut self,
        pattern: impl AsRef<[u8]>,
        replacement: impl AsRef<[u8]>,
    ) -> Result<usize, GrowError> {
        let pattern = pattern.as_ref();
        let replacement = replacement.as_ref();
        let mut cursor = ReplaceCursor::new();
        let mut count = 0;
        while cursor.replace_first(self, pattern, replacement)? {
            count += 1;
        }
        Ok(count)
    }
}

/// Absence-aware form of [`ReplaceCursor::replace_first`]
pub fn replace_first(
    cursor: &mut ReplaceCursor,
    dest: Option<&mut DynString>,
    pattern: Option<&[u8]>,
    replacement: Option<&[u8]>,
) -> Result<bool, GrowError> {
    match (dest, pattern, replacement) {
        (Some(dest), Some(pattern), Some(replacement)) => {
            cursor.replace_first(dest, pattern, replacement)
        }
        _ => Ok(false),
    }
}
