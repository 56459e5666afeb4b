//! The growable, length-tracked byte string
//!
//! A `DynString` owns a zero-filled region of `capacity` bytes. The first
//! `len` bytes are content and the byte at offset `len` is always `0`, so
//! `len < capacity` holds for every live value. Capacity only ever grows, and
//! only when a mutation needs more room than is allocated: the new capacity
//! is the exact requirement plus the policy's slack.
//!
//! Absence is modelled with `Option`. The free functions in this module (and
//! in the sibling modules) take `Option` operands and treat `None` as a
//! no-op, delegating to the methods on `DynString` otherwise.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bstr::BStr;

use crate::error::GrowError;

/// Capacity of a string built with [`DynString::new`]
pub const DEFAULT_CAPACITY: usize = 200;

/// Extra bytes allocated beyond the exact requirement when a string grows
pub const DEFAULT_GROWTH_SLACK: usize = 50;

/// How much headroom to add when a string has to grow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Bytes added on top of the exact requirement
    pub slack: usize,
}

impl GrowthPolicy {
    pub const fn new(slack: usize) -> Self {
        Self { slack }
    }

    fn target(self, required: usize) -> Result<usize, GrowError> {
        required
            .checked_add(self.slack)
            .ok_or(GrowError::CapacityOverflow)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_GROWTH_SLACK)
    }
}

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A growable byte string with an explicit capacity and a trailing `0` sentinel
///
/// A `DynString` is exclusively owned and performs no synchronization. It may
/// be moved between threads, but sharing one across threads needs a lock.
pub struct DynString {
    buf: Vec<u8>,
    len: usize,
    policy: GrowthPolicy,
    /// Process-unique identity, stable across moves, fresh for every clone
    id: u64,
}

impl DynString {
    /// Create an empty string with [`DEFAULT_CAPACITY`] bytes allocated
    pub fn new() -> Self {
        Self {
            buf: vec![0; DEFAULT_CAPACITY],
            len: 0,
            policy: GrowthPolicy::default(),
            id: next_id(),
        }
    }

    /// Create an empty string with `capacity` bytes allocated
    ///
    /// Returns `None` when `capacity` is zero (there would be no room for the
    /// sentinel) or when the allocation fails.
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        Self::with_policy(capacity, GrowthPolicy::default())
    }

    /// Like [`DynString::with_capacity`], with a custom growth policy
    pub fn with_policy(capacity: usize, policy: GrowthPolicy) -> Option<Self> {
        if capacity == 0 {
            return None;
        }

        let mut buf = Vec::new();
        if let Err(err) = buf.try_reserve_exact(capacity) {
            tracing::warn!(capacity, %err, "allocation failed while constructing string");
            return None;
        }
        buf.resize(capacity, 0);

        Some(Self {
            buf,
            len: 0,
            policy,
            id: next_id(),
        })
    }

    /// Create a string holding a copy of `text`, with the default slack as headroom
    pub fn from_text(text: impl AsRef<[u8]>) -> Self {
        let text = text.as_ref();
        let policy = GrowthPolicy::default();
        let capacity = text.len().saturating_add(1).saturating_add(policy.slack);

        let mut buf = Vec::with_capacity(capacity);
        buf.extend_from_slice(text);
        buf.resize(capacity, 0);

        Self {
            buf,
            len: text.len(),
            policy,
            id: next_id(),
        }
    }

    /// Number of content bytes, not counting the sentinel
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total bytes allocated, including room for the sentinel
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Change the headroom used by future growth. Existing capacity is untouched.
    pub fn set_policy(&mut self, policy: GrowthPolicy) {
        self.policy = policy;
    }

    /// The content bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The content bytes followed by the `0` sentinel
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    /// The content as a byte string, for formatting
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    /// Drop the content, keeping the allocation
    pub fn clear(&mut self) {
        self.set_len(0);
    }

    /// Replace the content with `text`
    ///
    /// An empty `text` leaves the string unchanged.
    pub fn assign_text(&mut self, text: impl AsRef<[u8]>) -> Result<(), GrowError> {
        let text = text.as_ref();
        if text.is_empty() {
            return Ok(());
        }
        self.overwrite(text)
    }

    /// Replace the content with a copy of `src`
    ///
    /// An empty `src` leaves the string unchanged.
    pub fn assign(&mut self, src: &DynString) -> Result<(), GrowError> {
        self.assign_text(src.as_bytes())
    }

    /// Append the bytes of `other`
    pub fn concat(&mut self, other: &DynString) -> Result<(), GrowError> {
        self.push_bytes(other.as_bytes())
    }

    /// Append raw bytes
    pub fn push_bytes(&mut self, bytes: impl AsRef<[u8]>) -> Result<(), GrowError> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Ok(());
        }

        let new_len = self
            .len
            .checked_add(bytes.len())
            .ok_or(GrowError::CapacityOverflow)?;
        self.reserve_for_len(new_len)?;

        self.buf[self.len..new_len].copy_from_slice(bytes);
        self.set_len(new_len);
        Ok(())
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn content_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }

    /// Move the sentinel to `len`. The caller guarantees `len < capacity`.
    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len < self.buf.len());
        self.len = len;
        self.buf[len] = 0;
    }

    /// Overwrite the whole content with `bytes`, growing if needed
    pub(crate) fn overwrite(&mut self, bytes: &[u8]) -> Result<(), GrowError> {
        self.reserve_for_len(bytes.len())?;
        self.buf[..bytes.len()].copy_from_slice(bytes);
        self.set_len(bytes.len());
        Ok(())
    }

    /// Replace `removed` bytes at `at` with `inserted`, shifting the tail
    pub(crate) fn splice(
        &mut self,
        at: usize,
        removed: usize,
        inserted: &[u8],
    ) -> Result<(), GrowError> {
        let tail_start = at + removed;
        debug_assert!(tail_start <= self.len);

        let new_len = (self.len - removed)
            .checked_add(inserted.len())
            .ok_or(GrowError::CapacityOverflow)?;
        if inserted.len() > removed {
            self.reserve_for_len(new_len)?;
        }

        self.buf.copy_within(tail_start..self.len, at + inserted.len());
        self.buf[at..at + inserted.len()].copy_from_slice(inserted);
        self.set_len(new_len);
        Ok(())
    }

    /// Make room for `len` content bytes plus the sentinel
    pub(crate) fn reserve_for_len(&mut self, len: usize) -> Result<(), GrowError> {
        let required = len.checked_add(1).ok_or(GrowError::CapacityOverflow)?;
        if self.buf.len() >= required {
            return Ok(());
        }
        let target = self.policy.target(required)?;
        self.grow_to(target)
    }

    /// Grow the allocation to exactly `target` bytes. Never shrinks.
    pub(crate) fn grow_to(&mut self, target: usize) -> Result<(), GrowError> {
        let current = self.buf.len();
        if target <= current {
            return Ok(());
        }

        if let Err(source) = self.buf.try_reserve_exact(target - current) {
            tracing::warn!(
                current,
                requested = target,
                "reallocation failed, mutation abandoned"
            );
            return Err(GrowError::Allocation {
                current,
                requested: target,
                source,
            });
        }
        self.buf.resize(target, 0);

        tracing::trace!(from = current, to = target, "grew string buffer");
        Ok(())
    }
}

impl Clone for DynString {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
            len: self.len,
            policy: self.policy,
            id: next_id(),
        }
    }
}

impl Default for DynString {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DynString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynString")
            .field("text", &self.as_bstr())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl fmt::Display for DynString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl AsRef<[u8]> for DynString {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&str> for DynString {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<&[u8]> for DynString {
    fn from(text: &[u8]) -> Self {
        Self::from_text(text)
    }
}

/// Release a string. Dropping does the same; this exists so absent and
/// present values can be handed back through one call.
pub fn release(s: Option<DynString>) {
    drop(s);
}

/// Copy `text` into `dest`. No-op if either side is absent or `text` is empty.
pub fn assign_text(dest: Option<&mut DynString>, text: Option<&[u8]>) -> Result<(), GrowError> {
    match (dest, text) {
        (Some(dest), Some(text)) => dest.assign_text(text),
        _ => Ok(()),
    }
}

/// Copy `src` into `dest`. No-op if either side is absent or `src` is empty.
pub fn assign(dest: Option<&mut DynString>, src: Option<&DynString>) -> Result<(), GrowError> {
    match (dest, src) {
        (Some(dest), Some(src)) => dest.assign(src),
        _ => Ok(()),
    }
}

/// Append `b` to `a`. No-op if either side is absent or `b` is empty.
pub fn concat(a: Option<&mut DynString>, b: Option<&DynString>) -> Result<(), GrowError> {
    match (a, b) {
        (Some(a), Some(b)) => a.concat(b),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(s: &DynString) {
        assert!(s.len() < s.capacity());
        assert_eq!(s.as_bytes_with_nul()[s.len()], 0);
    }

    #[test]
    fn test_new_has_default_capacity() {
        let s = DynString::new();
        assert_eq!(s.capacity(), DEFAULT_CAPACITY);
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
        assert_eq!(s.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn test_with_capacity_zero_is_absent() {
        assert!(DynString::with_capacity(0).is_none());
        let s = DynString::with_capacity(1).unwrap();
        assert_eq!(s.capacity(), 1);
        assert_invariants(&s);
    }

    #[test]
    fn test_assign_text_basic() {
        let mut s = DynString::new();
        s.assign_text("Jason is working now!").unwrap();
        assert_eq!(s.as_bytes(), b"Jason is working now!");
        assert_eq!(s.capacity(), DEFAULT_CAPACITY);
        assert_invariants(&s);
    }

    #[test]
    fn test_assign_text_grows_with_slack() {
        let text = "C is a programming language. A very powerful one. I like it. Do you?";
        let mut s = DynString::with_capacity(30).unwrap();
        s.assign_text(text).unwrap();
        assert_eq!(s.as_bytes(), text.as_bytes());
        assert_eq!(s.capacity(), text.len() + 1 + DEFAULT_GROWTH_SLACK);
        assert_invariants(&s);
    }

    #[test]
    fn test_assign_text_from_capacity_one() {
        let mut s = DynString::with_capacity(1).unwrap();
        s.assign_text("abcdefghijjiklmnopqrstuvwxyz").unwrap();
        assert_eq!(s.as_bytes(), b"abcdefghijjiklmnopqrstuvwxyz");
    }

    #[test]
    fn test_assign_empty_text_is_noop() {
        let mut s = DynString::from_text("keep me");
        s.assign_text("").unwrap();
        assert_eq!(s.as_bytes(), b"keep me");

        let mut empty = DynString::new();
        empty.assign_text("").unwrap();
        assert_eq!(empty.as_bytes(), b"");
    }

    #[test]
    fn test_assign_shorter_moves_sentinel() {
        let mut s = DynString::from_text("a much longer value");
        s.assign_text("short").unwrap();
        assert_eq!(s.as_bytes(), b"short");
        assert_invariants(&s);
    }

    #[test]
    fn test_assign_from_string() {
        let src = DynString::from_text("This string is way too long for a five byte buffer. I am positive.");
        let mut dest = DynString::with_capacity(5).unwrap();
        dest.assign(&src).unwrap();
        assert_eq!(dest.as_bytes(), src.as_bytes());

        let empty = DynString::new();
        dest.assign(&empty).unwrap();
        assert_eq!(dest.as_bytes(), src.as_bytes());
    }

    #[test]
    fn test_absent_operands_are_noops() {
        let mut s = DynString::from_text("abcdefghijklmnop");
        assign(Some(&mut s), None).unwrap();
        assert_eq!(s.as_bytes(), b"abcdefghijklmnop");

        assign(None, Some(&s)).unwrap();
        assign(None, None).unwrap();
        assign_text(None, Some(b"text".as_slice())).unwrap();
        assign_text(Some(&mut s), None).unwrap();
        assert_eq!(s.as_bytes(), b"abcdefghijklmnop");

        concat(Some(&mut s), None).unwrap();
        concat(None, None).unwrap();
        assert_eq!(s.as_bytes(), b"abcdefghijklmnop");

        release(None);
        release(Some(s));
    }

    #[test]
    fn test_concat_onto_tiny_string() {
        let mut a = DynString::with_capacity(1).unwrap();
        let b = DynString::from_text("Test information. Please keep it a secret!!!");
        a.concat(&b).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_invariants(&a);
    }

    #[test]
    fn test_concat_regular() {
        let mut a = DynString::from_text("Test information. Please keep it a secret!!!");
        let b = DynString::from_text("More confidential info for you to keep to yourself.");
        a.concat(&b).unwrap();
        assert_eq!(
            a.as_bytes(),
            b"Test information. Please keep it a secret!!!More confidential info for you to keep to yourself."
        );
        assert_invariants(&a);
    }

    #[test]
    fn test_growth_never_shrinks() {
        let mut s = DynString::with_capacity(10).unwrap();
        s.assign_text("x".repeat(100)).unwrap();
        let grown = s.capacity();
        s.assign_text("y").unwrap();
        assert_eq!(s.capacity(), grown);
    }

    #[test]
    fn test_custom_policy_slack() {
        let mut s = DynString::with_policy(4, GrowthPolicy::new(0)).unwrap();
        s.push_bytes("hello").unwrap();
        assert_eq!(s.capacity(), 6);
        s.set_policy(GrowthPolicy::new(10));
        s.push_bytes("!").unwrap();
        assert_eq!(s.capacity(), 17);
        assert_eq!(s.as_bytes(), b"hello!");
    }

    #[test]
    fn test_splice_grow_and_shrink() {
        let mut s = DynString::with_policy(8, GrowthPolicy::new(0)).unwrap();
        s.assign_text("a-b-c").unwrap();
        s.splice(1, 1, b"==").unwrap();
        assert_eq!(s.as_bytes(), b"a==b-c");
        s.splice(0, 3, b"").unwrap();
        assert_eq!(s.as_bytes(), b"b-c");
        assert_invariants(&s);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut s = DynString::from_text("something");
        let cap = s.capacity();
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.capacity(), cap);
        assert_invariants(&s);
    }

    #[test]
    fn test_display_and_debug() {
        let s = DynString::from_text("hi there");
        assert_eq!(s.to_string(), "hi there");
        let debug = format!("{:?}", s);
        assert!(debug.contains("hi there"));
        assert!(debug.contains("capacity"));
    }

    #[test]
    fn test_identity_survives_moves_not_clones() {
        let s = DynString::from_text("abc");
        let id = s.id();
        let boxed = Box::new(s);
        assert_eq!(boxed.id(), id);

        let copy = (*boxed).clone();
        assert_ne!(copy.id(), id);
        assert_eq!(copy, *boxed);
        assert_ne!(DynString::new().id(), DynString::new().id());
    }

    #[test]
    fn test_grow_overflow_is_reported() {
        let mut s = DynString::new();
        assert_eq!(s.reserve_for_len(usize::MAX), Err(GrowError::CapacityOverflow));
        assert_eq!(s.capacity(), DEFAULT_CAPACITY);
    }
}
