//! Fixed-capacity text buffer carried inside display commands
//!
//! Commands travel through a statically sized channel, so their text cannot
//! own heap memory. `BoundedText` wraps a `heapless::String` and truncates
//! silently at capacity instead of failing.

use core::fmt;
use core::ops::Deref;

use heapless::String;

/// Capacity in bytes of the text carried by a single command
pub const TEXT_CAPACITY: usize = 160;

/// Truncating string buffer with a fixed byte capacity
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BoundedText<const N: usize = TEXT_CAPACITY> {
    inner: String<N>,
}

impl<const N: usize> BoundedText<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Copy as much of `text` as fits, stopping on a character boundary
    pub fn from_str_truncated(text: &str) -> Self {
        let mut buf = Self::new();
        buf.push_str(text);
        buf
    }

    /// Append a character
    ///
    /// Returns `false` (and leaves the buffer unchanged) when it does not fit.
    pub fn push(&mut self, ch: char) -> bool {
        self.inner.push(ch).is_ok()
    }

    /// Append a single byte of 7-bit text
    ///
    /// Bytes outside the 7-bit range are rejected.
    pub fn push_ascii(&mut self, byte: u8) -> bool {
        byte.is_ascii() && self.push(byte as char)
    }

    /// Append as much of `text` as fits
    ///
    /// Returns the number of bytes appended.
    pub fn push_str(&mut self, text: &str) -> usize {
        let before = self.inner.len();
        for ch in text.chars() {
            if !self.push(ch) {
                break;
            }
        }
        self.inner.len() - before
    }

    /// Last byte of the buffer, if any
    pub fn last_byte(&self) -> Option<u8> {
        self.inner.as_bytes().last().copied()
    }

    /// True once no further byte fits
    pub fn is_full(&self) -> bool {
        self.inner.len() == N
    }

    /// Byte capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Remove all content
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Borrow the content
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

impl<const N: usize> Deref for BoundedText<N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> From<&str> for BoundedText<N> {
    fn from(text: &str) -> Self {
        Self::from_str_truncated(text)
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Write for BoundedText<N> {
    /// Never fails; text past capacity is dropped
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for BoundedText<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}
