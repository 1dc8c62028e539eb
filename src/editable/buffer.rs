//! Document buffer for the splice core.
//!
//! Wraps a `ropey::Rope` and exposes strict, character-offset based reads and
//! splices. Offsets are always validated against the *current* length; nothing
//! is clamped.

use ropey::Rope;
use std::ops::Range;

use super::span::Splice;
use crate::error::EditError;

/// The full document string, addressed by character offsets
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Total length in characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get full content as String
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    /// Fail with `EditError::Range` unless `0 <= start <= end <= len`
    pub fn check_range(&self, start: usize, end: usize) -> Result<(), EditError> {
        let len = self.len_chars();
        if start > end || end > len {
            return Err(EditError::Range { start, end, len });
        }
        Ok(())
    }

    /// Text in `[start, end)`
    pub fn slice(&self, start: usize, end: usize) -> Result<String, EditError> {
        self.check_range(start, end)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    /// True if `[start, end)` is in range and holds exactly `text`
    pub fn matches_at(&self, start: usize, end: usize, text: &str) -> bool {
        if self.check_range(start, end).is_err() {
            return false;
        }
        // Compare char-by-char without allocating
        let slice = self.rope.slice(start..end);
        slice.len_chars() == text.chars().count() && slice.chars().eq(text.chars())
    }

    /// Replace `[start, end)` with `replacement`.
    ///
    /// Returns the splice record used for the invalidation pass.
    pub fn splice(
        &mut self,
        start: usize,
        end: usize,
        replacement: &str,
    ) -> Result<Splice, EditError> {
        self.check_range(start, end)?;
        if start < end {
            self.rope.remove(start..end);
        }
        if !replacement.is_empty() {
            self.rope.insert(start, replacement);
        }
        Ok(Splice::new(start, end, replacement.chars().count()))
    }

    /// Replace the whole content
    pub fn set_content(&mut self, text: &str) -> Splice {
        let len = self.len_chars();
        self.rope = Rope::from_str(text);
        Splice::new(0, len, self.rope.len_chars())
    }

    /// Character offset of the first occurrence of `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let haystack = self.content();
        haystack
            .find(needle)
            .map(|byte| self.rope.byte_to_char(byte))
    }

    /// Character ranges of all non-overlapping occurrences of `needle`
    pub fn find_all(&self, needle: &str) -> Vec<Range<usize>> {
        if needle.is_empty() {
            return Vec::new();
        }
        let needle_chars = needle.chars().count();
        let haystack = self.content();
        haystack
            .match_indices(needle)
            .map(|(byte, _)| {
                let start = self.rope.byte_to_char(byte);
                start..start + needle_chars
            })
            .collect()
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
