//! Splice records and the shift-or-drop remapping rule.
//!
//! Every splice of `[start, end)` carries a length delta
//! `Δ = inserted - (end - start)`. Any other tracked range `[s, e)` is remapped:
//! - `e <= start`: unchanged
//! - `s >= end`: shifted by `Δ`
//! - otherwise: dropped

use std::ops::Range;

use super::buffer::TextBuffer;

/// One applied replacement of `[start, end)` by `inserted` characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splice {
    pub start: usize,
    pub end: usize,
    /// Length of the replacement in characters
    pub inserted: usize,
}

impl Splice {
    pub fn new(start: usize, end: usize, inserted: usize) -> Self {
        Self {
            start,
            end,
            inserted,
        }
    }

    /// Length change caused by this splice
    pub fn delta(&self) -> isize {
        self.inserted as isize - (self.end - self.start) as isize
    }

    /// Remap a tracked range, or None if the splice overlapped it
    pub fn remap(&self, range: Range<usize>) -> Option<Range<usize>> {
        if range.end <= self.start {
            Some(range)
        } else if range.start >= self.end {
            let shift = |offset: usize| (offset as isize + self.delta()) as usize;
            Some(shift(range.start)..shift(range.end))
        } else {
            None
        }
    }

    /// Remap a zero-width anchor
    pub fn remap_offset(&self, offset: usize) -> Option<usize> {
        self.remap(offset..offset).map(|r| r.start)
    }
}

/// State holding offsets or snippets into the document.
///
/// `reconcile` runs once per splice, after the buffer has been updated.
pub trait Reconcile {
    fn reconcile(&mut self, splice: &Splice, document: &TextBuffer);
}
