//! Selection capture and tracking.

use std::ops::Range;

use super::buffer::TextBuffer;
use super::span::{Reconcile, Splice};

/// A captured span: offsets plus the text they addressed at capture time
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Selection {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Capture `[start, end)` from the buffer, failing on out-of-range offsets
    pub fn capture(
        buffer: &TextBuffer,
        start: usize,
        end: usize,
    ) -> Result<Self, crate::error::EditError> {
        let text = buffer.slice(start, end)?;
        Ok(Self { start, end, text })
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The captured text is still exactly at the captured offsets
    pub fn is_still_valid(&self, current: &TextBuffer) -> bool {
        current.matches_at(self.start, self.end, &self.text)
    }

    /// Check if `range` touches this selection (inclusive edges)
    pub fn touches(&self, range: &Range<usize>) -> bool {
        range.start <= self.end && range.end >= self.start
    }
}

/// Owner of the current selection.
///
/// The generation counter changes whenever the logical selection changes
/// (capture, clear, drop). Shifting by an earlier splice keeps it.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    current: Option<Selection>,
    generation: u64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new selection
    pub fn capture(&mut self, start: usize, end: usize, text: impl Into<String>) {
        self.current = Some(Selection::new(start, end, text));
        self.generation += 1;
    }

    /// Store an already-built selection
    pub fn set(&mut self, selection: Selection) {
        self.current = Some(selection);
        self.generation += 1;
    }

    /// Clear the selection (no-op when already empty)
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn get(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False when there is no selection or its text moved
    pub fn is_still_valid(&self, current: &TextBuffer) -> bool {
        self.current
            .as_ref()
            .is_some_and(|sel| sel.is_still_valid(current))
    }
}

impl Reconcile for SelectionTracker {
    fn reconcile(&mut self, splice: &Splice, _document: &TextBuffer) {
        let Some(sel) = self.current.as_mut() else {
            return;
        };
        match splice.remap(sel.range()) {
            Some(range) => {
                if range != sel.range() {
                    tracing::trace!(
                        "selection shifted {}..{} → {}..{}",
                        sel.start,
                        sel.end,
                        range.start,
                        range.end
                    );
                }
                sel.start = range.start;
                sel.end = range.end;
            }
            None => {
                tracing::debug!(
                    "selection {}..{} overlapped by splice {}..{}, clearing",
                    sel.start,
                    sel.end,
                    splice.start,
                    splice.end
                );
                self.clear();
            }
        }
    }
}
