//! Spellcheck error list
//!
//! Errors carry the character offset of their word at detection time and
//! follow the shift-or-drop rule after every splice.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::editable::{Reconcile, Splice, TextBuffer};

/// A misspelled word and its replacements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellcheckError {
    pub word: String,
    pub suggestions: Vec<String>,
    /// Character offset of `word` in the document
    pub index: usize,
}

impl SpellcheckError {
    pub fn new(word: impl Into<String>, suggestions: Vec<String>, index: usize) -> Self {
        Self {
            word: word.into(),
            suggestions,
            index,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.index..self.index + self.word.chars().count()
    }

    /// The word is still at its recorded offset
    pub fn is_still_valid(&self, document: &TextBuffer) -> bool {
        let range = self.range();
        document.matches_at(range.start, range.end, &self.word)
    }
}

/// Current spellcheck results
#[derive(Debug, Clone, Default)]
pub struct SpellcheckState {
    errors: Vec<SpellcheckError>,
    /// Revision of the last pass whose results were applied
    pub checked_revision: Option<u64>,
}

impl SpellcheckState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[SpellcheckError] {
        &self.errors
    }

    pub fn get(&self, idx: usize) -> Option<&SpellcheckError> {
        self.errors.get(idx)
    }

    /// Replace the list with results from a pass, keeping only entries whose
    /// word is still at its offset. Returns how many were discarded.
    ///
    /// A pass older than the one already applied is discarded whole.
    pub fn apply_results(
        &mut self,
        revision: u64,
        errors: Vec<SpellcheckError>,
        document: &TextBuffer,
    ) -> usize {
        let total = errors.len();
        if self.checked_revision.is_some_and(|checked| revision < checked) {
            return total;
        }
        self.errors = errors
            .into_iter()
            .filter(|e| e.is_still_valid(document))
            .collect();
        self.errors.sort_by_key(|e| e.index);
        self.checked_revision = Some(revision);
        total - self.errors.len()
    }

    /// Remove one entry
    pub fn remove(&mut self, idx: usize) -> Option<SpellcheckError> {
        (idx < self.errors.len()).then(|| self.errors.remove(idx))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
        self.checked_revision = None;
    }
}

impl Reconcile for SpellcheckState {
    fn reconcile(&mut self, splice: &Splice, _document: &TextBuffer) {
        let before = self.errors.len();
        self.errors.retain_mut(|error| match splice.remap(error.range()) {
            Some(range) => {
                error.index = range.start;
                true
            }
            None => false,
        });
        let dropped = before - self.errors.len();
        if dropped > 0 {
            tracing::debug!("dropped {} spellcheck errors overlapped by splice", dropped);
        }
    }
}
