//! Session model - the complete state of one editing session
//!
//! All state lives in [`AppModel`], with one named sub-state per component.
//! Every splice goes through [`AppModel::apply_edit`] (or one of the
//! operations built on it), which runs the invalidation pass over all
//! offset- and content-anchored state immediately after the buffer changes.

pub mod dispatcher;
pub mod find;
pub mod illustration;
pub mod spellcheck;
pub mod status;
pub mod suggestions;

pub use dispatcher::{
    DispatchPhase, EditDispatcher, PendingInsertion, PendingTransform, RequestId, TransformKind,
};
pub use find::FindReplaceState;
pub use illustration::{Illustration, IllustrationState, Storybook, StorybookPage};
pub use spellcheck::{SpellcheckError, SpellcheckState};
pub use status::{StatusKind, StatusLine, TransientMessage};
pub use suggestions::{ProactiveSuggestion, RephraseBatch, RephraseSuggestion, SuggestionStore};

use std::path::PathBuf;

use crate::config::AssistConfig;
use crate::editable::{Reconcile, Selection, SelectionTracker, Splice, TextBuffer};
use crate::error::EditError;
use crate::util::DocumentStats;

/// The document and its file metadata
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub buffer: TextBuffer,
    /// Incremented on every splice; background results carry the revision
    /// they were computed against
    pub revision: u64,
    pub file_path: Option<PathBuf>,
    pub is_modified: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            ..Self::default()
        }
    }
}

/// What happened to an arriving proactive suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Now shown in place of whatever was there
    Shown,
    /// Same snippet as the one already shown; kept the current one
    Kept,
    /// No suggestion for the current text; cleared
    Cleared,
    /// Snippet no longer in the document
    Stale,
    /// Snippet overlaps the active selection
    OverlapsSelection,
    /// An empty result for an older revision; ignored
    Outdated,
}

/// The complete session model
#[derive(Debug)]
pub struct AppModel {
    pub document: Document,
    pub selection: SelectionTracker,
    pub suggestions: SuggestionStore,
    pub spellcheck: SpellcheckState,
    pub find: FindReplaceState,
    pub dispatcher: EditDispatcher,
    pub illustrations: IllustrationState,
    pub status: StatusLine,
    pub config: AssistConfig,
    /// Writing prompts offered for a new document
    pub creative_prompts: Vec<String>,
    /// A proactive analysis is in flight
    pub analyzing: bool,
}

impl AppModel {
    pub fn new(config: AssistConfig) -> Self {
        Self::with_document(Document::new(), config)
    }

    pub fn with_document(document: Document, config: AssistConfig) -> Self {
        Self {
            document,
            selection: SelectionTracker::new(),
            suggestions: SuggestionStore::new(),
            spellcheck: SpellcheckState::new(),
            find: FindReplaceState::new(),
            dispatcher: EditDispatcher::new(),
            illustrations: IllustrationState::new(),
            status: StatusLine::default(),
            config,
            creative_prompts: Vec::new(),
            analyzing: false,
        }
    }

    pub fn with_text(text: &str, config: AssistConfig) -> Self {
        Self::with_document(Document::with_text(text), config)
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.document.buffer
    }

    pub fn content(&self) -> String {
        self.document.buffer.content()
    }

    pub fn revision(&self) -> u64 {
        self.document.revision
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats::of(&self.content())
    }

    // === Splice + invalidation ===

    /// Splice `[start, end)` and reconcile all dependent state
    pub fn apply_edit(&mut self, start: usize, end: usize, text: &str) -> Result<Splice, EditError> {
        let splice = self.document.buffer.splice(start, end, text)?;
        self.after_splice(&splice);
        Ok(splice)
    }

    /// Replace the whole document (drafts, file loads)
    pub fn replace_content(&mut self, text: &str) -> Splice {
        let splice = self.document.buffer.set_content(text);
        self.after_splice(&splice);
        self.selection.clear();
        self.suggestions.clear_rephrase();
        splice
    }

    /// The single invalidation pass, run once after every splice
    fn after_splice(&mut self, splice: &Splice) {
        self.document.revision += 1;
        self.document.is_modified = true;

        let buffer = &self.document.buffer;
        self.selection.reconcile(splice, buffer);
        self.suggestions.reconcile(splice, buffer);
        self.spellcheck.reconcile(splice, buffer);
        self.find.reconcile(splice, buffer);
        self.dispatcher.reconcile(splice, buffer);

        // Rephrase options never outlive the selection they were made for
        self.suggestions
            .retain_rephrase_for(self.selection.generation());

        tracing::trace!(
            "splice {}..{} (+{} chars, Δ {}) → revision {}",
            splice.start,
            splice.end,
            splice.inserted,
            splice.delta(),
            self.document.revision
        );
    }

    // === Selection ===

    /// Capture `[start, end)` as the selection. An empty range clears it.
    pub fn select(&mut self, start: usize, end: usize) -> Result<(), EditError> {
        if start == end {
            self.clear_selection();
            return Ok(());
        }
        let selection = Selection::capture(&self.document.buffer, start, end)?;
        self.selection.set(selection);
        self.suggestions
            .retain_rephrase_for(self.selection.generation());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.suggestions.clear_rephrase();
    }

    // === Foreground transforms ===

    /// Apply a transform result at the offsets captured for it.
    ///
    /// The captured span is re-validated first; on mismatch nothing is
    /// spliced, the originating selection is cleared, and a stale anchor
    /// is reported.
    pub fn resolve_transform(
        &mut self,
        pending: &PendingTransform,
        replacement: &str,
    ) -> Result<Splice, EditError> {
        let captured = &pending.selection;
        let found = self.document.buffer.slice(captured.start, captured.end).ok();
        if found.as_deref() != Some(captured.text.as_str()) {
            if self.selection.generation() == pending.selection_generation {
                self.clear_selection();
            }
            return Err(EditError::StaleAnchor {
                expected: captured.text.clone(),
                found,
            });
        }

        let splice = self.apply_edit(captured.start, captured.end, replacement)?;
        self.clear_selection();
        Ok(splice)
    }

    /// Replace the current selection with rephrase option `idx`.
    ///
    /// Returns `Ok(None)` when there is no such option for this selection.
    pub fn apply_rephrase(&mut self, idx: usize) -> Result<Option<Splice>, EditError> {
        let selection = self.selection.get().cloned().ok_or(EditError::NoSelection)?;
        let Some(phrasing) = self
            .suggestions
            .rephrase_for(self.selection.generation())
            .and_then(|batch| batch.options.get(idx))
            .map(|option| option.phrasing.clone())
        else {
            return Ok(None);
        };

        if !selection.is_still_valid(&self.document.buffer) {
            let found = self.document.buffer.slice(selection.start, selection.end).ok();
            self.clear_selection();
            return Err(EditError::StaleAnchor {
                expected: selection.text,
                found,
            });
        }

        let splice = self.apply_edit(selection.start, selection.end, &phrasing)?;
        self.clear_selection();
        Ok(Some(splice))
    }

    // === Proactive suggestions ===

    /// Decide whether an arriving suggestion is shown
    pub fn offer_suggestion(
        &mut self,
        revision: u64,
        suggestion: Option<ProactiveSuggestion>,
    ) -> SuggestionOutcome {
        let Some(suggestion) = suggestion else {
            if revision != self.document.revision {
                return SuggestionOutcome::Outdated;
            }
            self.suggestions.dismiss_proactive();
            return SuggestionOutcome::Cleared;
        };

        if self
            .suggestions
            .proactive()
            .is_some_and(|current| current.snippet == suggestion.snippet)
        {
            return SuggestionOutcome::Kept;
        }

        let Some(start) = self.document.buffer.find(&suggestion.snippet) else {
            return SuggestionOutcome::Stale;
        };
        let range = start..start + suggestion.snippet.chars().count();
        if self.selection.get().is_some_and(|sel| sel.touches(&range)) {
            return SuggestionOutcome::OverlapsSelection;
        }

        self.suggestions.set_proactive(suggestion);
        SuggestionOutcome::Shown
    }

    /// Replace the first occurrence of the suggestion's snippet.
    ///
    /// Returns `Ok(None)` when no suggestion is shown.
    pub fn accept_suggestion(&mut self) -> Result<Option<Splice>, EditError> {
        let Some(suggestion) = self.suggestions.take_proactive() else {
            return Ok(None);
        };
        let Some(start) = self.document.buffer.find(&suggestion.snippet) else {
            return Err(EditError::StaleAnchor {
                expected: suggestion.snippet,
                found: None,
            });
        };
        let end = start + suggestion.snippet.chars().count();
        self.apply_edit(start, end, &suggestion.suggestion).map(Some)
    }

    // === Spellcheck ===

    /// Replace spellcheck error `idx` with `replacement`
    pub fn correct_spelling(
        &mut self,
        idx: usize,
        replacement: &str,
    ) -> Result<Option<Splice>, EditError> {
        let Some(error) = self.spellcheck.get(idx).cloned() else {
            return Ok(None);
        };
        let range = error.range();
        if !error.is_still_valid(&self.document.buffer) {
            self.spellcheck.remove(idx);
            return Err(EditError::StaleAnchor {
                expected: error.word,
                found: self.document.buffer.slice(range.start, range.end).ok(),
            });
        }
        self.apply_edit(range.start, range.end, replacement).map(Some)
    }

    // === Find & replace ===

    /// Replace the highlighted match with the replacement text
    pub fn replace_current_match(&mut self) -> Result<Option<Splice>, EditError> {
        let Some(range) = self.find.current_match() else {
            return Ok(None);
        };
        if !self
            .document
            .buffer
            .matches_at(range.start, range.end, &self.find.query)
        {
            let found = self.document.buffer.slice(range.start, range.end).ok();
            self.find.refresh(&self.document.buffer);
            return Err(EditError::StaleAnchor {
                expected: self.find.query.clone(),
                found,
            });
        }
        let replacement = self.find.replacement.clone();
        self.apply_edit(range.start, range.end, &replacement)
            .map(Some)
    }

    /// Replace every match, last to first. Returns the number replaced.
    pub fn replace_all_matches(&mut self) -> Result<usize, EditError> {
        let query = self.find.query.clone();
        let replacement = self.find.replacement.clone();
        let ranges: Vec<_> = self.find.matches().iter().rev().cloned().collect();

        let mut replaced = 0;
        for range in ranges {
            // Splicing later matches first leaves earlier offsets untouched
            if !self
                .document
                .buffer
                .matches_at(range.start, range.end, &query)
            {
                tracing::debug!("skipping stale match {}..{}", range.start, range.end);
                continue;
            }
            self.apply_edit(range.start, range.end, &replacement)?;
            replaced += 1;
        }
        Ok(replaced)
    }

    // === Insertion ===

    /// Splice generated text at the insertion's current anchor
    pub fn resolve_insertion(
        &mut self,
        pending: &PendingInsertion,
        text: &str,
    ) -> Result<Splice, EditError> {
        let at = pending.at.ok_or(EditError::StaleAnchor {
            expected: String::new(),
            found: None,
        })?;
        self.apply_edit(at, at, text)
    }
}
