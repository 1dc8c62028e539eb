//! Proactive suggestions and rephrase batches
//!
//! Proactive suggestions are keyed by content (their snippet), never by offset.
//! Rephrase batches belong to one logical selection, identified by the
//! selection tracker's generation.

use serde::{Deserialize, Serialize};

use crate::editable::{Reconcile, Selection, Splice, TextBuffer};

/// A background suggestion for one snippet of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProactiveSuggestion {
    /// Exact text to replace (first occurrence wins)
    pub snippet: String,
    pub suggestion: String,
    pub reason: String,
}

impl ProactiveSuggestion {
    pub fn new(
        snippet: impl Into<String>,
        suggestion: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            snippet: snippet.into(),
            suggestion: suggestion.into(),
            reason: reason.into(),
        }
    }

    /// The snippet still occurs verbatim in the document
    pub fn is_present_in(&self, document: &TextBuffer) -> bool {
        document.find(&self.snippet).is_some()
    }
}

/// One alternative phrasing of the selected text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RephraseSuggestion {
    pub phrasing: String,
    /// Short label like "More formal"
    pub nuance: String,
}

impl RephraseSuggestion {
    pub fn new(phrasing: impl Into<String>, nuance: impl Into<String>) -> Self {
        Self {
            phrasing: phrasing.into(),
            nuance: nuance.into(),
        }
    }
}

/// Rephrase options computed for one selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RephraseBatch {
    /// Selection generation the options were requested for
    pub selection_generation: u64,
    /// The selection as captured when the request was sent
    pub source: Selection,
    pub options: Vec<RephraseSuggestion>,
}

/// Owner of pending suggestions
#[derive(Debug, Clone, Default)]
pub struct SuggestionStore {
    proactive: Option<ProactiveSuggestion>,
    rephrase: Option<RephraseBatch>,
}

impl SuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn proactive(&self) -> Option<&ProactiveSuggestion> {
        self.proactive.as_ref()
    }

    /// Replace the shown suggestion with a newer one
    pub fn set_proactive(&mut self, suggestion: ProactiveSuggestion) {
        self.proactive = Some(suggestion);
    }

    /// Remove and return the shown suggestion
    pub fn take_proactive(&mut self) -> Option<ProactiveSuggestion> {
        self.proactive.take()
    }

    pub fn dismiss_proactive(&mut self) {
        self.proactive = None;
    }

    pub fn rephrase(&self) -> Option<&RephraseBatch> {
        self.rephrase.as_ref()
    }

    /// Rephrase batch, only if it belongs to the given selection generation
    pub fn rephrase_for(&self, selection_generation: u64) -> Option<&RephraseBatch> {
        self.rephrase
            .as_ref()
            .filter(|batch| batch.selection_generation == selection_generation)
    }

    pub fn set_rephrase(&mut self, batch: RephraseBatch) {
        self.rephrase = Some(batch);
    }

    pub fn clear_rephrase(&mut self) {
        self.rephrase = None;
    }

    /// Drop the rephrase batch unless it belongs to `selection_generation`
    pub fn retain_rephrase_for(&mut self, selection_generation: u64) {
        if self
            .rephrase
            .as_ref()
            .is_some_and(|batch| batch.selection_generation != selection_generation)
        {
            tracing::debug!("selection changed, discarding rephrase options");
            self.rephrase = None;
        }
    }
}

impl Reconcile for SuggestionStore {
    fn reconcile(&mut self, _splice: &Splice, document: &TextBuffer) {
        if let Some(suggestion) = &self.proactive {
            if !suggestion.is_present_in(document) {
                tracing::debug!(
                    "suggestion snippet {:?} no longer in document, discarding",
                    suggestion.snippet
                );
                self.proactive = None;
            }
        }
    }
}
