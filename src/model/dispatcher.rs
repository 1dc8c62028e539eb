//! Edit dispatcher state
//!
//! Tracks every outstanding foreground request by id:
//!
//! ```text
//! Idle → Dispatched(span, text) → Resolved | Failed → Idle
//! ```
//!
//! A transform keeps the offsets and text it captured; they are *not* shifted
//! by later splices. Resolution re-validates them against the document and
//! reports a stale anchor on mismatch. Separately, each transform tracks where
//! its span currently sits (shift-or-drop) so the one-per-span rule follows the
//! text rather than the old offsets. Insertion anchors are zero-width and
//! follow the same rule.

use std::ops::Range;

use serde::Serialize;

use crate::editable::{Reconcile, Selection, Splice, TextBuffer};
use crate::error::EditError;

/// Identifies one gateway request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(pub u64);

/// What a transform does with its span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformKind {
    /// Rewrite the span following an instruction
    Instruction(String),
    /// Fetch alternative phrasings (does not splice on completion)
    Rephrase,
}

/// A transform in flight for a captured selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransform {
    pub id: RequestId,
    pub selection: Selection,
    /// Generation of the selection tracker at dispatch time
    pub selection_generation: u64,
    pub kind: TransformKind,
    /// Where the captured span sits now, None once a splice overlapped it
    pub current_span: Option<Range<usize>>,
}

/// A generated-text insertion waiting for its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingInsertion {
    pub id: RequestId,
    /// Current anchor, None once a splice overlapped it
    pub at: Option<usize>,
}

/// Dispatch state for one span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    Dispatched { span: Range<usize>, text: String },
}

#[derive(Debug, Clone, Default)]
pub struct EditDispatcher {
    next_id: u64,
    transforms: Vec<PendingTransform>,
    insertions: Vec<PendingInsertion>,
    draft: Option<RequestId>,
}

impl EditDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh request id
    pub fn next_id(&mut self) -> RequestId {
        self.next_id += 1;
        RequestId(self.next_id)
    }

    /// Phase of the transform lane for exactly this span, as it sits now
    pub fn phase(&self, span: &Range<usize>) -> DispatchPhase {
        self.transforms
            .iter()
            .find(|t| t.current_span.as_ref() == Some(span))
            .map(|t| DispatchPhase::Dispatched {
                span: span.clone(),
                text: t.selection.text.clone(),
            })
            .unwrap_or(DispatchPhase::Idle)
    }

    /// Start a transform over `selection`. At most one per identical span.
    pub fn begin_transform(
        &mut self,
        selection: &Selection,
        selection_generation: u64,
        kind: TransformKind,
    ) -> Result<RequestId, EditError> {
        if let DispatchPhase::Dispatched { span, .. } = self.phase(&selection.range()) {
            return Err(EditError::Busy {
                start: span.start,
                end: span.end,
            });
        }
        let id = self.next_id();
        self.transforms.push(PendingTransform {
            id,
            selection: selection.clone(),
            selection_generation,
            kind,
            current_span: Some(selection.range()),
        });
        Ok(id)
    }

    /// Take the pending transform for `id` (returns it to Idle)
    pub fn finish_transform(&mut self, id: RequestId) -> Option<PendingTransform> {
        let idx = self.transforms.iter().position(|t| t.id == id)?;
        Some(self.transforms.remove(idx))
    }

    pub fn pending_transforms(&self) -> &[PendingTransform] {
        &self.transforms
    }

    /// Place an insertion anchor
    pub fn begin_insertion(&mut self, at: usize) -> RequestId {
        let id = self.next_id();
        self.insertions.push(PendingInsertion { id, at: Some(at) });
        id
    }

    pub fn finish_insertion(&mut self, id: RequestId) -> Option<PendingInsertion> {
        let idx = self.insertions.iter().position(|p| p.id == id)?;
        Some(self.insertions.remove(idx))
    }

    /// Start a draft; a newer draft supersedes an older one
    pub fn begin_draft(&mut self) -> RequestId {
        let id = self.next_id();
        self.draft = Some(id);
        id
    }

    /// True if `id` is the current draft (and clears it)
    pub fn finish_draft(&mut self, id: RequestId) -> bool {
        if self.draft == Some(id) {
            self.draft = None;
            true
        } else {
            false
        }
    }

    /// Any foreground request outstanding
    pub fn is_busy(&self) -> bool {
        !self.transforms.is_empty() || !self.insertions.is_empty() || self.draft.is_some()
    }
}

impl Reconcile for EditDispatcher {
    fn reconcile(&mut self, splice: &Splice, _document: &TextBuffer) {
        for transform in &mut self.transforms {
            if let Some(span) = transform.current_span.take() {
                transform.current_span = splice.remap(span);
            }
        }
        for insertion in &mut self.insertions {
            if let Some(at) = insertion.at {
                insertion.at = splice.remap_offset(at);
                if insertion.at.is_none() {
                    tracing::debug!("insertion anchor {} overlapped by splice", at);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(start: usize, end: usize, text: &str) -> Selection {
        Selection::new(start, end, text)
    }

    #[test]
    fn test_one_transform_per_span() {
        let mut dispatcher = EditDispatcher::new();
        let selection = sel(1, 3, "bc");
        dispatcher
            .begin_transform(&selection, 1, TransformKind::Rephrase)
            .unwrap();

        let again = dispatcher.begin_transform(
            &selection,
            1,
            TransformKind::Instruction("Shorten".to_string()),
        );
        assert_eq!(again, Err(EditError::Busy { start: 1, end: 3 }));

        // A different span is an independent lane
        assert!(dispatcher
            .begin_transform(&sel(3, 5, "de"), 2, TransformKind::Rephrase)
            .is_ok());
    }

    #[test]
    fn test_phase_round_trip() {
        let mut dispatcher = EditDispatcher::new();
        let selection = sel(4, 8, "wrok");
        assert_eq!(dispatcher.phase(&(4..8)), DispatchPhase::Idle);

        let id = dispatcher
            .begin_transform(&selection, 1, TransformKind::Instruction("Fix".into()))
            .unwrap();
        assert_eq!(
            dispatcher.phase(&(4..8)),
            DispatchPhase::Dispatched {
                span: 4..8,
                text: "wrok".to_string()
            }
        );

        let pending = dispatcher.finish_transform(id).unwrap();
        assert_eq!(pending.selection, selection);
        assert_eq!(dispatcher.phase(&(4..8)), DispatchPhase::Idle);
        assert!(dispatcher.finish_transform(id).is_none());
    }

    #[test]
    fn test_busy_span_follows_earlier_edits() {
        let mut doc = TextBuffer::from_text("abcdef");
        let mut dispatcher = EditDispatcher::new();
        dispatcher
            .begin_transform(&sel(3, 6, "def"), 1, TransformKind::Rephrase)
            .unwrap();

        let splice = doc.splice(0, 0, "XY").unwrap();
        dispatcher.reconcile(&splice, &doc);

        // The same text, now at 5..8, is still in flight
        assert_eq!(
            dispatcher.begin_transform(&sel(5, 8, "def"), 1, TransformKind::Rephrase),
            Err(EditError::Busy { start: 5, end: 8 })
        );
        // Whatever moved into the old offsets is free
        assert!(dispatcher
            .begin_transform(&sel(3, 6, "cde"), 2, TransformKind::Rephrase)
            .is_ok());
    }

    #[test]
    fn test_overlapped_span_no_longer_blocks() {
        let mut doc = TextBuffer::from_text("abcdef");
        let mut dispatcher = EditDispatcher::new();
        dispatcher
            .begin_transform(&sel(1, 3, "bc"), 1, TransformKind::Rephrase)
            .unwrap();

        let splice = doc.splice(2, 4, "").unwrap();
        dispatcher.reconcile(&splice, &doc);

        assert_eq!(dispatcher.phase(&(1..3)), DispatchPhase::Idle);
        assert_eq!(dispatcher.pending_transforms()[0].current_span, None);
    }

    #[test]
    fn test_insertion_anchor_follows_splices() {
        let mut doc = TextBuffer::from_text("hello world");
        let mut dispatcher = EditDispatcher::new();
        let id = dispatcher.begin_insertion(6);

        let splice = doc.splice(0, 0, ">> ").unwrap();
        dispatcher.reconcile(&splice, &doc);
        assert!(dispatcher.is_busy());

        let pending = dispatcher.finish_insertion(id).unwrap();
        assert_eq!(pending.at, Some(9));
        assert!(!dispatcher.is_busy());
    }

    #[test]
    fn test_insertion_anchor_dropped_by_overlap() {
        let mut doc = TextBuffer::from_text("hello world");
        let mut dispatcher = EditDispatcher::new();
        let id = dispatcher.begin_insertion(6);

        let splice = doc.splice(4, 8, "").unwrap();
        dispatcher.reconcile(&splice, &doc);

        assert_eq!(dispatcher.finish_insertion(id).unwrap().at, None);
    }

    #[test]
    fn test_newer_draft_supersedes() {
        let mut dispatcher = EditDispatcher::new();
        let first = dispatcher.begin_draft();
        let second = dispatcher.begin_draft();
        assert!(!dispatcher.finish_draft(first));
        assert!(dispatcher.finish_draft(second));
        assert!(!dispatcher.is_busy());
    }
}
