//! Find & replace state
//!
//! Literal, case-sensitive matching. Matches are character ranges that follow
//! the shift-or-drop rule; they are only recomputed when the query changes or
//! a refresh is requested.

use std::ops::Range;

use crate::editable::{Reconcile, Splice, TextBuffer};

#[derive(Debug, Clone, Default)]
pub struct FindReplaceState {
    pub query: String,
    pub replacement: String,
    matches: Vec<Range<usize>>,
    /// Index into `matches` of the highlighted match
    current: usize,
}

impl FindReplaceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query and recompute matches
    pub fn set_query(&mut self, query: impl Into<String>, document: &TextBuffer) {
        self.query = query.into();
        self.refresh(document);
    }

    /// Recompute matches for the current query
    pub fn refresh(&mut self, document: &TextBuffer) {
        self.matches = document.find_all(&self.query);
        self.current = 0;
    }

    pub fn matches(&self) -> &[Range<usize>] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Index of the highlighted match, if any
    pub fn current_index(&self) -> Option<usize> {
        (!self.matches.is_empty()).then_some(self.current)
    }

    pub fn current_match(&self) -> Option<Range<usize>> {
        self.matches.get(self.current).cloned()
    }

    /// Move to the next match, wrapping around
    pub fn next(&mut self) -> Option<Range<usize>> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.matches.len();
        self.current_match()
    }

    /// Move to the previous match, wrapping around
    pub fn prev(&mut self) -> Option<Range<usize>> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = (self.current + self.matches.len() - 1) % self.matches.len();
        self.current_match()
    }

    /// "2 / 5" or "0 / 0"
    pub fn position_label(&self) -> String {
        match self.current_index() {
            Some(idx) => format!("{} / {}", idx + 1, self.matches.len()),
            None => "0 / 0".to_string(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Reconcile for FindReplaceState {
    fn reconcile(&mut self, splice: &Splice, _document: &TextBuffer) {
        let current = self.current_match();
        let mut new_current = None;
        let mut remapped = Vec::with_capacity(self.matches.len());
        for range in self.matches.drain(..) {
            let was_current = current.as_ref() == Some(&range);
            if let Some(range) = splice.remap(range) {
                if was_current {
                    new_current = Some(remapped.len());
                }
                remapped.push(range);
            } else if was_current {
                // Current match is gone; the next one takes its place
                new_current = Some(remapped.len());
            }
        }
        self.matches = remapped;
        self.current = match new_current {
            Some(idx) if idx < self.matches.len() => idx,
            _ => 0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_query_finds_all() {
        let doc = TextBuffer::from_text("cat hat cat");
        let mut find = FindReplaceState::new();
        find.set_query("cat", &doc);
        assert_eq!(find.matches(), &[0..3, 8..11]);
        assert_eq!(find.position_label(), "1 / 2");
    }

    #[test]
    fn test_empty_query_has_no_matches() {
        let doc = TextBuffer::from_text("abc");
        let mut find = FindReplaceState::new();
        find.set_query("", &doc);
        assert_eq!(find.match_count(), 0);
        assert_eq!(find.position_label(), "0 / 0");
        assert!(find.next().is_none());
    }

    #[test]
    fn test_is_case_sensitive() {
        let doc = TextBuffer::from_text("Cat cat");
        let mut find = FindReplaceState::new();
        find.set_query("cat", &doc);
        assert_eq!(find.matches(), &[4..7]);
    }

    #[test]
    fn test_next_prev_wrap() {
        let doc = TextBuffer::from_text("a a a");
        let mut find = FindReplaceState::new();
        find.set_query("a", &doc);
        assert_eq!(find.next(), Some(2..3));
        assert_eq!(find.next(), Some(4..5));
        assert_eq!(find.next(), Some(0..1));
        assert_eq!(find.prev(), Some(4..5));
    }

    #[test]
    fn test_reconcile_drops_replaced_and_keeps_successor_current() {
        let mut doc = TextBuffer::from_text("x x x");
        let mut find = FindReplaceState::new();
        find.set_query("x", &doc);
        find.next(); // current = 2..3

        let splice = doc.splice(2, 3, "yy").unwrap();
        find.reconcile(&splice, &doc);

        assert_eq!(find.matches(), &[0..1, 5..6]);
        assert_eq!(find.current_match(), Some(5..6));
    }
}
