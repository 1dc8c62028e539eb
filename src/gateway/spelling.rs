//! Table-driven spelling checker used by the offline gateway

use std::collections::{BTreeMap, HashMap};

use crate::model::SpellcheckError;
use crate::util::words;

/// Common misspellings and their corrections
const DEFAULT_MISSPELLINGS: &[(&str, &[&str])] = &[
    ("teh", &["the"]),
    ("wrok", &["work"]),
    ("writting", &["writing"]),
    ("experiance", &["experience"]),
    ("beleive", &["believe"]),
    ("wierd", &["weird"]),
    ("untill", &["until"]),
    ("seperate", &["separate"]),
    ("succes", &["success"]),
    ("sucess", &["success"]),
    ("definitly", &["definitely"]),
    ("goverment", &["government"]),
    ("recieve", &["receive"]),
    ("occured", &["occurred"]),
    ("alot", &["a lot"]),
];

/// Misspelling → corrections, keyed by lowercase word
#[derive(Debug, Clone)]
pub struct SpellDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl Default for SpellDictionary {
    fn default() -> Self {
        let entries = DEFAULT_MISSPELLINGS
            .iter()
            .map(|(word, fixes)| {
                (
                    word.to_string(),
                    fixes.iter().map(|f| f.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }
}

impl SpellDictionary {
    /// Built-in table extended with user entries (user entries win)
    pub fn with_extra(extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut dictionary = Self::default();
        for (word, fixes) in extra {
            dictionary
                .entries
                .insert(word.to_lowercase(), fixes.clone());
        }
        dictionary
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Corrections for `word`, capitalized like the word itself
    pub fn suggestions_for(&self, word: &str) -> Option<Vec<String>> {
        let fixes = self.entries.get(&word.to_lowercase())?;
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        Some(
            fixes
                .iter()
                .map(|fix| if capitalized { capitalize(fix) } else { fix.clone() })
                .collect(),
        )
    }

    /// Every misspelled word in `text`, with its char offset
    pub fn check(&self, text: &str) -> Vec<SpellcheckError> {
        words(text)
            .filter_map(|span| {
                self.suggestions_for(span.word)
                    .map(|fixes| SpellcheckError::new(span.word, fixes, span.index))
            })
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
