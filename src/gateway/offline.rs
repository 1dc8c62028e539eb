//! Deterministic local gateway
//!
//! Rewrites text with simple rules instead of calling a model, so a session
//! works without a backend and tests get predictable results.

use super::{fallback_creative_prompts, Attachment, Gateway, GatewayError, SpellDictionary};
use crate::model::{ProactiveSuggestion, RephraseSuggestion, SpellcheckError};

const FILLER_WORDS: &[&str] = &[
    "very",
    "really",
    "just",
    "basically",
    "actually",
    "quite",
    "literally",
    "totally",
];

const CONTRACTIONS: &[(&str, &str)] = &[
    ("do not", "don't"),
    ("does not", "doesn't"),
    ("did not", "didn't"),
    ("is not", "isn't"),
    ("are not", "aren't"),
    ("cannot", "can't"),
    ("will not", "won't"),
    ("it is", "it's"),
    ("I am", "I'm"),
];

#[derive(Debug, Clone, Default)]
pub struct OfflineGateway {
    dictionary: SpellDictionary,
}

impl OfflineGateway {
    pub fn new(dictionary: SpellDictionary) -> Self {
        Self { dictionary }
    }

    /// Replace every misspelled word with its first correction
    fn fix_spelling(&self, text: &str) -> String {
        let mut out = text.to_string();
        // Back to front keeps earlier char offsets valid
        for error in self.dictionary.check(text).into_iter().rev() {
            let Some(fix) = error.suggestions.first() else {
                continue;
            };
            let start = char_to_byte(&out, error.index);
            let end = char_to_byte(&out, error.index + error.word.chars().count());
            out.replace_range(start..end, fix);
        }
        out
    }
}

impl Gateway for OfflineGateway {
    fn generate_draft(
        &self,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<String, GatewayError> {
        let prompt = prompt.trim();
        if prompt.is_empty() && attachments.is_empty() {
            return Err(GatewayError::malformed("empty prompt"));
        }
        let mut draft = sentence_case(prompt);
        if !attachments.is_empty() {
            let noun = if attachments.len() == 1 { "file" } else { "files" };
            draft.push_str(&format!(
                "\n\nIt draws on {} attached {}.",
                attachments.len(),
                noun
            ));
        }
        Ok(draft)
    }

    fn transform_span(&self, text: &str, instruction: &str) -> Result<String, GatewayError> {
        let instruction = instruction.to_lowercase();
        let fixed = self.fix_spelling(text);
        let result = if ["shorten", "shorter", "concise", "trim"]
            .iter()
            .any(|k| instruction.contains(k))
        {
            remove_fillers(&fixed)
        } else if instruction.contains("upper") {
            fixed.to_uppercase()
        } else if instruction.contains("lower") {
            fixed.to_lowercase()
        } else if instruction.contains("formal") {
            expand_contractions(&fixed)
        } else if instruction.contains("casual") {
            contract(&fixed)
        } else {
            collapse_whitespace(&fixed)
        };
        Ok(result)
    }

    fn rephrase_options(&self, text: &str) -> Result<Vec<RephraseSuggestion>, GatewayError> {
        let fixed = self.fix_spelling(text);
        Ok(vec![
            RephraseSuggestion::new(expand_contractions(&fixed), "More formal"),
            RephraseSuggestion::new(contract(&fixed), "More casual"),
            RephraseSuggestion::new(remove_fillers(&fixed), "More direct"),
        ])
    }

    fn proactive_suggestion(
        &self,
        text: &str,
    ) -> Result<Option<ProactiveSuggestion>, GatewayError> {
        let suggestion = sentences(text).find_map(|sentence| {
            let direct = remove_fillers(sentence);
            (direct != sentence).then(|| {
                ProactiveSuggestion::new(
                    sentence,
                    direct,
                    "Filler words weaken the sentence.",
                )
            })
        });
        Ok(suggestion)
    }

    fn check_spelling(&self, text: &str) -> Result<Vec<SpellcheckError>, GatewayError> {
        Ok(self.dictionary.check(text))
    }

    fn generate_image(&self, _text: &str) -> Result<Option<Vec<u8>>, GatewayError> {
        Ok(None)
    }

    fn generate_for_insertion(&self, prompt: &str) -> Result<String, GatewayError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GatewayError::malformed("empty prompt"));
        }
        Ok(sentence_case(prompt))
    }

    fn creative_prompts(&self) -> Result<Vec<String>, GatewayError> {
        Ok(fallback_creative_prompts())
    }
}

fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Sentences with their terminators, trimmed of surrounding whitespace
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn remove_fillers(text: &str) -> String {
    let kept: Vec<&str> = text
        .split_whitespace()
        .filter(|token| !FILLER_WORDS.contains(&token.to_lowercase().as_str()))
        .collect();
    let joined = kept.join(" ");
    if text.chars().next().is_some_and(char::is_uppercase) {
        capitalize_first(&joined)
    } else {
        joined
    }
}

fn expand_contractions(text: &str) -> String {
    CONTRACTIONS
        .iter()
        .fold(text.to_string(), |acc, (long, short)| acc.replace(short, long))
}

fn contract(text: &str) -> String {
    CONTRACTIONS
        .iter()
        .fold(text.to_string(), |acc, (long, short)| acc.replace(long, short))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalized, ending with a terminator
fn sentence_case(text: &str) -> String {
    let mut out = capitalize_first(text);
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}
