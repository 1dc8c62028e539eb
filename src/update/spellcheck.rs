//! Spellcheck handlers

use super::{report_error, schedule_background_passes};
use crate::commands::{Cmd, GatewayRequest};
use crate::messages::SpellMsg;
use crate::model::AppModel;

pub fn update_spellcheck(model: &mut AppModel, msg: SpellMsg) -> Option<Cmd> {
    match msg {
        SpellMsg::CheckReady { revision } => {
            if revision != model.revision() {
                tracing::debug!(
                    "Skipping stale spellcheck request: revision {} != request revision {}",
                    model.revision(),
                    revision
                );
                return None;
            }
            let text = model.content();
            if text.trim().is_empty() {
                model.spellcheck.clear();
                return None;
            }
            Some(Cmd::gateway(GatewayRequest::Spelling { revision, text }))
        }

        SpellMsg::CheckCompleted { revision, errors } => {
            if let Some(checked) = model
                .spellcheck
                .checked_revision
                .filter(|&checked| revision < checked)
            {
                tracing::debug!(
                    "Ignoring spellcheck results for revision {}: revision {} already applied",
                    revision,
                    checked
                );
                return None;
            }
            let received = errors.len();
            let discarded = model
                .spellcheck
                .apply_results(revision, errors, &model.document.buffer);
            if discarded > 0 {
                tracing::debug!(
                    "Discarded {} of {} spellcheck results no longer matching (revision {})",
                    discarded,
                    received,
                    revision
                );
            }
            None
        }

        SpellMsg::Correct { index, replacement } => {
            let replacement = match replacement {
                Some(r) => r,
                None => match model
                    .spellcheck
                    .get(index)
                    .and_then(|e| e.suggestions.first())
                {
                    Some(first) => first.clone(),
                    None => {
                        model.status.info("No correction available");
                        return None;
                    }
                },
            };
            match model.correct_spelling(index, &replacement) {
                Ok(Some(_)) => schedule_background_passes(model),
                Ok(None) => None,
                Err(e) => {
                    report_error(model, "correction not applied", &e);
                    None
                }
            }
        }

        SpellMsg::Ignore(index) => {
            model.spellcheck.remove(index);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssistConfig;
    use crate::model::SpellcheckError;

    #[test]
    fn test_correct_uses_first_suggestion() {
        let mut m = AppModel::with_text("The wrok is done.", AssistConfig::default());
        update_spellcheck(
            &mut m,
            SpellMsg::CheckCompleted {
                revision: 0,
                errors: vec![SpellcheckError::new("wrok", vec!["work".into()], 4)],
            },
        );
        let cmd = update_spellcheck(
            &mut m,
            SpellMsg::Correct {
                index: 0,
                replacement: None,
            },
        );
        assert!(cmd.is_some());
        assert_eq!(m.content(), "The work is done.");
        assert!(m.spellcheck.errors().is_empty());
    }

    #[test]
    fn test_ignore_removes_entry() {
        let mut m = AppModel::with_text("teh", AssistConfig::default());
        update_spellcheck(
            &mut m,
            SpellMsg::CheckCompleted {
                revision: 0,
                errors: vec![SpellcheckError::new("teh", vec!["the".into()], 0)],
            },
        );
        update_spellcheck(&mut m, SpellMsg::Ignore(0));
        assert!(m.spellcheck.errors().is_empty());
        assert_eq!(m.content(), "teh");
    }
}
