//! Proactive suggestion handlers
//!
//! Follows the debounce pattern: a `Ready` message whose revision is no
//! longer current is skipped; a completion is checked against the document
//! on arrival instead.

use super::{report_error, schedule_background_passes};
use crate::commands::{Cmd, GatewayRequest};
use crate::messages::SuggestionMsg;
use crate::model::{AppModel, SuggestionOutcome};
use crate::util::whitespace_word_count;

pub fn update_suggestion(model: &mut AppModel, msg: SuggestionMsg) -> Option<Cmd> {
    match msg {
        SuggestionMsg::AnalysisReady { revision } => {
            if revision != model.revision() {
                tracing::debug!(
                    "Skipping stale analysis request: revision {} != request revision {}",
                    model.revision(),
                    revision
                );
                return None;
            }

            let text = model.content();
            if whitespace_word_count(&text) < model.config.min_suggestion_words {
                model.suggestions.dismiss_proactive();
                return None;
            }

            model.analyzing = true;
            Some(Cmd::gateway(GatewayRequest::Suggestion { revision, text }))
        }

        SuggestionMsg::AnalysisCompleted {
            revision,
            suggestion,
        } => {
            if revision == model.revision() {
                model.analyzing = false;
            }
            let outcome = model.offer_suggestion(revision, suggestion);
            match outcome {
                SuggestionOutcome::Shown | SuggestionOutcome::Cleared => {
                    tracing::debug!("Proactive suggestion {:?} (revision {})", outcome, revision)
                }
                _ => tracing::debug!(
                    "Proactive suggestion ignored: {:?} (revision {})",
                    outcome,
                    revision
                ),
            }
            None
        }

        SuggestionMsg::Accept => match model.accept_suggestion() {
            Ok(Some(_)) => schedule_background_passes(model),
            Ok(None) => None,
            Err(e) => {
                report_error(model, "suggestion not applied", &e);
                None
            }
        },

        SuggestionMsg::Dismiss => {
            model.suggestions.dismiss_proactive();
            None
        }
    }
}
