//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Core operations
//! on [`AppModel`] return `Result<_, EditError>`; handlers here turn errors
//! into status messages and log lines, so nothing propagates out of `update`.

mod assist;
mod document;
mod find;
mod illustration;
mod selection;
mod spellcheck;
mod suggestion;

use crate::commands::{Cmd, DebounceLane};
use crate::error::EditError;
use crate::messages::Msg;
use crate::model::AppModel;

pub use assist::update_assist;
pub use document::update_document;
pub use find::update_find;
pub use illustration::update_illustration;
pub use selection::update_selection;
pub use spellcheck::update_spellcheck;
pub use suggestion::update_suggestion;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Document(m) => update_document(model, m),
        Msg::Selection(m) => update_selection(model, m),
        Msg::Assist(m) => update_assist(model, m),
        Msg::Suggestion(m) => update_suggestion(model, m),
        Msg::Spell(m) => update_spellcheck(model, m),
        Msg::Find(m) => update_find(model, m),
        Msg::Illustration(m) => update_illustration(model, m),
    }
}

/// Start both debounced background passes for the current revision.
///
/// Called after every successful splice. Earlier timers are not cancelled;
/// their `Ready` messages carry an old revision and are skipped.
pub fn schedule_background_passes(model: &AppModel) -> Option<Cmd> {
    let revision = model.revision();
    Some(Cmd::batch(vec![
        Cmd::Debounce {
            lane: DebounceLane::Suggestion,
            revision,
            delay_ms: model.config.suggestion_debounce_ms,
        },
        Cmd::Debounce {
            lane: DebounceLane::Spellcheck,
            revision,
            delay_ms: model.config.spellcheck_debounce_ms,
        },
    ]))
}

/// Log an edit error at the level its kind deserves and show it to the user
pub(crate) fn report_error(model: &mut AppModel, context: &str, err: &EditError) {
    match err {
        EditError::StaleAnchor { .. } => tracing::debug!("{}: {}", context, err),
        EditError::Range { .. } | EditError::Gateway(_) => {
            tracing::warn!("{}: {}", context, err)
        }
        EditError::Busy { .. } | EditError::NoSelection => {
            tracing::debug!("{}: {}", context, err)
        }
    }
    model.status.error(err.user_message());
}
