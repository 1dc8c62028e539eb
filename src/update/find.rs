//! Find & replace handlers

use super::{report_error, schedule_background_passes};
use crate::commands::Cmd;
use crate::messages::FindMsg;
use crate::model::AppModel;

pub fn update_find(model: &mut AppModel, msg: FindMsg) -> Option<Cmd> {
    match msg {
        FindMsg::SetQuery(query) => {
            model.find.set_query(query, &model.document.buffer);
            tracing::debug!(
                "find {:?}: {} matches",
                model.find.query,
                model.find.match_count()
            );
            None
        }
        FindMsg::SetReplacement(replacement) => {
            model.find.replacement = replacement;
            None
        }
        FindMsg::Next => {
            model.find.next();
            None
        }
        FindMsg::Prev => {
            model.find.prev();
            None
        }
        FindMsg::ReplaceCurrent => match model.replace_current_match() {
            Ok(Some(_)) => schedule_background_passes(model),
            Ok(None) => None,
            Err(e) => {
                report_error(model, "replace not applied", &e);
                None
            }
        },
        FindMsg::ReplaceAll => match model.replace_all_matches() {
            Ok(0) => None,
            Ok(count) => {
                let noun = if count == 1 { "occurrence" } else { "occurrences" };
                model.status.info(format!("Replaced {} {}", count, noun));
                schedule_background_passes(model)
            }
            Err(e) => {
                report_error(model, "replace all stopped", &e);
                None
            }
        },
        FindMsg::Close => {
            model.find.clear();
            None
        }
    }
}
