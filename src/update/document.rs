//! Direct document edit handlers

use super::{report_error, schedule_background_passes};
use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::AppModel;

/// Handle document editing messages
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    let result = match msg {
        DocumentMsg::Replace { start, end, text } => model.apply_edit(start, end, &text),
        DocumentMsg::Insert { at, text } => model.apply_edit(at, at, &text),
        DocumentMsg::Delete { start, end } => model.apply_edit(start, end, ""),
        DocumentMsg::SetContent(text) => Ok(model.replace_content(&text)),
    };

    match result {
        Ok(_) => schedule_background_passes(model),
        Err(e) => {
            report_error(model, "edit rejected", &e);
            None
        }
    }
}
