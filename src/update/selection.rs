//! Selection capture handlers

use super::report_error;
use crate::commands::Cmd;
use crate::messages::SelectionMsg;
use crate::model::AppModel;

pub fn update_selection(model: &mut AppModel, msg: SelectionMsg) -> Option<Cmd> {
    match msg {
        SelectionMsg::Select { start, end } => {
            if let Err(e) = model.select(start, end) {
                report_error(model, "selection rejected", &e);
            }
        }
        SelectionMsg::Clear => model.clear_selection(),
    }
    None
}
