//! Foreground request handlers: drafts, transforms, rephrasing, insertion
//!
//! Each request records what it captured in the dispatcher and returns a
//! gateway command. Completions look their request up by id; results whose
//! request is gone (superseded drafts, unknown ids) are dropped.

use super::{report_error, schedule_background_passes};
use crate::commands::{Cmd, GatewayRequest};
use crate::error::EditError;
use crate::gateway::GatewayError;
use crate::messages::AssistMsg;
use crate::model::{AppModel, RephraseBatch, TransformKind};

pub fn update_assist(model: &mut AppModel, msg: AssistMsg) -> Option<Cmd> {
    match msg {
        // === Drafting ===
        AssistMsg::RequestDraft {
            prompt,
            attachments,
        } => {
            let id = model.dispatcher.begin_draft();
            model.status.info("Drafting…");
            Some(Cmd::gateway(GatewayRequest::Draft {
                id,
                prompt,
                attachments,
            }))
        }

        AssistMsg::DraftCompleted { id, result } => {
            if !model.dispatcher.finish_draft(id) {
                tracing::debug!("Discarding superseded draft {:?}", id);
                return None;
            }
            match require_text(result) {
                Ok(text) => {
                    model.replace_content(&text);
                    tracing::info!("Applied draft ({} chars)", text.chars().count());
                    model.status.info("Draft ready");
                    schedule_background_passes(model)
                }
                Err(e) => {
                    report_error(model, "draft failed", &EditError::Gateway(e));
                    None
                }
            }
        }

        // === Selection transforms ===
        AssistMsg::TransformSelection { instruction } => {
            request_transform(model, TransformKind::Instruction(instruction))
        }

        AssistMsg::TransformCompleted { id, result } => {
            let Some(pending) = model.dispatcher.finish_transform(id) else {
                tracing::debug!("No pending transform for {:?}", id);
                return None;
            };
            let replacement = match require_text(result) {
                Ok(text) => text,
                Err(e) => {
                    report_error(model, "transform failed", &EditError::Gateway(e));
                    return None;
                }
            };
            match model.resolve_transform(&pending, &replacement) {
                Ok(splice) => {
                    tracing::info!(
                        "Applied transform at {}..{} ({} chars)",
                        splice.start,
                        splice.end,
                        splice.inserted
                    );
                    schedule_background_passes(model)
                }
                Err(e) => {
                    report_error(model, "transform not applied", &e);
                    None
                }
            }
        }

        AssistMsg::RequestRephrase => request_transform(model, TransformKind::Rephrase),

        AssistMsg::RephraseCompleted { id, mut options } => {
            let Some(pending) = model.dispatcher.finish_transform(id) else {
                tracing::debug!("No pending rephrase for {:?}", id);
                return None;
            };
            if model.selection.generation() != pending.selection_generation {
                tracing::debug!(
                    "Discarding rephrase options: selection changed since {:?}",
                    id
                );
                return None;
            }
            if options.is_empty() {
                model.status.info("No alternative phrasings available");
                return None;
            }
            options.truncate(model.config.rephrase_option_limit);
            model.suggestions.set_rephrase(RephraseBatch {
                selection_generation: pending.selection_generation,
                source: pending.selection,
                options,
            });
            None
        }

        AssistMsg::ApplyRephrase(idx) => match model.apply_rephrase(idx) {
            Ok(Some(_)) => schedule_background_passes(model),
            Ok(None) => {
                tracing::debug!("No rephrase option {} for the current selection", idx);
                model.status.info("No such phrasing");
                None
            }
            Err(e) => {
                report_error(model, "rephrase not applied", &e);
                None
            }
        },

        AssistMsg::CancelRephrase => {
            model.suggestions.clear_rephrase();
            None
        }

        // === Insertion ===
        AssistMsg::RequestInsertion { at, prompt } => {
            let len = model.buffer().len_chars();
            if at > len {
                let e = EditError::Range {
                    start: at,
                    end: at,
                    len,
                };
                report_error(model, "insertion rejected", &e);
                return None;
            }
            let id = model.dispatcher.begin_insertion(at);
            Some(Cmd::gateway(GatewayRequest::Insertion { id, prompt }))
        }

        AssistMsg::InsertionCompleted { id, result } => {
            let Some(pending) = model.dispatcher.finish_insertion(id) else {
                tracing::debug!("No pending insertion for {:?}", id);
                return None;
            };
            let text = match require_text(result) {
                Ok(text) => text,
                Err(e) => {
                    report_error(model, "insertion failed", &EditError::Gateway(e));
                    return None;
                }
            };
            match model.resolve_insertion(&pending, &text) {
                Ok(_) => schedule_background_passes(model),
                Err(e) => {
                    report_error(model, "insertion not applied", &e);
                    None
                }
            }
        }

        // === Creative prompts ===
        AssistMsg::RequestCreativePrompts => Some(Cmd::gateway(GatewayRequest::CreativePrompts)),

        AssistMsg::CreativePromptsCompleted(prompts) => {
            model.creative_prompts = prompts;
            None
        }
    }
}

/// Generated text that is empty counts as a failed call
fn require_text(result: Result<String, GatewayError>) -> Result<String, GatewayError> {
    match result {
        Ok(text) if text.trim().is_empty() => Err(GatewayError::malformed("empty response")),
        other => other,
    }
}

/// Dispatch a transform or rephrase for the current selection
fn request_transform(model: &mut AppModel, kind: TransformKind) -> Option<Cmd> {
    let Some(selection) = model.selection.get().cloned() else {
        report_error(model, "transform", &EditError::NoSelection);
        return None;
    };
    let generation = model.selection.generation();
    let id = match model
        .dispatcher
        .begin_transform(&selection, generation, kind.clone())
    {
        Ok(id) => id,
        Err(e) => {
            report_error(model, "transform", &e);
            return None;
        }
    };

    let request = match kind {
        TransformKind::Instruction(instruction) => GatewayRequest::Transform {
            id,
            text: selection.text,
            instruction,
        },
        TransformKind::Rephrase => {
            model.suggestions.clear_rephrase();
            GatewayRequest::Rephrase {
                id,
                text: selection.text,
            }
        }
    };
    Some(Cmd::gateway(request))
}
