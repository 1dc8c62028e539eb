//! Illustration and storybook handlers

use super::report_error;
use crate::commands::{Cmd, GatewayRequest};
use crate::error::EditError;
use crate::messages::IllustrationMsg;
use crate::model::{AppModel, Storybook};
use crate::util::text::paragraphs;

pub fn update_illustration(model: &mut AppModel, msg: IllustrationMsg) -> Option<Cmd> {
    match msg {
        IllustrationMsg::IllustrateSelection => {
            let Some(text) = model.selection.get().map(|s| s.text.clone()) else {
                report_error(model, "illustrate", &EditError::NoSelection);
                return None;
            };
            let id = model.dispatcher.next_id();
            model.illustrations.begin(id, text.clone());
            Some(Cmd::gateway(GatewayRequest::Image { id, text }))
        }

        IllustrationMsg::ImageCompleted { id, image } => {
            let produced = image.is_some();
            if !model.illustrations.complete(id, image) {
                tracing::debug!("No pending illustration for {:?}", id);
                return None;
            }
            if !produced {
                model.status.info("No image was generated");
            }
            None
        }

        IllustrationMsg::Storybook => {
            let pages = paragraphs(&model.content());
            if pages.is_empty() {
                model.status.info("Write something to illustrate first");
                return None;
            }
            let id = model.dispatcher.next_id();
            let requests = pages
                .iter()
                .enumerate()
                .map(|(page, text)| {
                    Cmd::gateway(GatewayRequest::StorybookPage {
                        id,
                        page,
                        text: text.clone(),
                    })
                })
                .collect();
            tracing::info!("Building storybook with {} pages", pages.len());
            model.illustrations.storybook = Some(Storybook::new(id, pages));
            Some(Cmd::batch(requests))
        }

        IllustrationMsg::StorybookPageCompleted { id, page, image } => {
            match model.illustrations.storybook.as_mut() {
                Some(book) if book.id == id => {
                    if !book.fill_page(page, image) {
                        tracing::warn!("Storybook page {} out of range", page);
                    }
                }
                _ => tracing::debug!("Discarding page {} for closed storybook {:?}", page, id),
            }
            None
        }

        IllustrationMsg::NextPage => {
            if let Some(book) = model.illustrations.storybook.as_mut() {
                book.next_page();
            }
            None
        }

        IllustrationMsg::PrevPage => {
            if let Some(book) = model.illustrations.storybook.as_mut() {
                book.prev_page();
            }
            None
        }

        IllustrationMsg::CloseStorybook => {
            model.illustrations.close_storybook();
            None
        }
    }
}
