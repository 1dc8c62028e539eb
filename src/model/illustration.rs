//! Illustrations: single images for a selection, and the storybook

use super::dispatcher::RequestId;

/// One generated illustration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Illustration {
    pub prompt_text: String,
    /// None when the backend produced no image
    pub image: Option<Vec<u8>>,
}

/// One storybook page: a paragraph and its picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorybookPage {
    pub text: String,
    pub image: Option<Vec<u8>>,
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storybook {
    pub id: RequestId,
    pub pages: Vec<StorybookPage>,
    current: usize,
}

impl Storybook {
    pub fn new(id: RequestId, paragraphs: Vec<String>) -> Self {
        Self {
            id,
            pages: paragraphs
                .into_iter()
                .map(|text| StorybookPage {
                    text,
                    image: None,
                    ready: false,
                })
                .collect(),
            current: 0,
        }
    }

    /// (pages ready, total pages)
    pub fn progress(&self) -> (usize, usize) {
        let ready = self.pages.iter().filter(|p| p.ready).count();
        (ready, self.pages.len())
    }

    pub fn is_complete(&self) -> bool {
        self.pages.iter().all(|p| p.ready)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> Option<&StorybookPage> {
        self.pages.get(self.current)
    }

    /// Advance one page, clamped at the last page
    pub fn next_page(&mut self) {
        self.current = (self.current + 1).min(self.pages.len().saturating_sub(1));
    }

    /// Go back one page, clamped at the first page
    pub fn prev_page(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Store the image for page `page`. Returns false for unknown pages.
    pub fn fill_page(&mut self, page: usize, image: Option<Vec<u8>>) -> bool {
        match self.pages.get_mut(page) {
            Some(p) => {
                p.image = image;
                p.ready = true;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IllustrationState {
    /// Completed single illustrations, oldest first
    pub gallery: Vec<Illustration>,
    /// Single illustration requests in flight, with their prompt text
    pending: Vec<(RequestId, String)>,
    pub storybook: Option<Storybook>,
}

impl IllustrationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, id: RequestId, prompt_text: String) {
        self.pending.push((id, prompt_text));
    }

    /// Move a finished request into the gallery. Returns false for unknown ids.
    pub fn complete(&mut self, id: RequestId, image: Option<Vec<u8>>) -> bool {
        let Some(idx) = self.pending.iter().position(|(pid, _)| *pid == id) else {
            return false;
        };
        let (_, prompt_text) = self.pending.remove(idx);
        self.gallery.push(Illustration { prompt_text, image });
        true
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn close_storybook(&mut self) {
        self.storybook = None;
    }
}
