//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Completions carry
//! the id or revision they were dispatched with so the update layer can
//! tell stale results from current ones.

use crate::gateway::{Attachment, GatewayError};
use crate::model::{ProactiveSuggestion, RephraseSuggestion, RequestId, SpellcheckError};

/// Direct document edits (char offsets)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMsg {
    /// Replace `[start, end)` with `text`
    Replace {
        start: usize,
        end: usize,
        text: String,
    },
    /// Insert `text` at `at`
    Insert { at: usize, text: String },
    /// Delete `[start, end)`
    Delete { start: usize, end: usize },
    /// Replace the whole document
    SetContent(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMsg {
    Select { start: usize, end: usize },
    Clear,
}

/// Foreground generative requests and their completions
#[derive(Debug, Clone)]
pub enum AssistMsg {
    // === Drafting ===
    RequestDraft {
        prompt: String,
        attachments: Vec<Attachment>,
    },
    DraftCompleted {
        id: RequestId,
        result: Result<String, GatewayError>,
    },

    // === Selection transforms ===
    /// Rewrite the selection following an instruction
    TransformSelection { instruction: String },
    TransformCompleted {
        id: RequestId,
        result: Result<String, GatewayError>,
    },
    /// Fetch alternative phrasings for the selection
    RequestRephrase,
    /// Empty options when the backend failed or had nothing to offer
    RephraseCompleted {
        id: RequestId,
        options: Vec<RephraseSuggestion>,
    },
    /// Replace the selection with option `n`
    ApplyRephrase(usize),
    CancelRephrase,

    // === Insertion ===
    RequestInsertion { at: usize, prompt: String },
    InsertionCompleted {
        id: RequestId,
        result: Result<String, GatewayError>,
    },

    // === Creative prompts ===
    RequestCreativePrompts,
    CreativePromptsCompleted(Vec<String>),
}

/// Proactive suggestion lane
#[derive(Debug, Clone)]
pub enum SuggestionMsg {
    /// Debounce elapsed for `revision`
    AnalysisReady { revision: u64 },
    AnalysisCompleted {
        revision: u64,
        suggestion: Option<ProactiveSuggestion>,
    },
    Accept,
    Dismiss,
}

/// Spellcheck lane
#[derive(Debug, Clone)]
pub enum SpellMsg {
    /// Debounce elapsed for `revision`
    CheckReady { revision: u64 },
    CheckCompleted {
        revision: u64,
        errors: Vec<SpellcheckError>,
    },
    /// Correct error `index`, with its first suggestion unless given
    Correct {
        index: usize,
        replacement: Option<String>,
    },
    Ignore(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindMsg {
    SetQuery(String),
    SetReplacement(String),
    Next,
    Prev,
    ReplaceCurrent,
    ReplaceAll,
    Close,
}

#[derive(Debug, Clone)]
pub enum IllustrationMsg {
    /// Illustrate the selected text
    IllustrateSelection,
    ImageCompleted {
        id: RequestId,
        image: Option<Vec<u8>>,
    },
    /// Build a storybook from the document's paragraphs
    Storybook,
    StorybookPageCompleted {
        id: RequestId,
        page: usize,
        image: Option<Vec<u8>>,
    },
    NextPage,
    PrevPage,
    CloseStorybook,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Document messages (text editing)
    Document(DocumentMsg),
    /// Selection capture and clearing
    Selection(SelectionMsg),
    /// Foreground generative requests
    Assist(AssistMsg),
    /// Proactive suggestion messages
    Suggestion(SuggestionMsg),
    /// Spellcheck messages
    Spell(SpellMsg),
    /// Find and replace messages
    Find(FindMsg),
    /// Illustration and storybook messages
    Illustration(IllustrationMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn replace(start: usize, end: usize, text: impl Into<String>) -> Self {
        Msg::Document(DocumentMsg::Replace {
            start,
            end,
            text: text.into(),
        })
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Msg::Document(DocumentMsg::Insert {
            at,
            text: text.into(),
        })
    }

    pub fn select(start: usize, end: usize) -> Self {
        Msg::Selection(SelectionMsg::Select { start, end })
    }

    pub fn transform(instruction: impl Into<String>) -> Self {
        Msg::Assist(AssistMsg::TransformSelection {
            instruction: instruction.into(),
        })
    }
}
