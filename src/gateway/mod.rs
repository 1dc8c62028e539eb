//! Generative backend interface
//!
//! Every call is blocking and fallible. The runtime runs calls on worker
//! threads and turns failures into sentinels or failed completions, so
//! implementations never touch session state.

pub mod offline;
pub mod spelling;

pub use offline::OfflineGateway;
pub use spelling::SpellDictionary;

use crate::model::{ProactiveSuggestion, RephraseSuggestion, SpellcheckError};

/// Prompts offered when the backend cannot produce any
pub const FALLBACK_CREATIVE_PROMPTS: &[&str] = &[
    "A map that leads to a place that doesn't exist.",
    "The last two people on Earth meet by accident.",
    "A chef who can cook emotions into food.",
];

pub fn fallback_creative_prompts() -> Vec<String> {
    FALLBACK_CREATIVE_PROMPTS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// A file sent along with a draft prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Transport failure or timeout
    Network,
    /// The backend answered with an error
    Backend,
    /// The backend answered with something unparseable
    Malformed,
    /// No backend configured
    Unavailable,
}

impl std::fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::Backend => "backend",
            Self::Malformed => "malformed response",
            Self::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}

/// A failed backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Malformed, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Unavailable, message)
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// The generative backend.
///
/// Offsets reported by `check_spelling` are char offsets into `text`.
pub trait Gateway: Send + Sync {
    /// Write a whole document from a prompt and optional attachments
    fn generate_draft(&self, prompt: &str, attachments: &[Attachment])
        -> Result<String, GatewayError>;

    /// Rewrite `text` following `instruction`
    fn transform_span(&self, text: &str, instruction: &str) -> Result<String, GatewayError>;

    /// Alternative phrasings for `text`, usually three
    fn rephrase_options(&self, text: &str) -> Result<Vec<RephraseSuggestion>, GatewayError>;

    /// At most one improvement for the document
    fn proactive_suggestion(&self, text: &str)
        -> Result<Option<ProactiveSuggestion>, GatewayError>;

    fn check_spelling(&self, text: &str) -> Result<Vec<SpellcheckError>, GatewayError>;

    /// Image bytes for `text`, if the backend produced one
    fn generate_image(&self, text: &str) -> Result<Option<Vec<u8>>, GatewayError>;

    /// Text to insert at a cursor position
    fn generate_for_insertion(&self, prompt: &str) -> Result<String, GatewayError>;

    fn creative_prompts(&self) -> Result<Vec<String>, GatewayError>;
}
