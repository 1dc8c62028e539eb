//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use quill::commands::{Cmd, GatewayRequest};
use quill::config::AssistConfig;
use quill::gateway::{Attachment, Gateway, GatewayError, GatewayErrorKind};
use quill::messages::Msg;
use quill::model::{
    AppModel, ProactiveSuggestion, RephraseSuggestion, RequestId, SpellcheckError,
};
use quill::runtime::Runtime;
use quill::update::update;

/// Long enough for any worker in these tests
pub const WAIT: Duration = Duration::from_secs(5);

/// Config with no debounce delay and a low analysis threshold
pub fn fast_config() -> AssistConfig {
    AssistConfig {
        suggestion_debounce_ms: 0,
        spellcheck_debounce_ms: 0,
        min_suggestion_words: 1,
        ..AssistConfig::default()
    }
}

/// Create a test model with given text and default config
pub fn test_model(text: &str) -> AppModel {
    AppModel::with_text(text, AssistConfig::default())
}

/// Create a test model with `[start, end)` selected
pub fn test_model_with_selection(text: &str, start: usize, end: usize) -> AppModel {
    let mut model = test_model(text);
    model
        .select(start, end)
        .expect("selection should be in range");
    model
}

/// Run `msg` through update and return the id of the gateway call it made
pub fn dispatch_request(model: &mut AppModel, msg: Msg) -> RequestId {
    let cmd = update(model, msg).expect("expected a command");
    request_id(&cmd).expect("expected a gateway request with an id")
}

pub fn request_id(cmd: &Cmd) -> Option<RequestId> {
    cmd.gateway_requests().into_iter().find_map(|request| match request {
        GatewayRequest::Draft { id, .. }
        | GatewayRequest::Transform { id, .. }
        | GatewayRequest::Rephrase { id, .. }
        | GatewayRequest::Image { id, .. }
        | GatewayRequest::StorybookPage { id, .. }
        | GatewayRequest::Insertion { id, .. } => Some(*id),
        GatewayRequest::Suggestion { .. }
        | GatewayRequest::Spelling { .. }
        | GatewayRequest::CreativePrompts => None,
    })
}

/// A gateway with canned answers that records what it was asked
#[derive(Default)]
pub struct ScriptedGateway {
    pub transform: Option<String>,
    pub rephrase: Vec<RephraseSuggestion>,
    pub suggestion: Option<ProactiveSuggestion>,
    pub spelling: Vec<SpellcheckError>,
    pub image: Option<Vec<u8>>,
    pub prompts: Vec<String>,
    /// Every call fails with this kind when set
    pub fail_with: Option<GatewayErrorKind>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(kind: GatewayErrorKind) -> Self {
        Self {
            fail_with: Some(kind),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail_with {
            Some(kind) => Err(GatewayError::new(kind, format!("{} failed", call))),
            None => Ok(()),
        }
    }
}

impl Gateway for ScriptedGateway {
    fn generate_draft(
        &self,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<String, GatewayError> {
        self.record("generate_draft")?;
        Ok(format!("Draft: {} ({} attachments)", prompt, attachments.len()))
    }

    fn transform_span(&self, text: &str, _instruction: &str) -> Result<String, GatewayError> {
        self.record("transform_span")?;
        Ok(self.transform.clone().unwrap_or_else(|| text.to_uppercase()))
    }

    fn rephrase_options(&self, _text: &str) -> Result<Vec<RephraseSuggestion>, GatewayError> {
        self.record("rephrase_options")?;
        Ok(self.rephrase.clone())
    }

    fn proactive_suggestion(
        &self,
        _text: &str,
    ) -> Result<Option<ProactiveSuggestion>, GatewayError> {
        self.record("proactive_suggestion")?;
        Ok(self.suggestion.clone())
    }

    fn check_spelling(&self, _text: &str) -> Result<Vec<SpellcheckError>, GatewayError> {
        self.record("check_spelling")?;
        Ok(self.spelling.clone())
    }

    fn generate_image(&self, _text: &str) -> Result<Option<Vec<u8>>, GatewayError> {
        self.record("generate_image")?;
        Ok(self.image.clone())
    }

    fn generate_for_insertion(&self, prompt: &str) -> Result<String, GatewayError> {
        self.record("generate_for_insertion")?;
        Ok(format!("[{}]", prompt))
    }

    fn creative_prompts(&self) -> Result<Vec<String>, GatewayError> {
        self.record("creative_prompts")?;
        Ok(self.prompts.clone())
    }
}

/// Runtime over `text` with a fast config and the given gateway
pub fn test_runtime(text: &str, gateway: Arc<ScriptedGateway>) -> Runtime {
    Runtime::new(AppModel::with_text(text, fast_config()), gateway)
}
