//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The runtime executes them off the update thread and feeds the results
//! back in as messages.

use crate::gateway::Attachment;
use crate::model::RequestId;

/// Background passes that run after a quiet period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebounceLane {
    /// After the delay, sends `SuggestionMsg::AnalysisReady`
    Suggestion,
    /// After the delay, sends `SpellMsg::CheckReady`
    Spellcheck,
}

/// One call into the generative backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayRequest {
    Draft {
        id: RequestId,
        prompt: String,
        attachments: Vec<Attachment>,
    },
    Transform {
        id: RequestId,
        text: String,
        instruction: String,
    },
    Rephrase {
        id: RequestId,
        text: String,
    },
    Suggestion {
        revision: u64,
        text: String,
    },
    Spelling {
        revision: u64,
        text: String,
    },
    Image {
        id: RequestId,
        text: String,
    },
    StorybookPage {
        id: RequestId,
        page: usize,
        text: String,
    },
    Insertion {
        id: RequestId,
        prompt: String,
    },
    CreativePrompts,
}

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Start a debounce timer for a background pass
    Debounce {
        lane: DebounceLane,
        revision: u64,
        delay_ms: u64,
    },
    /// Run a backend call on a worker thread
    CallGateway(GatewayRequest),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn gateway(request: GatewayRequest) -> Self {
        Cmd::CallGateway(request)
    }

    /// Gateway requests contained in this command, in order
    pub fn gateway_requests(&self) -> Vec<&GatewayRequest> {
        match self {
            Cmd::CallGateway(request) => vec![request],
            Cmd::Batch(cmds) => cmds.iter().flat_map(Cmd::gateway_requests).collect(),
            Cmd::None | Cmd::Debounce { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_requests_flattens_batches() {
        let cmd = Cmd::batch(vec![
            Cmd::Debounce {
                lane: DebounceLane::Spellcheck,
                revision: 1,
                delay_ms: 500,
            },
            Cmd::batch(vec![Cmd::gateway(GatewayRequest::CreativePrompts)]),
        ]);
        assert_eq!(
            cmd.gateway_requests(),
            vec![&GatewayRequest::CreativePrompts]
        );
    }
}
