//! Transient status line messages

use std::time::{Duration, Instant};

/// How long a status message stays visible
pub const STATUS_MESSAGE_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct TransientMessage {
    pub kind: StatusKind,
    pub text: String,
    /// When this message expires
    pub expires_at: Instant,
}

impl TransientMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind,
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// The single status line of the session
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    message: Option<TransientMessage>,
}

impl StatusLine {
    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some(TransientMessage::new(
            StatusKind::Info,
            text,
            STATUS_MESSAGE_DURATION,
        ));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.message = Some(TransientMessage::new(
            StatusKind::Error,
            text,
            STATUS_MESSAGE_DURATION,
        ));
    }

    /// Current message, ignoring expiry
    pub fn message(&self) -> Option<&TransientMessage> {
        self.message.as_ref()
    }

    /// Current message if it has not expired
    pub fn visible(&self) -> Option<&TransientMessage> {
        self.message.as_ref().filter(|m| !m.is_expired())
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}
