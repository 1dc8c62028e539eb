//! Error types for splicing and request resolution
//!
//! Three kinds matter to callers:
//! - `Range`: an offset outside the current content (a staleness or programming bug)
//! - `StaleAnchor`: a captured span or snippet no longer matches the content
//! - `Gateway`: the generative backend failed

use crate::gateway::GatewayError;

/// Errors produced by the editing core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Offsets do not address the current content
    Range { start: usize, end: usize, len: usize },
    /// The anchor text no longer matches what is at the captured location
    StaleAnchor {
        /// Text captured when the request was dispatched
        expected: String,
        /// Text currently at the captured offsets (None if out of range or not found)
        found: Option<String>,
    },
    /// The backend call failed or produced nothing usable
    Gateway(GatewayError),
    /// A transform is already in flight for this exact span
    Busy { start: usize, end: usize },
    /// The operation needs an active selection
    NoSelection,
}

impl EditError {
    /// Stale anchors are a normal race outcome rather than a fault
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleAnchor { .. })
    }

    /// Get a user-facing status line for this error
    pub fn user_message(&self) -> String {
        match self {
            Self::Range { .. } => "The document changed; edit could not be applied".to_string(),
            Self::StaleAnchor { .. } => {
                "The text changed while the request was running; result discarded".to_string()
            }
            Self::Gateway(e) => format!("Assistant unavailable: {}", e.message),
            Self::Busy { .. } => "A request for this selection is already running".to_string(),
            Self::NoSelection => "Select some text first".to_string(),
        }
    }
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Range { start, end, len } => {
                write!(f, "range {}..{} out of bounds for length {}", start, end, len)
            }
            Self::StaleAnchor { expected, found } => match found {
                Some(found) => write!(f, "stale anchor: expected {:?}, found {:?}", expected, found),
                None => write!(f, "stale anchor: {:?} no longer present", expected),
            },
            Self::Gateway(e) => write!(f, "gateway error: {}", e),
            Self::Busy { start, end } => {
                write!(f, "transform already in flight for {}..{}", start, end)
            }
            Self::NoSelection => write!(f, "no active selection"),
        }
    }
}

impl std::error::Error for EditError {}

impl From<GatewayError> for EditError {
    fn from(e: GatewayError) -> Self {
        Self::Gateway(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayErrorKind;

    #[test]
    fn test_display_range() {
        let err = EditError::Range {
            start: 3,
            end: 9,
            len: 5,
        };
        assert_eq!(err.to_string(), "range 3..9 out of bounds for length 5");
    }

    #[test]
    fn test_stale_is_stale() {
        let err = EditError::StaleAnchor {
            expected: "bc".to_string(),
            found: Some("ab".to_string()),
        };
        assert!(err.is_stale());
        assert!(!EditError::NoSelection.is_stale());
    }

    #[test]
    fn test_gateway_user_message() {
        let err: EditError = GatewayError::new(GatewayErrorKind::Network, "timed out").into();
        assert_eq!(err.user_message(), "Assistant unavailable: timed out");
    }
}
