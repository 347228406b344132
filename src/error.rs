use thiserror::Error;

/// Everything that can go wrong between pressing Enter and seeing an answer.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("question cannot be empty")]
    EmptyQuestion,

    /// The backend answered with a non-2xx status. `detail` carries the
    /// `detail` string from the error body when one could be parsed.
    #[error("tutor backend returned HTTP {status}")]
    Server { status: u16, detail: Option<String> },

    /// The request never completed: connection refused, DNS failure, or an
    /// unparseable success body.
    #[error("request failed: {0}")]
    Transport(String),
}

impl AskError {
    /// Message rendered into the conversation log. Server-provided detail is
    /// surfaced verbatim; transport internals are not.
    pub fn user_message(&self) -> String {
        match self {
            AskError::EmptyQuestion => "Please type a question first.".to_string(),
            AskError::Server {
                detail: Some(detail),
                ..
            } => format!("The tutor reported an error: {}", detail),
            AskError::Server { .. } => {
                "The tutor reported an error. Please try again.".to_string()
            }
            AskError::Transport(_) => {
                "Could not reach the tutor. Please try again.".to_string()
            }
        }
    }

    /// Extra context shown only while the diagnostics toggle is on.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            AskError::EmptyQuestion => None,
            AskError::Server { status, .. } => Some(format!("HTTP status {}", status)),
            AskError::Transport(cause) => Some(cause.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_detail_is_surfaced_verbatim() {
        let err = AskError::Server {
            status: 500,
            detail: Some("model timeout".to_string()),
        };
        assert!(err.user_message().contains("model timeout"));
    }

    #[test]
    fn test_server_without_detail_falls_back_to_generic() {
        let err = AskError::Server {
            status: 502,
            detail: None,
        };
        let msg = err.user_message();
        assert!(msg.contains("try again"));
        assert!(!msg.contains("502"));
        assert_eq!(err.diagnostic(), Some("HTTP status 502".to_string()));
    }

    #[test]
    fn test_transport_message_is_generic_with_diagnostic() {
        let err = AskError::Transport("connection refused".to_string());
        assert!(!err.user_message().contains("connection refused"));
        assert_eq!(err.diagnostic(), Some("connection refused".to_string()));
    }
}
