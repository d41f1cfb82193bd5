use thiserror::Error;

const APOLOGY: &str = "I apologize, but I'm having trouble connecting right now. ";

/// Coarse bucket a failed chat request falls into; drives the message the
/// visitor sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    RateLimit,
    Server,
    Connectivity,
    Unknown,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChatError {
    #[error("API Error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Failed to fetch: {0}")]
    Network(String),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("malformed reply: {0}")]
    MalformedReply(String),
    #[error("reply contained no choices")]
    EmptyReply,
}

impl ChatError {
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        ChatError::Status {
            status,
            body: body.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::Status { status, .. } => match status {
                401 | 403 => ErrorKind::Authentication,
                429 => ErrorKind::RateLimit,
                500..=599 => ErrorKind::Server,
                _ => ErrorKind::Unknown,
            },
            ChatError::Network(_) => ErrorKind::Connectivity,
            ChatError::Encode(_) | ChatError::MalformedReply(_) | ChatError::EmptyReply => {
                ErrorKind::Unknown
            }
        }
    }

    /// Text rendered into the transcript in place of a reply.
    pub fn user_message(&self) -> String {
        let hint = match self.kind() {
            ErrorKind::Authentication => {
                "There seems to be an authentication issue. Please check the API configuration."
            }
            ErrorKind::RateLimit => "Too many requests. Please wait a moment and try again.",
            ErrorKind::Server => {
                "The AI service is temporarily unavailable. Please try again later."
            }
            ErrorKind::Connectivity => "Please check your internet connection and try again.",
            ErrorKind::Unknown => "Please try again in a moment.",
        };
        format!("{APOLOGY}{hint}")
    }
}

impl From<gloo_net::Error> for ChatError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ChatError::MalformedReply(e.to_string()),
            other => ChatError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_codes() {
        assert_eq!(ChatError::from_status(401, "").kind(), ErrorKind::Authentication);
        assert_eq!(ChatError::from_status(403, "").kind(), ErrorKind::Authentication);
        assert_eq!(ChatError::from_status(429, "").kind(), ErrorKind::RateLimit);
        assert_eq!(ChatError::from_status(500, "").kind(), ErrorKind::Server);
        assert_eq!(ChatError::from_status(503, "").kind(), ErrorKind::Server);
        assert_eq!(ChatError::from_status(404, "").kind(), ErrorKind::Unknown);
    }

    #[test]
    fn network_failures_are_connectivity() {
        let err = ChatError::Network("TypeError: Failed to fetch".into());
        assert_eq!(err.kind(), ErrorKind::Connectivity);
        assert!(err.user_message().contains("internet connection"));
    }

    #[test]
    fn server_message_mentions_unavailability() {
        let msg = ChatError::from_status(500, "boom").user_message();
        assert!(msg.starts_with("I apologize, but I'm having trouble connecting right now. "));
        assert!(msg.contains("temporarily unavailable"));
    }

    #[test]
    fn malformed_and_empty_replies_are_unknown() {
        assert_eq!(ChatError::EmptyReply.kind(), ErrorKind::Unknown);
        assert_eq!(
            ChatError::MalformedReply("eof".into()).user_message(),
            "I apologize, but I'm having trouble connecting right now. Please try again in a moment."
        );
    }

    #[test]
    fn status_error_keeps_body_for_diagnostics() {
        let err = ChatError::from_status(429, "slow down");
        assert_eq!(err.to_string(), "API Error: 429 - slow down");
    }
}
