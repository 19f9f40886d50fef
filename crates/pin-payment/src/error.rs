//! Error types for the Pin Payments client.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

/// A single validation message returned by the API.
///
/// Validation failures come back as a list of these, one per offending
/// parameter. Older endpoints send bare strings, in which case only
/// `message` is set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldMessage {
    #[serde(default)]
    pub param: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

impl FieldMessage {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            param: None,
            code: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}: {}", param, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

fn join_messages(messages: &[FieldMessage]) -> String {
    messages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur when talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection, TLS or timeout failure. The request never produced an
    /// API response.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A success body that could not be parsed into the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing a resource token")]
    MissingToken,

    /// A caller-supplied token that cannot be used as a single path segment.
    #[error("invalid resource token: {0:?}")]
    InvalidToken(String),

    #[error("unexpected response shape: expected {0}")]
    UnexpectedShape(&'static str),

    /// The server could not find the resource at the requested path.
    #[error("resource not found: {description}")]
    ResourceNotFound { description: String },

    /// The server rejected the submitted attributes.
    #[error("invalid resource: {description} ({})", join_messages(.messages))]
    InvalidResource {
        description: String,
        messages: Vec<FieldMessage>,
    },

    /// Any other non-success response.
    #[error("API error {status}: {description}")]
    Api {
        status: StatusCode,
        code: Option<String>,
        description: String,
        messages: Vec<FieldMessage>,
    },
}

impl ApiError {
    /// Whether the error came back from the API rather than the network or
    /// the local decoder.
    pub fn is_api(&self) -> bool {
        matches!(
            self,
            ApiError::ResourceNotFound { .. } | ApiError::InvalidResource { .. } | ApiError::Api { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::ResourceNotFound { .. })
    }

    pub fn is_invalid_resource(&self) -> bool {
        matches!(self, ApiError::InvalidResource { .. })
    }

    /// Field-level messages attached to the error, if any.
    pub fn messages(&self) -> &[FieldMessage] {
        match self {
            ApiError::InvalidResource { messages, .. } | ApiError::Api { messages, .. } => messages,
            _ => &[],
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_resource_display_lists_messages() {
        let err = ApiError::InvalidResource {
            description: "One or more parameters were missing or invalid".to_string(),
            messages: vec![
                FieldMessage {
                    param: Some("email".to_string()),
                    code: Some("email_invalid".to_string()),
                    message: "Email can't be blank".to_string(),
                },
                FieldMessage::text("Card is required"),
            ],
        };

        assert_eq!(
            err.to_string(),
            "invalid resource: One or more parameters were missing or invalid \
             (email: Email can't be blank, Card is required)"
        );
        assert_eq!(err.messages().len(), 2);
        assert!(err.is_api());
    }

    #[test]
    fn test_non_api_errors_have_no_messages() {
        let err = ApiError::MissingToken;
        assert!(err.messages().is_empty());
        assert!(!err.is_api());
        assert!(!err.is_not_found());
    }
}
