//! Response decoding and error mapping.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::marshal::Attributes;
use crate::error::{ApiError, FieldMessage, Result};

/// Status and body of a response, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Pagination metadata reported alongside list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub current: Option<u32>,
    #[serde(default)]
    pub previous: Option<u32>,
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl Pagination {
    /// Whether the server holds more results than this page.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// A decoded success body.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub response: Value,
    pub pagination: Option<Pagination>,
}

impl Envelope {
    pub fn into_object(self) -> Result<Attributes> {
        match self.response {
            Value::Object(object) => Ok(object),
            _ => Err(ApiError::UnexpectedShape("object")),
        }
    }

    pub fn into_objects(self) -> Result<Vec<Attributes>> {
        match self.response {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(object) => Ok(object),
                    _ => Err(ApiError::UnexpectedShape("array of objects")),
                })
                .collect(),
            _ => Err(ApiError::UnexpectedShape("array")),
        }
    }
}

/// Parse a success body.
///
/// The `response` wrapper is removed when present. An empty body decodes to
/// an empty object.
pub fn decode_body(body: &str) -> Result<Envelope> {
    if body.trim().is_empty() {
        return Ok(Envelope {
            response: Value::Object(Attributes::new()),
            pagination: None,
        });
    }

    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Object(mut object) if object.contains_key("response") => {
            let pagination = match object.remove("pagination") {
                Some(Value::Null) | None => None,
                Some(pagination) => Some(serde_json::from_value(pagination)?),
            };
            let response = object.remove("response").unwrap_or(Value::Null);
            Ok(Envelope {
                response,
                pagination,
            })
        }
        response => Ok(Envelope {
            response,
            pagination: None,
        }),
    }
}

/// Pass success responses through, turn everything else into a typed error.
pub fn check_status(raw: RawResponse) -> Result<RawResponse> {
    if raw.status.is_success() {
        return Ok(raw);
    }

    let err = error_from_body(raw.status, &raw.body);
    tracing::warn!("API request failed with status {}: {}", raw.status, err);
    Err(err)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMessage {
    Field(FieldMessage),
    Text(String),
}

impl From<RawMessage> for FieldMessage {
    fn from(message: RawMessage) -> Self {
        match message {
            RawMessage::Field(message) => message,
            RawMessage::Text(text) => FieldMessage::text(text),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    messages: Vec<RawMessage>,
}

fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    let (code, description, messages) = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => {
            let messages: Vec<FieldMessage> =
                parsed.messages.into_iter().map(FieldMessage::from).collect();
            let description = parsed
                .error_description
                .or_else(|| messages.first().map(|m| m.message.clone()))
                .unwrap_or_else(|| default_description(status));
            (parsed.error, description, messages)
        }
        Err(_) if body.trim().is_empty() => (None, default_description(status), Vec::new()),
        Err(_) => (None, body.trim().to_string(), Vec::new()),
    };

    match (code.as_deref(), status) {
        (Some("resource_not_found"), _) | (None, StatusCode::NOT_FOUND) => {
            ApiError::ResourceNotFound { description }
        }
        (Some("invalid_resource"), _) | (None, StatusCode::UNPROCESSABLE_ENTITY) => {
            ApiError::InvalidResource {
                description,
                messages,
            }
        }
        _ => ApiError::Api {
            status,
            code,
            description,
            messages,
        },
    }
}

fn default_description(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

/// Remove the `token` from decoded attributes, returning it.
pub fn take_token(attributes: &mut Attributes) -> Result<String> {
    match attributes.remove("token") {
        Some(Value::String(token)) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::MissingToken),
    }
}
