use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "actix")]
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Prefix carried by every message the adapter itself produces.
pub const ERROR_PREFIX: &str = "[oauth-app]";

/// The single error type crossing the HTTP boundary.
///
/// Serialized as `{"error": "<message>"}`. Collaborator failures are passed
/// through with their message unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OAuthAppError {
    pub error: String,
}

impl OAuthAppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// The request could not be parsed (bad query, bad JSON body, body too large).
    pub fn request_error() -> Self {
        Self::new(format!("{ERROR_PREFIX} request error"))
    }

    pub fn missing_code_or_state() -> Self {
        Self::new(format!(
            "{ERROR_PREFIX} Both \"code\" & \"state\" parameters are required"
        ))
    }

    pub fn missing_authorization() -> Self {
        Self::new(format!(
            "{ERROR_PREFIX} \"Authorization\" header is required"
        ))
    }

    pub fn invalid_allow_signup() -> Self {
        Self::new(format!(
            "{ERROR_PREFIX} \"allowSignup\" must be \"true\" or \"false\""
        ))
    }

    /// The collaborator's authorization URL cannot be sent as a `Location` header.
    pub fn invalid_authorization_url() -> Self {
        Self::new(format!("{ERROR_PREFIX} invalid authorization URL"))
    }

    /// The provider redirected back with `?error=...` instead of a code.
    pub fn callback_error(error: &str, description: Option<&str>) -> Self {
        match description.filter(|d| !d.is_empty()) {
            Some(description) => Self::new(format!("{ERROR_PREFIX} {error} {description}")),
            None => Self::new(format!("{ERROR_PREFIX} {error}")),
        }
    }

    pub fn message(&self) -> &str {
        &self.error
    }
}

impl fmt::Display for OAuthAppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.error)
    }
}

impl std::error::Error for OAuthAppError {}

#[cfg(feature = "actix")]
impl ResponseError for OAuthAppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}
