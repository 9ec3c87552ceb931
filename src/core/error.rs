//! Typed error handling
//!
//! Errors are grouped by category so callers can match on the case they
//! care about instead of inspecting an opaque `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`ProviderError`]: data provider operations (CRUD)
//! - [`UploadError`]: banner image selection and upload
//! - [`ValidationError`]: form payload validation
//! - [`ConfigError`]: configuration loading
//!
//! None of these are fatal to the process; each is scoped to the request or
//! widget interaction that raised it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The top-level error type
#[derive(Debug, thiserror::Error)]
pub enum CampusError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Anything unexpected, kept as a message
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CampusError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CampusError::Provider(e) => e.status_code(),
            CampusError::Upload(e) => e.status_code(),
            CampusError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CampusError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CampusError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CampusError::Provider(e) => e.error_code(),
            CampusError::Upload(e) => e.error_code(),
            CampusError::Validation(_) => "VALIDATION_ERROR",
            CampusError::Config(_) => "CONFIG_ERROR",
            CampusError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CampusError::Provider(ProviderError::NotFound { resource, id }) => {
                Some(serde_json::json!({ "resource": resource, "id": id }))
            }
            CampusError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl From<anyhow::Error> for CampusError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ProviderError>() {
            Ok(provider) => CampusError::Provider(provider),
            Err(other) => CampusError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for CampusError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Provider Errors
// =============================================================================

/// Errors raised by data providers
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// No record with this id
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    /// The provider does not serve this resource
    #[error("Unknown resource: {resource}")]
    UnknownResource { resource: String },

    /// The submitted variables do not form a valid record
    #[error("Invalid payload for {resource}: {message}")]
    InvalidPayload { resource: String, message: String },
}

impl ProviderError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProviderError::NotFound { .. } => StatusCode::NOT_FOUND,
            ProviderError::UnknownResource { .. } => StatusCode::NOT_FOUND,
            ProviderError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ProviderError::NotFound { .. } => "RECORD_NOT_FOUND",
            ProviderError::UnknownResource { .. } => "UNKNOWN_RESOURCE",
            ProviderError::InvalidPayload { .. } => "INVALID_PAYLOAD",
        }
    }
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Message shown for any transport or response-shape failure
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload image. Try again.";

/// Message shown when the file type is not allowed
pub const INVALID_TYPE_MESSAGE: &str = "Only PNG, JPG, JPEG, and WEBP files are allowed.";

/// Errors surfaced to the user by the upload flow
///
/// The display strings are the exact inline messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// MIME type outside the allow-list
    #[error("{}", INVALID_TYPE_MESSAGE)]
    InvalidType { mime_type: String },

    /// File bigger than the configured ceiling
    #[error("Image must be {max_megabytes}MB or less.")]
    TooLarge { size: u64, max_megabytes: u64 },

    /// Network failure, bad status or malformed response, collapsed into one
    #[error("{}", UPLOAD_FAILED_MESSAGE)]
    Failed,
}

impl UploadError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UploadError::InvalidType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::Failed => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            UploadError::InvalidType { .. } => "UPLOAD_INVALID_TYPE",
            UploadError::TooLarge { .. } => "UPLOAD_TOO_LARGE",
            UploadError::Failed => "UPLOAD_FAILED",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised while validating a form payload
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The payload is not a JSON object
    #[error("Expected a JSON object")]
    NotAnObject,

    /// One or more fields failed validation
    #[error("Validation failed: {}", .0.join("; "))]
    FieldErrors(Vec<String>),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
