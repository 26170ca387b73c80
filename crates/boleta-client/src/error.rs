//! # Client Error Types
//!
//! Error types for backend and identity-service calls.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     HTTP Status         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http (reqwest) │  │  Unauthorized (401)     │ │
//! │  │  InvalidUrl     │  │  InvalidResponse│  │  NotFound (404)         │ │
//! │  │  ConfigLoad/Save│  │                 │  │  Server (500)           │ │
//! │  └─────────────────┘  └─────────────────┘  │  Status (anything else) │ │
//! │                                             └─────────────────────────┘ │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Session      │  │    Business     │  │     Local input         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NoSession      │  │  Rejected       │  │  Validation             │ │
//! │  │  SessionStorage │  │  (success:false)│  │  Core                   │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`ClientError::user_message`] collapses any of these into the single line
//! shown to the cashier.

use boleta_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Shown for every 401.
pub const UNAUTHORIZED_MESSAGE: &str = "You are not authorized. Please log in again";

/// Shown for every 404.
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";

/// Shown for every 500.
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later";

/// Client error type covering every failure of a backend call.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// A configured URL is malformed or not http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body of a successful response had an unexpected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // HTTP Status Errors
    // =========================================================================
    /// 401. The stored session has already been cleared.
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("no details"))]
    Unauthorized(Option<String>),

    /// 404.
    #[error("Not found: {}", .0.as_deref().unwrap_or("no details"))]
    NotFound(Option<String>),

    /// 500.
    #[error("Server error: {}", .0.as_deref().unwrap_or("no details"))]
    Server(Option<String>),

    /// Any other non-success status. `message` is the server's explanation
    /// when the body carried one.
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    // =========================================================================
    // Business Errors
    // =========================================================================
    /// The backend answered 2xx with `success: false`.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    // =========================================================================
    // Session Errors
    // =========================================================================
    /// The call needs a token and none is stored.
    #[error("Not logged in")]
    NoSession,

    /// Reading or writing the session file failed.
    #[error("Session storage error: {0}")]
    SessionStorage(String),

    // =========================================================================
    // Local Input Errors
    // =========================================================================
    /// Input rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Checkout preconditions failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::InvalidResponse(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Builds the error for a non-success status.
    ///
    /// `server_message` is whatever [`crate::http`] could extract from the
    /// body (`mensaje`, then `message`, then the raw text).
    pub fn from_status(status: u16, server_message: Option<String>) -> Self {
        match status {
            401 => ClientError::Unauthorized(server_message),
            404 => ClientError::NotFound(server_message),
            500 => ClientError::Server(server_message),
            _ => ClientError::Status {
                status,
                message: server_message,
            },
        }
    }

    /// HTTP status of the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::NotFound(_) => Some(404),
            ClientError::Server(_) => Some(500),
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the user has to log in (again) to continue.
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_) | ClientError::NoSession)
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// One human-readable line for the cashier.
    ///
    /// ```text
    /// 401 → UNAUTHORIZED_MESSAGE      404 → NOT_FOUND_MESSAGE
    /// 500 → SERVER_ERROR_MESSAGE      other status → server message, if any
    /// success:false → server message  everything else → Display
    /// ```
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthorized(_) => UNAUTHORIZED_MESSAGE.to_string(),
            ClientError::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            ClientError::Server(_) => SERVER_ERROR_MESSAGE.to_string(),
            ClientError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            ClientError::Validation(err) => err.to_string(),
            ClientError::Core(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}
