//! Unified error handling for pump19.
//!
//! Every fallible layer gets its own enum so that handlers can decide which
//! failures degrade into a user-facing message and which bubble up to the
//! dispatcher backstop.

use thiserror::Error;

// ============================================================================
// Chat Client Errors (outbound messages)
// ============================================================================

/// Errors raised while delivering an outbound chat message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed")]
    Closed,
}

// ============================================================================
// Service Errors (upstream collaborators)
// ============================================================================

/// Errors returned by upstream data providers.
///
/// Handlers never surface these to chat; they turn them into an
/// "unavailable" style reply instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl ServiceError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Protocol(_) => "protocol",
            Self::NotConfigured(_) => "not_configured",
        }
    }
}

// ============================================================================
// Command Errors (handler execution)
// ============================================================================

/// Errors that can escape a command handler.
///
/// The dispatcher logs and swallows these; they never reach the chat.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("send error: {0}")]
    Send(#[from] ClientError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for command handlers.
pub type CommandResult = Result<(), CommandError>;
