//! Error types for the homework bot

use std::fmt;

/// Finer classification for shape and domain failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    MissingKey,
    UnrecognizedValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeMismatch => write!(f, "type mismatch"),
            ErrorKind::MissingKey => write!(f, "missing key"),
            ErrorKind::UnrecognizedValue => write!(f, "unrecognized value"),
        }
    }
}

/// Errors that can occur in the homework bot
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API request failed: {0}")]
    Transport(String),

    #[error("API protocol error: {0}")]
    Protocol(String),

    #[error("API response violates contract ({kind}): {message}")]
    ContractViolation { kind: ErrorKind, message: String },

    #[error("Invalid homework record ({kind}): {message}")]
    Domain { kind: ErrorKind, message: String },

    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BotError {
    pub fn contract(kind: ErrorKind, message: impl Into<String>) -> Self {
        BotError::ContractViolation {
            kind,
            message: message.into(),
        }
    }

    pub fn domain(kind: ErrorKind, message: impl Into<String>) -> Self {
        BotError::Domain {
            kind,
            message: message.into(),
        }
    }

    /// Sub-classification for contract and domain failures
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            BotError::ContractViolation { kind, .. } | BotError::Domain { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Pipeline stage the error originated from
    pub fn origin(&self) -> &'static str {
        match self {
            BotError::Config(_) | BotError::Io(_) | BotError::Json(_) => "config",
            BotError::Transport(_) | BotError::Protocol(_) => "fetch",
            BotError::ContractViolation { .. } => "validate",
            BotError::Domain { .. } => "translate",
            BotError::Delivery(_) => "notify",
        }
    }
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, BotError>;
