//! Error types for streamtree.
//!
//! Provides structured errors with:
//! - Unique error codes
//! - Source error chaining
//! - Client vs server error categorization

use thiserror::Error;

/// Result type for streamtree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes.
///
/// Codes are structured as:
/// - 1xxx: Validation errors (client)
/// - 2xxx: Not found errors (client)
/// - 6xxx: Internal errors (server)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Validation errors (1xxx)
    InvalidHash = 1001,

    // Not found errors (2xxx)
    NodeNotFound = 2003,
    LeafNotFound = 2004,

    // Internal errors (6xxx)
    Internal = 6003,
}

impl ErrorCode {
    /// Get the numeric code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Check if this is a client error.
    pub fn is_client_error(self) -> bool {
        (1000..5000).contains(&self.code())
    }

    /// Check if this is a server error.
    pub fn is_server_error(self) -> bool {
        self.code() >= 5000
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Errors that can occur in streamtree.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid hash format or value.
    #[error("[{code}] invalid hash: {message}")]
    InvalidHash {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Node or leaf is not part of the current tree.
    #[error("[{code}] not found: {message}")]
    NotFound { code: ErrorCode, message: String },

    /// Tree structure is inconsistent.
    #[error("[{code}] internal error: {message}")]
    Internal { code: ErrorCode, message: String },
}

impl Error {
    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidHash { code, .. } => *code,
            Error::NotFound { code, .. } => *code,
            Error::Internal { code, .. } => *code,
        }
    }

    /// Check if this is a client error.
    pub fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        self.code().is_server_error()
    }

    /// Check if this is a not-found error of any kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Error {
    /// Create an InvalidHash error.
    pub fn invalid_hash(message: impl Into<String>) -> Self {
        Error::InvalidHash {
            code: ErrorCode::InvalidHash,
            message: message.into(),
            source: None,
        }
    }

    /// Create a NotFound error for tree nodes.
    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            code: ErrorCode::NodeNotFound,
            message: message.into(),
        }
    }

    /// Create a NotFound error for leaf indices.
    pub fn leaf_not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            code: ErrorCode::LeafNotFound,
            message: message.into(),
        }
    }

    /// Create an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            code: ErrorCode::Internal,
            message: message.into(),
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::InvalidHash {
            code: ErrorCode::InvalidHash,
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}
