//! Error types for the Automatisch MCP server
//!
//! Every failure the dispatcher can see collapses into one of four kinds,
//! each with a stable JSON-RPC code:
//!
//! | kind               | code     | protocol name    |
//! |--------------------|----------|------------------|
//! | `UnknownTool`      | -32601   | MethodNotFound   |
//! | `UnknownResource`  | -32600   | InvalidRequest   |
//! | `InvalidArgument`  | -32602   | InvalidParams    |
//! | `BackendFailure`   | -32603   | InternalError    |

use automatisch_client::{BackendOperation, ClientError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Result type for the transport shell
pub type ServerResult<T> = Result<T, ServerError>;

/// JSON-RPC error codes used by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<i32> for ErrorCode {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            -32700 => Ok(ErrorCode::ParseError),
            -32600 => Ok(ErrorCode::InvalidRequest),
            -32601 => Ok(ErrorCode::MethodNotFound),
            -32602 => Ok(ErrorCode::InvalidParams),
            -32603 => Ok(ErrorCode::InternalError),
            other => Err(format!("unknown error code {}", other)),
        }
    }
}

/// Error payload sent to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolError {
    pub code: ErrorCode,
    pub message: String,
}

impl ProtocolError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failures detected at the dispatch boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Tool name is not in the registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Resource URI is not in the registry
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// A required argument is missing or an argument is malformed
    #[error("Invalid arguments: {message}")]
    InvalidArgument {
        field: Option<String>,
        message: String,
    },

    /// The backend call failed (network, auth, API error, ...)
    #[error("{operation} failed: {message}")]
    BackendFailure {
        operation: BackendOperation,
        message: String,
    },
}

impl DispatchError {
    /// A required field was absent
    pub fn missing(field: &str) -> Self {
        DispatchError::InvalidArgument {
            field: Some(field.to_string()),
            message: format!("missing required argument `{}`", field),
        }
    }

    /// An argument was present but unusable
    pub fn invalid(field: Option<&str>, message: impl Into<String>) -> Self {
        DispatchError::InvalidArgument {
            field: field.map(ToString::to_string),
            message: message.into(),
        }
    }

    /// Collapse a client failure, keeping only its message text
    pub fn backend(operation: BackendOperation, err: &ClientError) -> Self {
        DispatchError::BackendFailure {
            operation,
            message: err.to_string(),
        }
    }

    /// Protocol code for this failure
    pub fn error_code(&self) -> ErrorCode {
        match self {
            DispatchError::UnknownTool(_) => ErrorCode::MethodNotFound,
            DispatchError::UnknownResource(_) => ErrorCode::InvalidRequest,
            DispatchError::InvalidArgument { .. } => ErrorCode::InvalidParams,
            DispatchError::BackendFailure { .. } => ErrorCode::InternalError,
        }
    }

    /// Field the failure refers to, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            DispatchError::InvalidArgument { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    pub fn to_protocol_error(&self) -> ProtocolError {
        ProtocolError::new(self.error_code(), self.to_string())
    }
}

impl From<DispatchError> for ProtocolError {
    fn from(err: DispatchError) -> Self {
        err.to_protocol_error()
    }
}

/// Errors of the stdio transport shell
#[derive(Error, Debug)]
pub enum ServerError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend client could not be constructed
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}
