//! Chat-completion client error types.

/// Failure conditions of the external text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelErrorKind {
    /// No API key configured
    #[display("OPENAI_API_KEY is not set")]
    MissingApiKey,
    /// Request never produced a response
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Service answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message or body excerpt
        message: String,
    },
    /// Response body could not be decoded
    #[display("Failed to deserialize response: {}", _0)]
    Deserialization(String),
    /// Response contained no choices or no content
    #[display("Model returned an empty response")]
    EmptyResponse,
}

impl ModelErrorKind {
    /// Whether the service might succeed if asked again later.
    pub fn is_transient(&self) -> bool {
        match self {
            ModelErrorKind::Api { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            ModelErrorKind::Http(_) => true,
            _ => false,
        }
    }
}

/// Chat client error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at line {} in {}", kind, line, file)]
pub struct ModelError {
    /// The kind of error that occurred
    pub kind: ModelErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ModelError {
    /// Create a new ModelError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
