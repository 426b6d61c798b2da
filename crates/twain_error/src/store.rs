//! Document store errors and retry classification.

/// Store failure conditions, named after the document database status codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Store unreachable or overloaded
    #[display("Store unavailable: {}", _0)]
    Unavailable(String),
    /// Store did not answer in time
    #[display("Deadline exceeded: {}", _0)]
    DeadlineExceeded(String),
    /// Credential lacks access to the collection
    #[display("Permission denied: {}", _0)]
    PermissionDenied(String),
    /// Document does not exist
    #[display("Document not found: {}", _0)]
    NotFound(String),
    /// Document exists but does not decode as a question group
    #[display("Invalid document: {}", _0)]
    InvalidDocument(String),
    /// Subscription was released before a snapshot arrived
    #[display("Subscription cancelled")]
    Cancelled,
    /// Anything else the backend reported
    #[display("Store backend error: {}", _0)]
    Backend(String),
}

impl StoreErrorKind {
    /// Classification string used by subscribers to pick a recovery path.
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorKind::Unavailable(_) => "unavailable",
            StoreErrorKind::DeadlineExceeded(_) => "deadline-exceeded",
            StoreErrorKind::PermissionDenied(_) => "permission-denied",
            StoreErrorKind::NotFound(_) => "not-found",
            StoreErrorKind::InvalidDocument(_) => "invalid-document",
            StoreErrorKind::Cancelled => "cancelled",
            StoreErrorKind::Backend(_) => "unknown",
        }
    }

    /// Human-readable detail without the classification prefix.
    pub fn detail(&self) -> String {
        match self {
            StoreErrorKind::Unavailable(m)
            | StoreErrorKind::DeadlineExceeded(m)
            | StoreErrorKind::PermissionDenied(m)
            | StoreErrorKind::NotFound(m)
            | StoreErrorKind::InvalidDocument(m)
            | StoreErrorKind::Backend(m) => m.clone(),
            StoreErrorKind::Cancelled => "subscription cancelled".to_string(),
        }
    }
}

/// Store error with location tracking.
///
/// # Examples
///
/// ```
/// use twain_error::{RetryableError, StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::Unavailable("connection reset".to_string()));
/// assert_eq!(err.kind.code(), "unavailable");
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// Transient conditions (store unavailable, deadline exceeded) return true.
/// Credential and data problems return false: retrying cannot fix them.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for StoreError {
    fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            StoreErrorKind::Unavailable(_) | StoreErrorKind::DeadlineExceeded(_)
        )
    }
}
