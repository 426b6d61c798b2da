//! Authentication error types.

/// Why a caller could not be authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AuthErrorKind {
    /// No `Authorization: Bearer` header was presented
    #[display("Missing bearer credential")]
    MissingCredential,
    /// The identity service rejected the credential
    #[display("Credential rejected: {}", _0)]
    Rejected(String),
    /// The identity service could not be reached or answered garbage
    #[display("Identity service error: {}", _0)]
    Verifier(String),
    /// A client session could not produce a fresh token
    #[display("Token refresh failed: {}", _0)]
    TokenRefreshFailed(String),
}

/// Authentication error with source location tracking.
///
/// Every kind surfaces as HTTP 401 at the endpoint layer and is never retried.
///
/// # Examples
///
/// ```
/// use twain_error::{AuthError, AuthErrorKind};
///
/// let err = AuthError::new(AuthErrorKind::MissingCredential);
/// assert!(format!("{}", err).contains("Missing bearer credential"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", kind, line, file)]
pub struct AuthError {
    /// The kind of error that occurred
    pub kind: AuthErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AuthErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
