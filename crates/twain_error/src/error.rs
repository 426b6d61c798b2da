//! Top-level error wrapper types.

use crate::{
    AuthError, BuilderError, ConfigError, GenerationError, HttpError, ModelError, ServerError,
    StoreError,
};

/// Every failure the Twain crates can report, discriminated by area.
///
/// # Examples
///
/// ```
/// use twain_error::{TwainError, TwainErrorKind, HttpError};
///
/// let err: TwainError = HttpError::new("Connection failed").into();
/// assert!(matches!(err.kind(), TwainErrorKind::Http(_)));
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TwainErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Authentication error
    #[from(AuthError)]
    Auth(AuthError),
    /// Text-generation service error
    #[from(ModelError)]
    Model(ModelError),
    /// Question generation failed
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Document store error
    #[from(StoreError)]
    Store(StoreError),
    /// HTTP service host error
    #[from(ServerError)]
    Server(ServerError),
}

/// Twain error with kind discrimination.
///
/// # Examples
///
/// ```
/// use twain_error::{ConfigError, ConfigErrorKind, TwainResult};
///
/// fn might_fail() -> TwainResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Missing("openai.api_key".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Twain Error: {}", _0)]
pub struct TwainError(Box<TwainErrorKind>);

impl TwainError {
    /// Create a new error from a kind.
    pub fn new(kind: TwainErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TwainErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TwainErrorKind
impl<T> From<T> for TwainError
where
    T: Into<TwainErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Twain operations.
pub type TwainResult<T> = std::result::Result<T, TwainError>;
