//! Question generation failures.

/// Reasons a question set could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Neither parse path recovered five usable lines
    #[display("Only {} usable questions recovered, need 5", recovered)]
    TooFewQuestions {
        /// Lines recovered before the attempt was abandoned
        recovered: usize,
    },
    /// The text-generation call itself failed
    #[display("Text generation failed: {}", _0)]
    Model(String),
}

/// Generation error with location tracking.
///
/// A group that fails generation is never persisted.
///
/// # Examples
///
/// ```
/// use twain_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::TooFewQuestions { recovered: 3 });
/// assert!(format!("{}", err).contains("Only 3 usable questions"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
