//! Five-question generation and response parsing.

use crate::{ChatDriver, Message};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use twain_error::{GenerationError, GenerationErrorKind};

/// Number of questions a usable response must yield.
pub const QUESTION_COUNT: usize = 5;

const SYSTEM_PROMPT: &str = "You are a relationship expert helping couples get closer.";

const FORMAT_DIRECTIVE: &str = "Give exactly 5 questions. Each must be under 200 characters. \
     Do not number or bullet them. Keep the questions on one line each.";

/// Decoration a model may put around a line despite being told not to.
fn is_decoration(c: char) -> bool {
    matches!(c, '-' | '–' | '—' | '•' | ' ')
}

fn clean_line(line: &str) -> &str {
    line.trim().trim_matches(is_decoration).trim()
}

/// Steps shared by parsing and diagnostics: split, clean, and fall back to
/// question-mark splitting when the model put everything on one line.
fn recover_lines(raw: &str) -> Vec<String> {
    let lines: Vec<String> = raw
        .trim()
        .lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.len() != 1 {
        return lines;
    }

    lines[0]
        .replace("\\n", "\n")
        .replace('?', "?\n")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Recover exactly five questions from a raw model response.
///
/// Returns an empty vector when fewer than five usable lines can be
/// recovered; never returns one to four items. Extra lines are dropped.
///
/// # Examples
///
/// ```
/// use twain_models::parse_questions;
///
/// let raw = "- One?\n- Two?\n- Three?\n- Four?\n- Five?\n- Six?";
/// assert_eq!(parse_questions(raw), vec!["One?", "Two?", "Three?", "Four?", "Five?"]);
///
/// assert!(parse_questions("Only one?\nAnd two?").is_empty());
/// ```
pub fn parse_questions(raw: &str) -> Vec<String> {
    let mut lines = recover_lines(raw);
    if lines.len() >= QUESTION_COUNT {
        lines.truncate(QUESTION_COUNT);
        lines
    } else {
        Vec::new()
    }
}

/// Produces question sets from an instruction via a chat provider.
#[derive(Clone)]
pub struct QuestionGenerator {
    driver: Arc<dyn ChatDriver>,
}

impl QuestionGenerator {
    /// Create a generator backed by the given provider.
    pub fn new(driver: Arc<dyn ChatDriver>) -> Self {
        Self { driver }
    }

    /// The conversation sent for an instruction.
    pub fn build_messages(instruction: &str) -> Vec<Message> {
        vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(format!("{} {}", instruction, FORMAT_DIRECTIVE)),
        ]
    }

    /// Generate exactly five questions.
    ///
    /// A single attempt: provider errors and short responses both fail with
    /// [`GenerationError`] and nothing is retried here.
    #[instrument(skip(self, instruction), fields(provider = self.driver.provider_name(), model = self.driver.model_name()))]
    pub async fn generate(&self, instruction: &str) -> Result<Vec<String>, GenerationError> {
        let messages = Self::build_messages(instruction);
        let raw = self.driver.complete(&messages).await.map_err(|e| {
            warn!(error = %e, "Question generation request failed");
            GenerationError::new(GenerationErrorKind::Model(e.kind.to_string()))
        })?;

        let questions = parse_questions(&raw);
        if questions.is_empty() {
            let recovered = recover_lines(&raw).len();
            warn!(recovered, "Response did not contain 5 usable questions");
            return Err(GenerationError::new(GenerationErrorKind::TooFewQuestions {
                recovered,
            }));
        }

        debug!(count = questions.len(), "Questions generated");
        Ok(questions)
    }
}
