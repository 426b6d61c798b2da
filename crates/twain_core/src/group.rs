//! Question-group records.

use crate::{Difficulty, Theme};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use twain_error::BuilderError;

/// Number of questions in every persisted group.
pub const QUESTIONS_PER_GROUP: usize = 5;

/// Name of the document collection holding question groups.
pub const QUESTION_GROUPS_COLLECTION: &str = "questionGroups";

/// One persisted set of generated conversation prompts.
///
/// `order` defines the global display order; it is the only field mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionGroup {
    /// Store-assigned identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Exactly five questions, in display order
    pub questions: Vec<String>,
    /// Prompt theme
    pub theme: Theme,
    /// Prompt difficulty
    pub difficulty: Difficulty,
    /// Social caption (possibly the fallback)
    pub caption: String,
    /// Creation time, immutable
    pub created_at: DateTime<Utc>,
    /// Global ranking; dense 0..N-1 after a completed reorder
    #[serde(default)]
    pub order: i64,
    /// Reserved for archival; always true in this workflow
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A question group before the store has assigned an id.
///
/// Built through [`NewQuestionGroupBuilder`], which refuses anything but
/// exactly five non-empty questions.
///
/// # Examples
///
/// ```
/// use twain_core::{Difficulty, NewQuestionGroupBuilder, Theme};
///
/// let group = NewQuestionGroupBuilder::default()
///     .title("Brave Questions for Couples")
///     .questions(vec!["a?".to_string(), "b?".into(), "c?".into(), "d?".into(), "e?".into()])
///     .theme(Theme::Values)
///     .difficulty(Difficulty::Medium)
///     .caption("caption")
///     .order(0)
///     .build()
///     .unwrap();
/// assert!(group.is_active);
///
/// let short = NewQuestionGroupBuilder::default()
///     .title("t")
///     .questions(vec!["only one?".to_string()])
///     .theme(Theme::Values)
///     .difficulty(Difficulty::Medium)
///     .caption("c")
///     .order(0)
///     .build();
/// assert!(short.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "BuilderError")
)]
pub struct NewQuestionGroup {
    /// Display title
    pub title: String,
    /// Exactly five questions
    pub questions: Vec<String>,
    /// Prompt theme
    pub theme: Theme,
    /// Prompt difficulty
    pub difficulty: Difficulty,
    /// Social caption
    pub caption: String,
    /// Creation time
    #[builder(default = "Utc::now()")]
    pub created_at: DateTime<Utc>,
    /// Initial ranking
    pub order: i64,
    /// Active flag
    #[builder(default = "true")]
    pub is_active: bool,
}

impl NewQuestionGroupBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(questions) = &self.questions {
            if questions.len() != QUESTIONS_PER_GROUP {
                return Err(format!(
                    "expected {} questions, got {}",
                    QUESTIONS_PER_GROUP,
                    questions.len()
                ));
            }
            if questions.iter().any(|q| q.trim().is_empty()) {
                return Err("questions must not be empty".to_string());
            }
        }
        Ok(())
    }
}

impl NewQuestionGroup {
    /// Attach the id the store assigned.
    pub fn with_id(self, id: impl Into<String>) -> QuestionGroup {
        QuestionGroup {
            id: id.into(),
            title: self.title,
            questions: self.questions,
            theme: self.theme,
            difficulty: self.difficulty,
            caption: self.caption,
            created_at: self.created_at,
            order: self.order,
            is_active: self.is_active,
        }
    }
}

/// Title shown for a group: opener plus creation timestamp.
pub fn compose_title(hook: &str, created_at: DateTime<Utc>) -> String {
    format!("{} · {}", hook, created_at.format("%Y-%m-%d %H:%M UTC"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn five() -> Vec<String> {
        (1..=5).map(|i| format!("Question {i}?")).collect()
    }

    #[test]
    fn test_builder_rejects_blank_question() {
        let mut questions = five();
        questions[2] = "   ".to_string();
        let result = NewQuestionGroupBuilder::default()
            .title("t")
            .questions(questions)
            .theme(Theme::Dreams)
            .difficulty(Difficulty::Light)
            .caption("c")
            .order(3)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_reports_missing_field() {
        let result = NewQuestionGroupBuilder::default()
            .questions(five())
            .theme(Theme::Dreams)
            .difficulty(Difficulty::Light)
            .caption("c")
            .order(0)
            .build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_with_id_keeps_fields() {
        let created_at = Utc.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap();
        let group = NewQuestionGroupBuilder::default()
            .title("t")
            .questions(five())
            .theme(Theme::Intimacy)
            .difficulty(Difficulty::Deep)
            .caption("c")
            .created_at(created_at)
            .order(4)
            .build()
            .unwrap()
            .with_id("abc");
        assert_eq!(group.id, "abc");
        assert_eq!(group.order, 4);
        assert_eq!(group.created_at, created_at);
        assert!(group.is_active);
    }

    #[test]
    fn test_compose_title_includes_timestamp() {
        let created_at = Utc.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap();
        assert_eq!(
            compose_title("Brave Questions for Couples", created_at),
            "Brave Questions for Couples · 2025-07-01 09:30 UTC"
        );
    }
}
