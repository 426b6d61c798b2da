//! Core data types for the Twain question-group service.
//!
//! - [`QuestionGroup`] / [`NewQuestionGroup`]: the persisted record
//! - [`PromptTable`]: static instruction text per (theme, difficulty)
//! - [`roll`]: uniform random selection of a (theme, difficulty) pair

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod group;
mod prompts;
mod roll;
mod theme;
mod video;

pub use group::{
    NewQuestionGroup, NewQuestionGroupBuilder, QUESTION_GROUPS_COLLECTION, QUESTIONS_PER_GROUP,
    QuestionGroup, compose_title,
};
pub use prompts::{INTRO_HOOKS, PromptTable, intro_hook_with};
pub use roll::{Roll, roll, roll_with};
pub use theme::{Difficulty, Theme};
pub use video::{VIDEO_QUEUE_PREFIX, VideoEntry};
