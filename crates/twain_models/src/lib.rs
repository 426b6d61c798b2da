//! Text-generation integration for Twain.
//!
//! This crate provides an OpenAI-compatible chat client behind the
//! [`ChatDriver`] trait, and the two generators built on top of it:
//!
//! - [`QuestionGenerator`]: five conversation questions per instruction,
//!   with a line-splitting fallback for malformed replies
//! - [`CaptionGenerator`]: a social caption that falls back to a fixed
//!   string instead of failing
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use twain_models::{ChatConfig, OpenAiClient, QuestionGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::new(ChatConfig::from_env()?)?;
//!     let generator = QuestionGenerator::new(Arc::new(client));
//!     let questions = generator.generate("Write playful questions.").await?;
//!     assert_eq!(questions.len(), 5);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod caption;
mod client;
mod config;
mod driver;
mod questions;
mod request;
mod response;

pub use caption::{CaptionGenerator, FALLBACK_CAPTION};
pub use client::OpenAiClient;
pub use config::{ChatConfig, ChatConfigBuilder, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use driver::{ChatDriver, ModelResult};
pub use questions::{QUESTION_COUNT, QuestionGenerator, parse_questions};
pub use request::{ChatCompletionRequest, Message};
pub use response::{ChatCompletionResponse, Choice, ChoiceMessage, Usage};
