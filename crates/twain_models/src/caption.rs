//! Social caption generation with a static fallback.

use crate::{ChatDriver, Message};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Caption used whenever the provider fails.
pub const FALLBACK_CAPTION: &str = "Questions to explore with your person 💬 Save these to talk through together later. #relationships #couplesgoals #talktogether #deepquestions";

const SYSTEM_PROMPT: &str =
    "You are a social media copywriter for a relationship-focused account.";

const CAPTION_PROMPT: &str = "Rewrite this social media caption in a fresh, casual way that still means the same thing: \
     \"Questions to explore with your person 💬 Save these to talk through together later.\" \
     Keep it short and modern. Do not mention any apps or brands. \
     Then add 3–5 relevant hashtags at the end, like #relationships #talktogether.";

/// Produces a short caption for a question group.
///
/// Caption quality is not critical, so [`CaptionGenerator::generate`] never
/// fails: provider errors collapse into [`FALLBACK_CAPTION`].
#[derive(Clone)]
pub struct CaptionGenerator {
    driver: Arc<dyn ChatDriver>,
}

impl CaptionGenerator {
    /// Create a generator backed by the given provider.
    pub fn new(driver: Arc<dyn ChatDriver>) -> Self {
        Self { driver }
    }

    /// Generate a caption; the trimmed reply is returned unvalidated.
    #[instrument(skip(self), fields(provider = self.driver.provider_name()))]
    pub async fn generate(&self) -> String {
        let messages = [Message::system(SYSTEM_PROMPT), Message::user(CAPTION_PROMPT)];
        match self.driver.complete(&messages).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Caption generation returned nothing. Using fallback.");
                FALLBACK_CAPTION.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Caption generation failed. Using fallback.");
                FALLBACK_CAPTION.to_string()
            }
        }
    }
}
