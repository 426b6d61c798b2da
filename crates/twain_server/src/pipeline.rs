//! Roll, generate, caption, persist.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use twain_core::{
    NewQuestionGroupBuilder, QuestionGroup, Roll, compose_title, intro_hook_with, roll_with,
};
use twain_error::TwainResult;
use twain_models::{CaptionGenerator, QuestionGenerator};
use twain_store::QuestionGroupStore;

/// Where a single generation request currently is.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GenerationStage {
    /// Waiting for the caller's credential to be checked
    AuthPending,
    /// Caller verified
    Authorized,
    /// Choosing theme and difficulty
    Rolling,
    /// Asking for questions
    Generating,
    /// Asking for a caption
    CaptionPending,
    /// Writing the group
    Persisting,
    /// Group stored
    Done,
    /// Stopped early
    #[display("Failed({})", _0)]
    Failed(String),
}

/// Log a stage transition.
pub fn enter(stage: &GenerationStage) {
    debug!(stage = %stage, "Generation stage");
}

/// Produces and stores question groups.
///
/// Holds only shared, immutable services, so one pipeline serves any number
/// of concurrent requests.
#[derive(Clone)]
pub struct GenerationPipeline {
    store: Arc<dyn QuestionGroupStore>,
    questions: QuestionGenerator,
    captions: CaptionGenerator,
}

impl GenerationPipeline {
    /// Assemble a pipeline from its services.
    pub fn new(
        store: Arc<dyn QuestionGroupStore>,
        questions: QuestionGenerator,
        captions: CaptionGenerator,
    ) -> Self {
        Self {
            store,
            questions,
            captions,
        }
    }

    /// The store groups are written to.
    pub fn store(&self) -> &Arc<dyn QuestionGroupStore> {
        &self.store
    }

    /// Produce and store one group at `order`.
    ///
    /// When question generation fails the caption service is not called and
    /// nothing is written.
    pub async fn generate_one(&self, order: i64) -> TwainResult<QuestionGroup> {
        let (roll, hook) = {
            let mut rng = rand::thread_rng();
            (roll_with(&mut rng), intro_hook_with(&mut rng))
        };
        self.generate_rolled(roll, hook, order).await
    }

    #[instrument(skip(self, roll, hook), fields(theme = %roll.theme, difficulty = %roll.difficulty))]
    async fn generate_rolled(
        &self,
        roll: Roll,
        hook: &'static str,
        order: i64,
    ) -> TwainResult<QuestionGroup> {
        enter(&GenerationStage::Rolling);

        enter(&GenerationStage::Generating);
        let questions = match self.questions.generate(roll.instruction).await {
            Ok(questions) => questions,
            Err(e) => {
                enter(&GenerationStage::Failed(e.kind.to_string()));
                return Err(e.into());
            }
        };

        enter(&GenerationStage::CaptionPending);
        let caption = self.captions.generate().await;

        enter(&GenerationStage::Persisting);
        let created_at = Utc::now();
        let group = NewQuestionGroupBuilder::default()
            .title(compose_title(hook, created_at))
            .questions(questions)
            .theme(roll.theme)
            .difficulty(roll.difficulty)
            .caption(caption)
            .created_at(created_at)
            .order(order)
            .build()?;

        let id = match self.store.create(group.clone()).await {
            Ok(id) => id,
            Err(e) => {
                enter(&GenerationStage::Failed(e.kind.to_string()));
                return Err(e.into());
            }
        };

        enter(&GenerationStage::Done);
        info!(group_id = %id, order, "Question group stored");
        Ok(group.with_id(id))
    }

    /// Run `count` sequential single-group attempts, item `i` at `order = i`.
    ///
    /// Failed items are logged and skipped; the result holds whatever was
    /// produced, possibly fewer than `count` groups.
    #[instrument(skip(self))]
    pub async fn generate_batch(&self, count: usize) -> Vec<QuestionGroup> {
        let mut groups = Vec::with_capacity(count);
        for index in 0..count {
            match self.generate_one(index as i64).await {
                Ok(group) => groups.push(group),
                Err(e) => warn!(index, error = %e, "Batch item failed, continuing"),
            }
        }
        info!(requested = count, produced = groups.len(), "Batch generation finished");
        groups
    }
}
