mod test_utils;

use std::sync::Arc;
use test_utils::{ScriptedDriver, UnreadableStore, caption_reply, questions_reply};
use twain_core::{Difficulty, INTRO_HOOKS, NewQuestionGroup, NewQuestionGroupBuilder, Theme};
use twain_error::TwainErrorKind;
use twain_models::{CaptionGenerator, ChatDriver, QuestionGenerator};
use twain_server::GenerationPipeline;
use twain_store::{InMemoryStore, QuestionGroupStore};

fn pipeline(driver: &ScriptedDriver, store: &InMemoryStore) -> GenerationPipeline {
    pipeline_over(driver, Arc::new(store.clone()))
}

fn pipeline_over(driver: &ScriptedDriver, store: Arc<dyn QuestionGroupStore>) -> GenerationPipeline {
    let shared: Arc<dyn ChatDriver> = Arc::new(driver.clone());
    GenerationPipeline::new(
        store,
        QuestionGenerator::new(shared.clone()),
        CaptionGenerator::new(shared),
    )
}

fn seeded(title: &str, order: i64) -> NewQuestionGroup {
    NewQuestionGroupBuilder::default()
        .title(title)
        .questions((1..=5).map(|i| format!("{title} {i}?")).collect::<Vec<_>>())
        .theme(Theme::Communication)
        .difficulty(Difficulty::Medium)
        .caption("caption")
        .order(order)
        .build()
        .expect("valid group")
}

fn replies(tags: &[&str]) -> Vec<Result<String, twain_error::ModelErrorKind>> {
    tags.iter()
        .flat_map(|tag| [questions_reply(tag), caption_reply(tag)])
        .collect()
}

#[tokio::test]
async fn test_generate_one_builds_complete_group() -> anyhow::Result<()> {
    let driver = ScriptedDriver::new(vec![questions_reply("q"), caption_reply("c")]);
    let store = InMemoryStore::new();

    let group = pipeline(&driver, &store).generate_one(4).await?;

    assert!(!group.id.is_empty());
    assert_eq!(group.order, 4);
    assert!(group.is_active);
    assert_eq!(group.questions.len(), 5);
    assert!(INTRO_HOOKS.iter().any(|hook| group.title.starts_with(hook)));
    assert!(group.title.ends_with("UTC"));
    assert_eq!(store.list_ordered().await?, vec![group]);
    Ok(())
}

#[tokio::test]
async fn test_generation_failure_reports_generation_kind() -> anyhow::Result<()> {
    let driver = ScriptedDriver::new(vec![Ok("one?\ntwo?".to_string())]);
    let store = InMemoryStore::new();

    let err = pipeline(&driver, &store).generate_one(0).await.unwrap_err();

    assert!(matches!(err.kind(), TwainErrorKind::Generation(_)));
    assert_eq!(driver.call_count(), 1);
    assert!(store.list_ordered().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_orders_ignore_existing_groups() -> anyhow::Result<()> {
    let driver = ScriptedDriver::new(replies(&["single", "a", "b", "c"]));
    let store = InMemoryStore::new();
    store.create(seeded("existing", 0)).await?;
    store.create(seeded("later", 7)).await?;
    let pipeline = pipeline(&driver, &store);

    let single = pipeline.generate_one(0).await?;
    let batch = pipeline.generate_batch(3).await;

    assert_eq!(single.order, 0);
    let orders: Vec<_> = batch.iter().map(|g| g.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(store.list_ordered().await?.len(), 6);
    Ok(())
}

#[tokio::test]
async fn test_batch_numbers_survivors_by_attempt_index() -> anyhow::Result<()> {
    let driver = ScriptedDriver::new(vec![
        questions_reply("a"),
        caption_reply("a"),
        Ok("not enough".to_string()),
        questions_reply("c"),
        caption_reply("c"),
    ]);
    let store = InMemoryStore::new();

    let batch = pipeline(&driver, &store).generate_batch(3).await;

    let orders: Vec<_> = batch.iter().map(|g| g.order).collect();
    assert_eq!(orders, vec![0, 2]);
    Ok(())
}

#[tokio::test]
async fn test_batch_does_not_read_the_store() -> anyhow::Result<()> {
    let driver = ScriptedDriver::new(replies(&["a", "b"]));
    let inner = InMemoryStore::new();
    let pipeline = pipeline_over(&driver, Arc::new(UnreadableStore::new(inner.clone())));

    let batch = pipeline.generate_batch(2).await;

    assert_eq!(batch.len(), 2);
    assert_eq!(inner.list_ordered().await?.len(), 2);
    Ok(())
}
