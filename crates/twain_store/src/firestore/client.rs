use super::value::{Document, decode_group, encode_group, encode_probe, order_patch};
use crate::status::{status_error, transport_error};
use crate::{
    FirestoreConfig, QuestionGroupStore, StoreResult, Subscription, WriteProbe, TEST_COLLECTION,
    sort_for_display,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, instrument, warn};
use twain_core::{NewQuestionGroup, QUESTION_GROUPS_COLLECTION, QuestionGroup};
use twain_error::{StoreError, StoreErrorKind};

/// One element of a `:runQuery` response stream.
#[derive(Debug, Deserialize)]
struct RunQueryItem {
    #[serde(default)]
    document: Option<serde_json::Value>,
}

/// [`QuestionGroupStore`] over the Cloud Firestore REST API.
///
/// Subscriptions poll the ordered collection at the configured interval and
/// deliver only snapshots that differ from the last one delivered.
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    config: FirestoreConfig,
    client: reqwest::Client,
}

impl FirestoreStore {
    /// Create a store client.
    #[instrument(skip(config), fields(project = %config.project_id()))]
    pub fn new(config: FirestoreConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| StoreError::new(StoreErrorKind::Backend(e.to_string())))?;
        debug!("Creating Firestore client");
        Ok(Self { config, client })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> StoreResult<reqwest::Response> {
        let response = self.authorize(request).send().await.map_err(|e| {
            error!(error = %e, "Firestore request failed");
            StoreError::new(transport_error(&e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, "Firestore returned error");
        Err(StoreError::new(status_error(status.as_u16(), &body)))
    }

    async fn read_document(response: reqwest::Response) -> StoreResult<Document> {
        response
            .json()
            .await
            .map_err(|e| StoreError::new(StoreErrorKind::Backend(format!("Bad response: {}", e))))
    }

    /// Unconditional delete; Firestore answers 200 for a missing document.
    fn delete_request(&self, id: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(self.config.document_url(QUESTION_GROUPS_COLLECTION, id))
    }

    async fn insert(&self, collection: &str, document: &Document) -> StoreResult<String> {
        let request = self
            .client
            .post(self.config.collection_url(collection))
            .json(document);
        let created = Self::read_document(self.send(request).await?).await?;
        Ok(created.id().to_string())
    }
}

#[async_trait]
impl QuestionGroupStore for FirestoreStore {
    #[instrument(skip(self, group), fields(order = group.order))]
    async fn create(&self, group: NewQuestionGroup) -> StoreResult<String> {
        let id = self
            .insert(QUESTION_GROUPS_COLLECTION, &encode_group(&group))
            .await?;
        debug!(group_id = %id, "Created question group");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_ordered(&self) -> StoreResult<Vec<QuestionGroup>> {
        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": QUESTION_GROUPS_COLLECTION }],
                "orderBy": [{
                    "field": { "fieldPath": "order" },
                    "direction": "ASCENDING"
                }]
            }
        });
        let request = self
            .client
            .post(format!("{}:runQuery", self.config.documents_url()))
            .json(&query);
        let items: Vec<RunQueryItem> = self.send(request).await?.json().await.map_err(|e| {
            StoreError::new(StoreErrorKind::Backend(format!("Bad query response: {}", e)))
        })?;

        let mut groups = Vec::with_capacity(items.len());
        for raw in items.into_iter().filter_map(|item| item.document) {
            let decoded = serde_json::from_value::<Document>(raw)
                .map_err(|e| StoreError::new(StoreErrorKind::InvalidDocument(e.to_string())))
                .and_then(|document| decode_group(&document));
            match decoded {
                Ok(group) => groups.push(group),
                Err(e) => warn!(error = %e, "Skipping undecodable question group"),
            }
        }
        sort_for_display(&mut groups);
        debug!(count = groups.len(), "Listed question groups");
        Ok(groups)
    }

    async fn subscribe(&self) -> StoreResult<Subscription> {
        // Fail fast on the first read so callers see credential problems
        // from `subscribe` itself.
        let first = self.list_ordered().await?;
        let store = self.clone();
        let interval = *self.config.poll_interval();

        Ok(Subscription::spawn(move |tx| async move {
            let mut last = first;
            if tx.send(Ok(last.clone())).await.is_err() {
                return;
            }
            loop {
                tokio::time::sleep(interval).await;
                match store.list_ordered().await {
                    Ok(snapshot) if snapshot == last => {}
                    Ok(snapshot) => {
                        last = snapshot.clone();
                        if tx.send(Ok(snapshot)).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e)).await;
                        return;
                    }
                }
            }
        }))
    }

    #[instrument(skip(self))]
    async fn update_order(&self, id: &str, order: i64) -> StoreResult<()> {
        let request = self
            .client
            .patch(self.config.document_url(QUESTION_GROUPS_COLLECTION, id))
            .query(&[
                ("updateMask.fieldPaths", "order"),
                ("currentDocument.exists", "true"),
            ])
            .json(&order_patch(order));
        self.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.send(self.delete_request(id)).await?;
        debug!(group_id = %id, "Deleted question group");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn write_probe(&self, user_id: &str) -> StoreResult<String> {
        self.insert(TEST_COLLECTION, &encode_probe(&WriteProbe::now(user_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_query_item_without_document() {
        let items: Vec<RunQueryItem> =
            serde_json::from_str(r#"[{"readTime": "2025-01-01T00:00:00Z"}]"#).unwrap();
        assert!(items[0].document.is_none());
    }

    #[test]
    fn test_delete_request_has_no_existence_precondition() {
        let config = crate::FirestoreConfigBuilder::default()
            .project_id("twain-test")
            .build()
            .unwrap();
        let store = FirestoreStore::new(config).unwrap();

        let request = store.delete_request("group-1").build().unwrap();

        assert_eq!(request.method(), reqwest::Method::DELETE);
        assert!(request.url().path().ends_with("/questionGroups/group-1"));
        assert_eq!(request.url().query(), None);
    }
}
