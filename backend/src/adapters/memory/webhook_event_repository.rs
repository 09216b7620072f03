//! In-memory processed-webhook store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{SaveResult, WebhookEventRecord, WebhookEventRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryWebhookEventRepository {
    events: Arc<RwLock<HashMap<String, WebhookEventRecord>>>,
}

impl InMemoryWebhookEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, event_id: &str) -> Option<WebhookEventRecord> {
        self.events.read().await.get(event_id).cloned()
    }
}

#[async_trait]
impl WebhookEventRepository for InMemoryWebhookEventRepository {
    async fn exists(&self, event_id: &str) -> Result<bool, DomainError> {
        Ok(self.events.read().await.contains_key(event_id))
    }

    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError> {
        let mut events = self.events.write().await;
        if events.contains_key(&record.event_id) {
            return Ok(SaveResult::AlreadyExists);
        }
        events.insert(record.event_id.clone(), record);
        Ok(SaveResult::Inserted)
    }
}
