//! In-memory implementation of MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Message;
use crate::errors::DomainError;

use super::query::{MessageFilter, QueryOptions, StatusCount, StatusCountQuery};
use super::trait_::MessageRepository;

/// Message repository backed by a map, used by tests and local runs
#[derive(Clone)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<HashMap<Uuid, Message>>>,
    should_fail: bool,
}

impl InMemoryMessageRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// A repository whose every operation fails, for error-path tests
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Store a message as-is, bypassing the lifecycle engine
    pub async fn seed(&self, message: Message) {
        self.messages.write().await.insert(message.uuid, message);
    }

    /// Current stored copy of a message, deleted or not
    pub async fn snapshot(&self, uuid: Uuid) -> Option<Message> {
        self.messages.read().await.get(&uuid).cloned()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "In-memory repository configured to fail".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert(&self, message: Message) -> Result<Message, DomainError> {
        self.check()?;
        let mut messages = self.messages.write().await;

        if messages.contains_key(&message.uuid) {
            return Err(DomainError::Internal {
                message: format!("Duplicate message uuid {}", message.uuid),
            });
        }

        messages.insert(message.uuid, message.clone());
        Ok(message)
    }

    async fn find_by_uuid(
        &self,
        uuid: Uuid,
        options: QueryOptions,
    ) -> Result<Option<Message>, DomainError> {
        self.check()?;
        let messages = self.messages.read().await;
        Ok(messages.get(&uuid).filter(|m| options.admits(m)).cloned())
    }

    async fn find_by_provider_message_id(
        &self,
        provider_message_id: &str,
        options: QueryOptions,
    ) -> Result<Option<Message>, DomainError> {
        self.check()?;
        let messages = self.messages.read().await;
        Ok(messages
            .values()
            .find(|m| m.provider_message_id == provider_message_id && options.admits(m))
            .cloned())
    }

    async fn find(
        &self,
        filter: &MessageFilter,
        options: QueryOptions,
    ) -> Result<Vec<Message>, DomainError> {
        self.check()?;
        let messages = self.messages.read().await;

        let mut found: Vec<Message> = messages
            .values()
            .filter(|m| options.admits(m) && filter.matches(m))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created.cmp(&a.created));

        if let Some(limit) = filter.limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    async fn update_status(&self, message: &Message) -> Result<(), DomainError> {
        self.update_statuses(std::slice::from_ref(message)).await
    }

    async fn update_statuses(&self, batch: &[Message]) -> Result<(), DomainError> {
        self.check()?;
        let mut messages = self.messages.write().await;

        if let Some(missing) = batch.iter().find(|m| !messages.contains_key(&m.uuid)) {
            return Err(DomainError::NotFound {
                resource: format!("Message {}", missing.uuid),
            });
        }

        for message in batch {
            if let Some(stored) = messages.get_mut(&message.uuid) {
                stored.status = message.status.clone();
                stored.date_sent = message.date_sent.clone();
                stored.error_code = message.error_code.clone();
                stored.error_message = message.error_message.clone();
                stored.modified = message.modified;
            }
        }
        Ok(())
    }

    async fn mark_redacted(&self, uuids: &[Uuid], at: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check()?;
        let mut messages = self.messages.write().await;

        let mut changed = 0;
        for uuid in uuids {
            if let Some(stored) = messages.get_mut(uuid).filter(|m| m.redacted.is_none()) {
                stored.redacted = Some(at);
                stored.modified = at;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn mark_deleted(&self, uuid: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check()?;
        let mut messages = self.messages.write().await;

        match messages.get_mut(&uuid).filter(|m| m.deleted.is_none()) {
            Some(stored) => {
                stored.deleted = Some(at);
                stored.modified = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_by_day_and_status(
        &self,
        query: &StatusCountQuery,
        options: QueryOptions,
    ) -> Result<Vec<StatusCount>, DomainError> {
        self.check()?;
        let messages = self.messages.read().await;

        let mut counts: BTreeMap<(chrono::NaiveDate, Option<String>), i64> = BTreeMap::new();
        for message in messages
            .values()
            .filter(|m| options.admits(m) && query.matches(m))
        {
            *counts
                .entry((message.created.date_naive(), message.status.clone()))
                .or_insert(0) += 1;
        }

        Ok(counts
            .into_iter()
            .map(|((day, status), count)| StatusCount { day, status, count })
            .collect())
    }
}
