//! MySQL implementation of the MessageRepository trait.
//!
//! Soft-deleted rows are filtered in SQL from the `QueryOptions` each read
//! path receives, so every query honours the same rule.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{Executor, MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use sms_core::domain::entities::Message;
use sms_core::errors::DomainError;
use sms_core::repositories::{
    MessageFilter, MessageRepository, QueryOptions, StatusCount, StatusCountQuery, StatusFilter,
};

const SELECT_COLUMNS: &str = r#"
    SELECT uuid, created, modified, sender, receiver, content, trustomer_code, product_name,
           provider_message_id, status, date_sent, error_code, error_message, deleted, redacted
    FROM message
"#;

// Provider-owned columns only; deleted and redacted have their own writes
const UPDATE_STATUS: &str = r#"
    UPDATE message
    SET modified = ?, status = ?, date_sent = ?, error_code = ?, error_message = ?
    WHERE uuid = ?
"#;

const MARK_DELETED: &str = r#"
    UPDATE message
    SET deleted = ?, modified = ?
    WHERE uuid = ? AND deleted IS NULL
"#;

/// MySQL implementation of MessageRepository
pub struct MySqlMessageRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlMessageRepository {
    /// Create a new MySQL message repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Message entity
    fn row_to_message(row: &MySqlRow) -> Result<Message, DomainError> {
        let uuid: String = row.try_get("uuid").map_err(|e| db_error("uuid", e))?;

        Ok(Message {
            uuid: Uuid::parse_str(&uuid).map_err(|e| DomainError::Internal {
                message: format!("Invalid message UUID: {}", e),
            })?,
            created: row.try_get("created").map_err(|e| db_error("created", e))?,
            modified: row.try_get("modified").map_err(|e| db_error("modified", e))?,
            sender: row.try_get("sender").map_err(|e| db_error("sender", e))?,
            receiver: row.try_get("receiver").map_err(|e| db_error("receiver", e))?,
            content: row.try_get("content").map_err(|e| db_error("content", e))?,
            trustomer_code: row
                .try_get("trustomer_code")
                .map_err(|e| db_error("trustomer_code", e))?,
            product_name: row
                .try_get("product_name")
                .map_err(|e| db_error("product_name", e))?,
            provider_message_id: row
                .try_get("provider_message_id")
                .map_err(|e| db_error("provider_message_id", e))?,
            status: row.try_get("status").map_err(|e| db_error("status", e))?,
            date_sent: row.try_get("date_sent").map_err(|e| db_error("date_sent", e))?,
            error_code: row.try_get("error_code").map_err(|e| db_error("error_code", e))?,
            error_message: row
                .try_get("error_message")
                .map_err(|e| db_error("error_message", e))?,
            deleted: row
                .try_get::<Option<DateTime<Utc>>, _>("deleted")
                .map_err(|e| db_error("deleted", e))?,
            redacted: row
                .try_get::<Option<DateTime<Utc>>, _>("redacted")
                .map_err(|e| db_error("redacted", e))?,
        })
    }

    fn rows_to_messages(rows: &[MySqlRow]) -> Result<Vec<Message>, DomainError> {
        rows.iter().map(Self::row_to_message).collect()
    }

    fn update_status_query(message: &Message) -> Query<'_, MySql, MySqlArguments> {
        sqlx::query(UPDATE_STATUS)
            .bind(message.modified)
            .bind(&message.status)
            .bind(&message.date_sent)
            .bind(&message.error_code)
            .bind(&message.error_message)
            .bind(message.uuid.to_string())
    }

    async fn exists<'e, E>(executor: E, uuid: Uuid) -> Result<bool, DomainError>
    where
        E: Executor<'e, Database = MySql>,
    {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM message WHERE uuid = ?) AS found")
            .bind(uuid.to_string())
            .fetch_one(executor)
            .await
            .map_err(|e| db_error("message existence", e))?;
        let found: i64 = row.try_get("found").map_err(|e| db_error("found", e))?;
        Ok(found == 1)
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Database error ({}): {}", context, e),
    }
}

fn push_deleted_clause(builder: &mut QueryBuilder<'_, MySql>, options: QueryOptions) {
    if !options.include_deleted {
        builder.push(" AND deleted IS NULL");
    }
}

fn push_status_clause<'a>(builder: &mut QueryBuilder<'a, MySql>, filter: &'a StatusFilter) {
    match filter {
        StatusFilter::Any => {}
        StatusFilter::In(values) if values.is_empty() => {
            builder.push(" AND FALSE");
        }
        StatusFilter::In(values) => {
            builder.push(" AND status IN (");
            let mut separated = builder.separated(", ");
            for value in values {
                separated.push_bind(value.as_str());
            }
            separated.push_unseparated(")");
        }
        StatusFilter::NotIn(values) if values.is_empty() => {}
        StatusFilter::NotIn(values) => {
            builder.push(" AND (status IS NULL OR status NOT IN (");
            let mut separated = builder.separated(", ");
            for value in values {
                separated.push_bind(value.as_str());
            }
            separated.push_unseparated("))");
        }
    }
}

#[async_trait]
impl MessageRepository for MySqlMessageRepository {
    async fn insert(&self, message: Message) -> Result<Message, DomainError> {
        let query = r#"
            INSERT INTO message (
                uuid, created, modified, sender, receiver, content, trustomer_code, product_name,
                provider_message_id, status, date_sent, error_code, error_message, deleted, redacted
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(message.uuid.to_string())
            .bind(message.created)
            .bind(message.modified)
            .bind(&message.sender)
            .bind(&message.receiver)
            .bind(&message.content)
            .bind(&message.trustomer_code)
            .bind(&message.product_name)
            .bind(&message.provider_message_id)
            .bind(&message.status)
            .bind(&message.date_sent)
            .bind(&message.error_code)
            .bind(&message.error_message)
            .bind(message.deleted)
            .bind(message.redacted)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("insert message", e))?;

        Ok(message)
    }

    async fn find_by_uuid(
        &self,
        uuid: Uuid,
        options: QueryOptions,
    ) -> Result<Option<Message>, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new(SELECT_COLUMNS);
        builder.push(" WHERE uuid = ").push_bind(uuid.to_string());
        push_deleted_clause(&mut builder, options);
        builder.push(" LIMIT 1");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find message by uuid", e))?;

        row.as_ref().map(Self::row_to_message).transpose()
    }

    async fn find_by_provider_message_id(
        &self,
        provider_message_id: &str,
        options: QueryOptions,
    ) -> Result<Option<Message>, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new(SELECT_COLUMNS);
        builder
            .push(" WHERE provider_message_id = ")
            .push_bind(provider_message_id);
        push_deleted_clause(&mut builder, options);
        builder.push(" LIMIT 1");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find message by provider id", e))?;

        row.as_ref().map(Self::row_to_message).transpose()
    }

    async fn find(
        &self,
        filter: &MessageFilter,
        options: QueryOptions,
    ) -> Result<Vec<Message>, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new(SELECT_COLUMNS);
        builder.push(" WHERE 1 = 1");
        push_deleted_clause(&mut builder, options);

        if let Some(trustomer_code) = &filter.trustomer_code {
            builder.push(" AND trustomer_code = ").push_bind(trustomer_code.as_str());
        }
        if let Some(product_name) = &filter.product_name {
            builder.push(" AND product_name = ").push_bind(product_name.as_str());
        }
        if let Some(receiver) = &filter.receiver {
            builder.push(" AND receiver = ").push_bind(receiver.as_str());
        }
        push_status_clause(&mut builder, &filter.status);
        if let Some(after) = filter.created_after {
            builder.push(" AND created > ").push_bind(after);
        }
        if filter.unredacted_only {
            builder.push(" AND redacted IS NULL");
        }

        builder.push(" ORDER BY created DESC");
        if let Some(limit) = filter.limit {
            builder.push(" LIMIT ").push_bind(limit as u64);
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("find messages", e))?;

        Self::rows_to_messages(&rows)
    }

    async fn update_status(&self, message: &Message) -> Result<(), DomainError> {
        let result = Self::update_status_query(message)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("update message status", e))?;

        // MySQL reports zero affected rows for a no-op update as well
        if result.rows_affected() == 0 && !Self::exists(&self.pool, message.uuid).await? {
            return Err(DomainError::NotFound {
                resource: format!("Message {}", message.uuid),
            });
        }
        Ok(())
    }

    async fn update_statuses(&self, messages: &[Message]) -> Result<(), DomainError> {
        if messages.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        for message in messages {
            let result = Self::update_status_query(message)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("update message status in batch", e))?;

            // Dropping the transaction rolls the batch back
            if result.rows_affected() == 0 && !Self::exists(&mut *tx, message.uuid).await? {
                return Err(DomainError::NotFound {
                    resource: format!("Message {}", message.uuid),
                });
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        tracing::debug!(count = messages.len(), "Batch status update committed");
        Ok(())
    }

    async fn mark_redacted(&self, uuids: &[Uuid], at: DateTime<Utc>) -> Result<u64, DomainError> {
        if uuids.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<MySql>::new("UPDATE message SET redacted = ");
        builder.push_bind(at);
        builder.push(", modified = ").push_bind(at);
        builder.push(" WHERE redacted IS NULL AND uuid IN (");
        let mut separated = builder.separated(", ");
        for uuid in uuids {
            separated.push_bind(uuid.to_string());
        }
        separated.push_unseparated(")");

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("mark messages redacted", e))?;

        tracing::debug!(
            requested = uuids.len(),
            redacted = result.rows_affected(),
            "Redaction recorded"
        );
        Ok(result.rows_affected())
    }

    async fn mark_deleted(&self, uuid: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query(MARK_DELETED)
            .bind(at)
            .bind(at)
            .bind(uuid.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("mark message deleted", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn count_by_day_and_status(
        &self,
        query: &StatusCountQuery,
        options: QueryOptions,
    ) -> Result<Vec<StatusCount>, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT DATE(created) AS day, status, COUNT(*) AS count FROM message WHERE created >= ",
        );
        builder.push_bind(query.start);
        builder.push(" AND created <= ").push_bind(query.end);
        push_deleted_clause(&mut builder, options);

        if let Some(trustomer_code) = &query.trustomer_code {
            builder.push(" AND trustomer_code = ").push_bind(trustomer_code.as_str());
        }
        if let Some(product_name) = &query.product_name {
            builder.push(" AND product_name = ").push_bind(product_name.as_str());
        }
        builder.push(" GROUP BY DATE(created), status ORDER BY day");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("count messages by day and status", e))?;

        rows.iter()
            .map(|row| {
                Ok(StatusCount {
                    day: row
                        .try_get::<NaiveDate, _>("day")
                        .map_err(|e| db_error("day", e))?,
                    status: row.try_get("status").map_err(|e| db_error("status", e))?,
                    count: row.try_get("count").map_err(|e| db_error("count", e))?,
                })
            })
            .collect()
    }
}
