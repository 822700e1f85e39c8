//! Query building blocks shared by every repository implementation.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::{Message, TERMINAL_STATUSES};

/// Options applied to every read path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Include soft-deleted messages
    pub include_deleted: bool,
}

impl QueryOptions {
    pub fn with_deleted() -> Self {
        Self {
            include_deleted: true,
        }
    }

    /// Whether a message is visible under these options
    pub fn admits(&self, message: &Message) -> bool {
        self.include_deleted || !message.is_deleted()
    }
}

/// Status predicate for message queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    Any,
    /// Status is one of the listed values
    In(Vec<String>),
    /// Status is null or not one of the listed values
    NotIn(Vec<String>),
}

impl StatusFilter {
    pub fn matches(&self, status: Option<&str>) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::In(values) => status.is_some_and(|s| values.iter().any(|v| v == s)),
            StatusFilter::NotIn(values) => status.map_or(true, |s| values.iter().all(|v| v != s)),
        }
    }
}

/// Filters combined with AND; `None` fields do not constrain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    pub trustomer_code: Option<String>,
    pub product_name: Option<String>,
    pub receiver: Option<String>,
    pub status: StatusFilter,
    /// Created strictly after this instant
    pub created_after: Option<DateTime<Utc>>,
    pub unredacted_only: bool,
    pub limit: Option<usize>,
}

impl MessageFilter {
    /// Messages still waiting for a terminal status
    pub fn pending_since(since: DateTime<Utc>) -> Self {
        Self {
            status: StatusFilter::NotIn(terminal_statuses()),
            created_after: Some(since),
            ..Default::default()
        }
    }

    /// Terminal messages whose body has not been redacted yet
    pub fn unredacted_terminal_since(since: DateTime<Utc>) -> Self {
        Self {
            status: StatusFilter::In(terminal_statuses()),
            created_after: Some(since),
            unredacted_only: true,
            ..Default::default()
        }
    }

    /// Evaluate the filter against one message, ignoring `limit`
    pub fn matches(&self, message: &Message) -> bool {
        let eq = |wanted: &Option<String>, actual: &str| wanted.as_deref().map_or(true, |w| w == actual);

        eq(&self.trustomer_code, &message.trustomer_code)
            && eq(&self.product_name, &message.product_name)
            && eq(&self.receiver, &message.receiver)
            && self.status.matches(message.status.as_deref())
            && self.created_after.map_or(true, |after| message.created > after)
            && (!self.unredacted_only || message.redacted.is_none())
    }
}

fn terminal_statuses() -> Vec<String> {
    TERMINAL_STATUSES.iter().map(|s| s.to_string()).collect()
}

/// Window and scope of a status count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCountQuery {
    /// Inclusive lower bound on `created`
    pub start: DateTime<Utc>,
    /// Inclusive upper bound on `created`
    pub end: DateTime<Utc>,
    pub trustomer_code: Option<String>,
    pub product_name: Option<String>,
}

impl StatusCountQuery {
    pub fn matches(&self, message: &Message) -> bool {
        message.created >= self.start
            && message.created <= self.end
            && self
                .trustomer_code
                .as_deref()
                .map_or(true, |t| t == message.trustomer_code)
            && self
                .product_name
                .as_deref()
                .map_or(true, |p| p == message.product_name)
    }
}

/// One row of a day/status aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub day: NaiveDate,
    pub status: Option<String>,
    pub count: i64,
}
