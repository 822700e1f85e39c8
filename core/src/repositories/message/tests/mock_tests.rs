//! Unit tests for the in-memory message repository

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::Message;
use crate::domain::value_objects::{NewMessage, SentMessage};
use crate::errors::DomainError;
use crate::repositories::message::{
    InMemoryMessageRepository, MessageFilter, MessageRepository, QueryOptions, StatusCountQuery,
    StatusFilter,
};

fn message(receiver: &str, trustomer: &str, status: Option<&str>) -> Message {
    Message::new(
        NewMessage {
            sender: "GDm-Health".to_string(),
            receiver: receiver.to_string(),
            content: "hello".to_string(),
            trustomer_code: trustomer.to_string(),
            product_name: "gdm".to_string(),
        },
        SentMessage {
            provider_message_id: format!("SM{}", uuid::Uuid::new_v4().simple()),
            status: status.map(str::to_string),
            date_sent: None,
            error_code: None,
            error_message: None,
        },
    )
}

#[tokio::test]
async fn test_insert_and_find_by_uuid() {
    let repo = InMemoryMessageRepository::new();
    let msg = message("+447400123456", "tenant-a", Some("queued"));

    repo.insert(msg.clone()).await.unwrap();

    let found = repo.find_by_uuid(msg.uuid, QueryOptions::default()).await.unwrap();
    assert_eq!(found, Some(msg.clone()));

    let duplicate = repo.insert(msg).await;
    assert!(matches!(duplicate, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_deleted_messages_hidden_unless_requested() {
    let repo = InMemoryMessageRepository::new();
    let mut msg = message("+447400123456", "tenant-a", Some("queued"));
    msg.mark_deleted(Utc::now());
    repo.seed(msg.clone()).await;

    assert!(repo
        .find_by_uuid(msg.uuid, QueryOptions::default())
        .await
        .unwrap()
        .is_none());
    assert!(repo
        .find_by_uuid(msg.uuid, QueryOptions::with_deleted())
        .await
        .unwrap()
        .is_some());
    assert!(repo
        .find_by_provider_message_id(&msg.provider_message_id, QueryOptions::default())
        .await
        .unwrap()
        .is_none());
    assert!(repo
        .find(&MessageFilter::default(), QueryOptions::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_find_filters_orders_and_limits() {
    let repo = InMemoryMessageRepository::new();
    let base = Utc::now() - Duration::hours(5);

    for i in 0..4 {
        let mut msg = message("+447400123456", "tenant-a", Some("sent"));
        msg.created = base + Duration::hours(i);
        repo.seed(msg).await;
    }
    repo.seed(message("+447400999999", "tenant-a", Some("sent"))).await;

    let filter = MessageFilter {
        receiver: Some("+447400123456".to_string()),
        limit: Some(2),
        ..Default::default()
    };
    let found = repo.find(&filter, QueryOptions::default()).await.unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|m| m.receiver == "+447400123456"));
    assert!(found[0].created > found[1].created);
    assert_eq!(found[0].created, base + Duration::hours(3));
}

#[tokio::test]
async fn test_status_filter_not_in_includes_null_status() {
    let repo = InMemoryMessageRepository::new();
    repo.seed(message("+447400123456", "tenant-a", None)).await;
    repo.seed(message("+447400123456", "tenant-a", Some("queued"))).await;
    repo.seed(message("+447400123456", "tenant-a", Some("delivered"))).await;

    let filter = MessageFilter::pending_since(Utc::now() - Duration::days(7));
    let pending = repo.find(&filter, QueryOptions::default()).await.unwrap();
    assert_eq!(pending.len(), 2);

    let filter = MessageFilter {
        status: StatusFilter::In(vec!["delivered".to_string()]),
        ..Default::default()
    };
    assert_eq!(repo.find(&filter, QueryOptions::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_statuses_is_all_or_nothing() {
    let repo = InMemoryMessageRepository::new();
    let mut stored = message("+447400123456", "tenant-a", Some("queued"));
    repo.seed(stored.clone()).await;
    let unknown = message("+447400123456", "tenant-a", Some("queued"));

    stored.status = Some("sent".to_string());
    let result = repo.update_statuses(&[stored.clone(), unknown]).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
    let snapshot = repo.snapshot(stored.uuid).await.unwrap();
    assert_eq!(snapshot.status.as_deref(), Some("queued"));
}

#[tokio::test]
async fn test_update_status_leaves_markers_alone() {
    let repo = InMemoryMessageRepository::new();
    let stale = message("+447400123456", "tenant-a", Some("queued"));
    repo.seed(stale.clone()).await;

    let deleted_at = Utc::now() - Duration::minutes(5);
    assert!(repo.mark_deleted(stale.uuid, deleted_at).await.unwrap());
    assert_eq!(repo.mark_redacted(&[stale.uuid], deleted_at).await.unwrap(), 1);

    let mut update = stale.clone();
    update.status = Some("delivered".to_string());
    update.error_code = Some("30003".to_string());
    repo.update_status(&update).await.unwrap();

    let snapshot = repo.snapshot(stale.uuid).await.unwrap();
    assert_eq!(snapshot.status.as_deref(), Some("delivered"));
    assert_eq!(snapshot.error_code.as_deref(), Some("30003"));
    assert_eq!(snapshot.deleted, Some(deleted_at));
    assert_eq!(snapshot.redacted, Some(deleted_at));
}

#[tokio::test]
async fn test_markers_are_set_once() {
    let repo = InMemoryMessageRepository::new();
    let msg = message("+447400123456", "tenant-a", Some("delivered"));
    repo.seed(msg.clone()).await;
    let first = Utc::now() - Duration::hours(1);
    let second = Utc::now();

    assert_eq!(repo.mark_redacted(&[msg.uuid], first).await.unwrap(), 1);
    assert_eq!(repo.mark_redacted(&[msg.uuid], second).await.unwrap(), 0);
    assert!(repo.mark_deleted(msg.uuid, first).await.unwrap());
    assert!(!repo.mark_deleted(msg.uuid, second).await.unwrap());
    assert!(!repo.mark_deleted(uuid::Uuid::new_v4(), second).await.unwrap());

    let snapshot = repo.snapshot(msg.uuid).await.unwrap();
    assert_eq!(snapshot.redacted, Some(first));
    assert_eq!(snapshot.deleted, Some(first));
}

#[tokio::test]
async fn test_count_by_day_and_status() {
    let repo = InMemoryMessageRepository::new();
    let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2019, 11, d, h, 0, 0).unwrap();

    for (created, status) in [
        (day(14, 9), "Sent"),
        (day(14, 10), "Sent"),
        (day(14, 11), "Received"),
        (day(15, 8), "Read"),
        (day(20, 8), "Read"),
    ] {
        let mut msg = message("+447400123456", "tenant-a", Some(status));
        msg.created = created;
        repo.seed(msg).await;
    }
    let mut other = message("+447400123456", "tenant-b", Some("Sent"));
    other.created = day(14, 12);
    repo.seed(other).await;

    let query = StatusCountQuery {
        start: day(13, 0),
        end: day(16, 0),
        trustomer_code: Some("tenant-a".to_string()),
        product_name: None,
    };
    let counts = repo
        .count_by_day_and_status(&query, QueryOptions::default())
        .await
        .unwrap();

    assert_eq!(counts.len(), 3);
    let total: i64 = counts.iter().map(|c| c.count).sum();
    assert_eq!(total, 4);
}

#[tokio::test]
async fn test_failing_repository() {
    let repo = InMemoryMessageRepository::failing();
    let result = repo.insert(message("+447400123456", "tenant-a", None)).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
