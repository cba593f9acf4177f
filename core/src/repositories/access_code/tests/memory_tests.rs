//! Tests for the in-memory code store

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::access_code::AccessCode;
use crate::errors::StoreError;
use crate::repositories::access_code::{CodeStore, CodeTransaction, InMemoryCodeStore};

fn record(code: &str) -> AccessCode {
    AccessCode::new(code, Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
}

#[tokio::test]
async fn test_insert_rejects_duplicates_without_overwriting() {
    let store = InMemoryCodeStore::new();
    store.insert(&record("123456")).await.unwrap();

    let mut duplicate = record("123456");
    duplicate.created_at += Duration::hours(1);
    let result = store.insert(&duplicate).await;

    assert_eq!(result, Err(StoreError::AlreadyExists { code: "123456".into() }));
    let stored = store.find("123456").await.unwrap().unwrap();
    assert_eq!(stored, record("123456"));
}

#[tokio::test]
async fn test_delete_and_clear_report_missing_rows() {
    let store = InMemoryCodeStore::new();

    assert_eq!(
        store.delete("000000").await,
        Err(StoreError::NotFound { code: "000000".into() })
    );
    assert_eq!(
        store.clear_used_at("000000").await,
        Err(StoreError::NotFound { code: "000000".into() })
    );
}

#[tokio::test]
async fn test_list_is_ordered_by_code() {
    let store = InMemoryCodeStore::new();
    for code in ["333333", "111111", "222222"] {
        store.insert(&record(code)).await.unwrap();
    }

    let codes: Vec<String> = store.list().await.unwrap().into_iter().map(|r| r.code).collect();
    assert_eq!(codes, vec!["111111", "222222", "333333"]);
}

#[tokio::test]
async fn test_transaction_commit_applies_mark_used() {
    let store = InMemoryCodeStore::new();
    store.insert(&record("123456")).await.unwrap();
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 5, 0).unwrap();

    let mut tx = store.begin().await.unwrap();
    tx.mark_used("123456", at).await.unwrap();
    let seen = tx.fetch_for_update("123456").await.unwrap().unwrap();
    assert_eq!(seen.used_at, Some(at));
    tx.commit().await.unwrap();

    let stored = store.find("123456").await.unwrap().unwrap();
    assert_eq!(stored.used_at, Some(at));
}

#[tokio::test]
async fn test_transaction_rollback_and_drop_discard_writes() {
    let store = InMemoryCodeStore::new();
    store.insert(&record("123456")).await.unwrap();
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 5, 0).unwrap();

    let mut tx = store.begin().await.unwrap();
    tx.mark_used("123456", at).await.unwrap();
    tx.rollback().await.unwrap();
    assert!(store.find("123456").await.unwrap().unwrap().used_at.is_none());

    {
        let mut tx = store.begin().await.unwrap();
        tx.mark_used("123456", at).await.unwrap();
    }
    assert!(store.find("123456").await.unwrap().unwrap().used_at.is_none());
}

#[tokio::test]
async fn test_transaction_blocks_other_callers() {
    let store = Arc::new(InMemoryCodeStore::new());
    store.insert(&record("123456")).await.unwrap();

    let tx = store.begin().await.unwrap();
    let blocked = tokio::time::timeout(StdDuration::from_millis(50), store.begin()).await;
    assert!(blocked.is_err());

    tx.commit().await.unwrap();
    assert!(store.begin().await.is_ok());
}

#[tokio::test]
async fn test_delete_created_before() {
    let store = InMemoryCodeStore::new();
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
    store.insert(&AccessCode::new("111111", now - Duration::hours(25))).await.unwrap();
    store.insert(&AccessCode::new("222222", now - Duration::hours(1))).await.unwrap();

    let deleted = store.delete_created_before(now - Duration::hours(24)).await.unwrap();

    assert_eq!(deleted, 1);
    assert!(store.find("111111").await.unwrap().is_none());
    assert!(store.find("222222").await.unwrap().is_some());
}

#[tokio::test]
async fn test_unavailable_store_fails_every_call() {
    let store = InMemoryCodeStore::new();
    store.set_unavailable(true);

    assert!(matches!(store.find("123456").await, Err(StoreError::Unavailable { .. })));
    assert!(matches!(store.begin().await, Err(StoreError::Unavailable { .. })));
    assert!(matches!(store.list().await, Err(StoreError::Unavailable { .. })));

    store.set_unavailable(false);
    assert_eq!(store.find("123456").await, Ok(None));
}
