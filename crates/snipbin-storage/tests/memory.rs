use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use jiff::Timestamp;
use uuid::Uuid;

use snipbin_core::models::request::ListParams;
use snipbin_core::models::snippet::{NewSnippet, SnippetChanges};
use snipbin_core::query::QueryBuilder;
use snipbin_storage::{Clock, MemoryRepository, SnippetRepository};

fn ticking_clock(start: i64) -> Clock {
    let secs = Arc::new(AtomicI64::new(start));
    Arc::new(move || Timestamp::from_second(secs.fetch_add(1, Ordering::SeqCst)).unwrap())
}

fn new_snippet(title: &str) -> NewSnippet {
    NewSnippet {
        title: title.to_string(),
        code: "ZW5jb2RlZA==".to_string(),
        language: "rust".to_string(),
        tags: vec!["demo".to_string()],
        expires_at: None,
    }
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() {
    let repo = MemoryRepository::with_clock(ticking_clock(1_000));
    let stored = repo.create(new_snippet("one")).await.unwrap();

    assert_eq!(stored.title, "one");
    assert_eq!(stored.code, "ZW5jb2RlZA==");
    assert_eq!(stored.created_at, Timestamp::from_second(1_000).unwrap());
    assert_eq!(stored.created_at, stored.updated_at);
    assert!(stored.versions.is_none());

    let fetched = repo.find_by_id(stored.id).await.unwrap().unwrap();
    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn ids_are_unique() {
    let repo = MemoryRepository::new();
    let a = repo.create(new_snippet("a")).await.unwrap();
    let b = repo.create(new_snippet("b")).await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn find_many_keeps_insertion_order_and_pages() {
    let repo = MemoryRepository::with_clock(ticking_clock(0));
    for i in 1..=25 {
        repo.create(new_snippet(&format!("s{i}"))).await.unwrap();
    }

    let params = ListParams {
        page: Some("2".into()),
        limit: Some("10".into()),
        ..ListParams::default()
    };
    let query = QueryBuilder::new().build(&params, Timestamp::from_second(10_000).unwrap());
    let titles: Vec<String> = repo
        .find_many(&query)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();

    let expected: Vec<String> = (11..=20).map(|i| format!("s{i}")).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let repo = MemoryRepository::with_clock(ticking_clock(100));
    let stored = repo.create(new_snippet("old")).await.unwrap();

    let changes = SnippetChanges {
        title: Some("new".to_string()),
        ..SnippetChanges::default()
    };
    let updated = repo.update_by_id(stored.id, changes).await.unwrap().unwrap();

    assert_eq!(updated.title, "new");
    assert_eq!(updated.code, stored.code);
    assert_eq!(updated.language, stored.language);
    assert_eq!(updated.tags, stored.tags);
    assert_eq!(updated.expires_at, stored.expires_at);
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at > stored.updated_at);
}

#[tokio::test]
async fn missing_ids_report_none() {
    let repo = MemoryRepository::new();
    let id = Uuid::now_v7();
    assert!(repo.find_by_id(id).await.unwrap().is_none());
    assert!(
        repo.update_by_id(id, SnippetChanges::default())
            .await
            .unwrap()
            .is_none()
    );
    assert!(repo.delete_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_removes_record() {
    let repo = MemoryRepository::new();
    let stored = repo.create(new_snippet("gone")).await.unwrap();

    let removed = repo.delete_by_id(stored.id).await.unwrap().unwrap();
    assert_eq!(removed.id, stored.id);
    assert!(repo.find_by_id(stored.id).await.unwrap().is_none());
    assert!(repo.is_empty().await);
}
