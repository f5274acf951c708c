use super::*;
use crate::config::AdminConfig;
use crate::error::AdminErrorKind;
use crate::models::{Album, Author, Song};
use crate::notify::{NotificationKind, Notifications};
use crate::protocol::HttpMethod;
use crate::transport::{MockTransport, TransportError};
use serde_json::json;
use std::cell::Cell;

const BASE: &str = "http://api.test";

fn api() -> AdminApi<MockTransport> {
    AdminApi::new(AdminConfig::new(BASE), MockTransport::new())
}

fn author(id: &str, name: &str) -> Author {
    Author {
        id: id.to_string(),
        name: name.to_string(),
        image_url: None,
    }
}

fn populated(ids: &[&str]) -> CachedCollection<Author> {
    let mut cache = CachedCollection::new();
    assert_eq!(cache.begin(), CacheRead::Fetch);
    let items: Vec<Author> = ids.iter().map(|id| author(id, &id.to_uppercase())).collect();
    assert!(cache.complete(Ok(items)).is_none());
    cache
}

fn ids(cache: &CachedCollection<Author>) -> Vec<&str> {
    cache.items().iter().map(|a| a.id.as_str()).collect()
}

// =========================================================
// 状态机
// =========================================================

#[test]
fn begin_moves_through_states() {
    let mut cache = CachedCollection::<Song>::new();
    assert_eq!(cache.state(), &CacheState::Uninitialized);
    assert_eq!(cache.kind(), ResourceKind::Song);

    assert_eq!(cache.begin(), CacheRead::Fetch);
    assert!(cache.is_loading());
    assert_eq!(cache.begin(), CacheRead::Pending);

    cache.complete(Ok(Vec::new()));
    assert!(cache.is_populated());
    assert_eq!(cache.begin(), CacheRead::Ready(Vec::new()));
}

#[tokio::test]
async fn second_request_uses_cache() {
    let api = api();
    let url = format!("{}/album/get-album", BASE);
    api.transport().mock_response(
        HttpMethod::Get,
        &url,
        200,
        json!({ "songs": [{ "_id": "a1", "albumName": "Alb1" }] }),
    );

    let mut cache = CachedCollection::<Album>::new();
    let first = cache.request(|| api.list::<Album>()).await.unwrap().to_vec();
    let second = cache.request(|| api.list::<Album>()).await.unwrap().to_vec();

    assert_eq!(first, second);
    assert_eq!(first[0].name, "Alb1");
    assert_eq!(api.transport().count_for(HttpMethod::Get, &url), 1);
}

#[tokio::test]
async fn failed_fetch_settles_empty_without_retry() {
    let api = api();
    let url = format!("{}/song/get-song", BASE);
    api.transport()
        .mock_failure(HttpMethod::Get, &url, TransportError::Network("offline".into()));

    let mut cache = CachedCollection::<Song>::new();
    let err = cache.request(|| api.list::<Song>()).await.unwrap_err();
    assert_eq!(err.kind, AdminErrorKind::Network);
    assert!(cache.is_populated());

    let again = cache.request(|| api.list::<Song>()).await.unwrap();
    assert!(again.is_empty());
    assert_eq!(api.transport().request_count(), 1);
}

#[tokio::test]
async fn request_on_populated_cache_never_calls_fetch() {
    let mut cache = populated(&["a", "b"]);
    let calls = Cell::new(0);

    let items = cache
        .request(|| {
            calls.set(calls.get() + 1);
            async { Ok(Vec::new()) }
        })
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(calls.get(), 0);
}

// =========================================================
// 删除与失效
// =========================================================

#[test]
fn invalidate_removes_only_matching_entry() {
    let mut cache = populated(&["a", "b", "c", "d"]);
    assert!(cache.invalidate_one("c"));
    assert_eq!(ids(&cache), vec!["a", "b", "d"]);
}

#[test]
fn invalidate_absent_id_is_noop() {
    let mut cache = populated(&["a", "b"]);
    assert!(!cache.invalidate_one("zzz"));
    assert_eq!(ids(&cache), vec!["a", "b"]);

    let mut empty = CachedCollection::<Author>::new();
    assert!(!empty.invalidate_one("a"));
    assert_eq!(empty.state(), &CacheState::Uninitialized);
}

#[test]
fn duplicate_ids_collapse_on_populate() {
    let cache = populated(&["a", "b", "a", "c", "b"]);
    assert_eq!(ids(&cache), vec!["a", "b", "c"]);
}

#[test]
fn late_response_after_reset_is_dropped() {
    let mut cache = CachedCollection::<Author>::new();
    assert_eq!(cache.begin(), CacheRead::Fetch);
    cache.reset();

    assert!(cache.complete(Ok(vec![author("a", "A")])).is_none());
    assert_eq!(cache.state(), &CacheState::Uninitialized);
}

#[test]
fn delete_racing_listing_leaves_no_duplicates() {
    // 删除在列表响应到达前完成：未填充的缓存无可移除，随后到达的响应覆盖
    let mut cache = CachedCollection::<Author>::new();
    assert_eq!(cache.begin(), CacheRead::Fetch);
    assert!(!cache.invalidate_one("a"));
    cache.complete(Ok(vec![author("a", "A"), author("b", "B"), author("a", "A")]));
    assert_eq!(ids(&cache), vec!["a", "b"]);
}

#[tokio::test]
async fn delete_success_invalidates_and_notifies() {
    let api = api();
    api.transport().mock_response(
        HttpMethod::Delete,
        &format!("{}/author/delete-author/b", BASE),
        200,
        json!({ "message": "deleted" }),
    );
    let notes = Notifications::new();
    let mut cache = populated(&["a", "b", "c"]);

    cache.delete(&api, "b", &notes).await.unwrap();

    assert_eq!(ids(&cache), vec!["a", "c"]);
    let note = notes.last().unwrap();
    assert_eq!(note.kind, NotificationKind::Success);
    assert_eq!(note.message, "B deleted successfully!");
}

#[tokio::test]
async fn delete_failure_keeps_cache() {
    let api = api();
    api.transport().mock_response(
        HttpMethod::Delete,
        &format!("{}/author/delete-author/b", BASE),
        500,
        json!({ "error": "boom" }),
    );
    let notes = Notifications::new();
    let mut cache = populated(&["a", "b"]);

    assert!(cache.delete(&api, "b", &notes).await.is_err());
    assert_eq!(ids(&cache), vec!["a", "b"]);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes.last().unwrap().message, "Failed to delete author.");
}

#[tokio::test]
async fn delete_transport_failure_uses_its_own_text() {
    let api = api();
    api.transport().mock_failure(
        HttpMethod::Delete,
        &format!("{}/author/delete-author/b", BASE),
        TransportError::Network("offline".into()),
    );
    let notes = Notifications::new();
    let mut cache = populated(&["a", "b"]);

    assert!(cache.delete(&api, "b", &notes).await.is_err());
    assert_eq!(ids(&cache), vec!["a", "b"]);
    assert_eq!(notes.len(), 1);
    assert_eq!(
        notes.last().unwrap().message,
        "An error occurred while deleting the author."
    );
}

#[test]
fn delete_timeout_counts_as_transport_failure() {
    let mut cache = populated(&["a"]);
    let note = cache.apply_delete("a", "A", &Err(AdminError::timeout()));
    assert!(note.is_error());
    assert_eq!(note.message, "An error occurred while deleting the author.");
    assert_eq!(ids(&cache), vec!["a"]);
}

#[test]
fn edit_is_a_placeholder() {
    let note = edit_placeholder("Alb1");
    assert_eq!(note.kind, NotificationKind::Info);
    assert_eq!(note.message, "Edit Alb1");
}
