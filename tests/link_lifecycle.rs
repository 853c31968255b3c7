mod common;

use std::collections::HashSet;
use std::sync::Arc;
use ttl_shortener::application::services::{DEFAULT_STORE_TIMEOUT, LinkRegistry};
use ttl_shortener::domain::entities::NewLink;
use ttl_shortener::domain::repositories::LinkStore;
use ttl_shortener::error::AppError;
use ttl_shortener::infrastructure::persistence::MemoryLinkStore;

fn registry() -> (LinkRegistry, Arc<MemoryLinkStore>) {
    let store = Arc::new(MemoryLinkStore::new());
    let registry = LinkRegistry::new(store.clone() as Arc<dyn LinkStore>, DEFAULT_STORE_TIMEOUT);
    (registry, store)
}

fn new_link(url: &str, ttl_days: i64, custom_code: Option<&str>) -> NewLink {
    NewLink {
        original_url: url.to_string(),
        ttl_days,
        custom_code: custom_code.map(str::to_string),
    }
}

#[tokio::test]
async fn test_create_then_resolve_returns_destination() {
    let (registry, _store) = registry();

    let record = registry
        .create(new_link("https://example.com/a", 5, None))
        .await
        .unwrap();

    let url = registry.resolve(&record.short_code).await.unwrap();
    assert_eq!(url, "https://example.com/a");
}

#[tokio::test]
async fn test_generated_codes_differ() {
    let (registry, store) = registry();

    let mut codes = HashSet::new();
    for _ in 0..50 {
        let record = registry
            .create(new_link("https://example.com", 1, None))
            .await
            .unwrap();
        codes.insert(record.short_code);
    }

    assert_eq!(codes.len(), 50);
    assert_eq!(store.len(), 50);
}

#[tokio::test]
async fn test_custom_code_lifecycle() {
    let (registry, store) = registry();

    let first = registry
        .create(new_link("https://first.example", 1, Some("promo")))
        .await
        .unwrap();
    assert_eq!(first.short_code, "promo");

    let err = registry
        .create(new_link("https://second.example", 1, Some("promo")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::IdentifierTaken { .. }));

    // Expire the record, then claim the code again
    common::create_expired_link(&store, "promo", "https://first.example").await;

    let second = registry
        .create(new_link("https://second.example", 1, Some("promo")))
        .await
        .unwrap();
    assert_eq!(second.short_code, "promo");
    assert_eq!(
        registry.resolve("promo").await.unwrap(),
        "https://second.example"
    );
}

#[tokio::test]
async fn test_resolve_expired_deletes_record() {
    let (registry, store) = registry();
    common::create_expired_link(&store, "gone", "https://example.com").await;

    let err = registry.resolve("gone").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
    assert!(store.is_empty());

    // Second lookup behaves the same once the record is gone
    let err = registry.resolve("gone").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_inspect_does_not_delete_expired() {
    let (registry, store) = registry();
    common::create_expired_link(&store, "stale", "https://example.com").await;

    let record = registry.inspect("stale").await.unwrap().unwrap();

    assert!(record.is_expired());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_remove_deletes_live_link() {
    let (registry, store) = registry();
    common::create_test_link(&store, "live", "https://example.com", 10).await;

    registry.remove("live").await.unwrap();

    assert!(store.is_empty());
    assert!(matches!(
        registry.resolve("live").await.unwrap_err(),
        AppError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_destination_is_trimmed_but_not_normalized() {
    let (registry, _store) = registry();

    let record = registry
        .create(new_link("  HTTPS://Example.COM/Path?b=2&a=1  ", 1, None))
        .await
        .unwrap();

    assert_eq!(record.original_url, "HTTPS://Example.COM/Path?b=2&a=1");
    assert_eq!(
        registry.resolve(&record.short_code).await.unwrap(),
        "HTTPS://Example.COM/Path?b=2&a=1"
    );
}

#[tokio::test]
async fn test_concurrent_creates_all_resolve() {
    let (registry, _store) = registry();
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let registry = registry.clone();
            tokio::spawn(async move {
                registry
                    .create(new_link(&format!("https://example.com/{}", i), 1, None))
                    .await
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let record = handle.await.unwrap();
        assert_eq!(
            registry.resolve(&record.short_code).await.unwrap(),
            record.original_url
        );
    }
}
