//! Unit tests for StatusUpdater::synchronize

use crate::{MockStore, StatusUpdater, StoreError, SyncConfig, SyncError, UpdateStatusOptions};
use crds::{ClickHouseInstallation, CopyStatusOptions, StatusResource};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::ResourceExt;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn create_test_chi(name: &str, namespace: &str) -> ClickHouseInstallation {
    ClickHouseInstallation {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Default::default(),
        status: None,
    }
}

/// Store holding `prod/demo`, plus a local copy carrying one pushed action
fn setup() -> (MockStore<ClickHouseInstallation>, ClickHouseInstallation) {
    let store = MockStore::new();
    let mut local = store.insert(create_test_chi("demo", "prod"));
    local.ensure_status().push_action("2024-01-01 reconcile started");
    (store, local)
}

fn updater(store: &MockStore<ClickHouseInstallation>, max_attempts: u32) -> StatusUpdater<MockStore<ClickHouseInstallation>> {
    StatusUpdater::with_config(
        store.clone(),
        SyncConfig {
            max_attempts,
            retry_interval: Duration::from_secs(1),
        },
    )
}

fn actions() -> UpdateStatusOptions {
    UpdateStatusOptions::new(CopyStatusOptions::actions())
}

#[test]
fn test_default_retry_policy() {
    let config = SyncConfig::default();
    assert_eq!(config.max_attempts, 60);
    assert_eq!(config.retry_interval, Duration::from_secs(1));
}

#[tokio::test]
async fn test_synchronize_writes_merged_status_and_propagates_version() {
    let (store, mut local) = setup();
    let persisted = store.object("prod", "demo").unwrap();
    let mut seeded = persisted.clone();
    seeded.ensure_status().push_error("2024-01-01 earlier failure");
    store.insert(seeded);

    updater(&store, 3)
        .synchronize(&CancellationToken::new(), &mut local, actions())
        .await
        .unwrap();

    let stored = store.object("prod", "demo").unwrap();
    assert_eq!(stored.status_or_empty().actions(), vec!["2024-01-01 reconcile started"]);
    // Groups outside the policy keep their persisted values.
    assert_eq!(stored.status_or_empty().errors(), vec!["2024-01-01 earlier failure"]);
    assert_eq!(local.resource_version(), stored.resource_version());
    assert_eq!(store.update_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_synchronize_retries_failed_writes_at_fixed_interval() {
    let (store, mut local) = setup();
    store.fail_next_writes(3);
    let start = Instant::now();

    updater(&store, 60)
        .synchronize(&CancellationToken::new(), &mut local, actions())
        .await
        .unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(3), "slept {elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "slept {elapsed:?}");
    assert_eq!(store.update_calls(), 4);
    // One fetch per attempt plus the read-after-write.
    assert_eq!(store.get_calls(), 5);
    assert_eq!(
        store.object("prod", "demo").unwrap().status_or_empty().actions(),
        vec!["2024-01-01 reconcile started"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_synchronize_refetches_after_write_conflicts() {
    let (store, mut local) = setup();
    // Another writer records an error between our fetch and write, three times over.
    let mut concurrent = store.object("prod", "demo").unwrap();
    concurrent.ensure_status().push_error("2024-01-01 host failed");
    store.insert(concurrent);
    store.interleave_next_writes(3);
    let start = Instant::now();

    updater(&store, 60)
        .synchronize(&CancellationToken::new(), &mut local, actions())
        .await
        .unwrap();

    assert!(start.elapsed() >= Duration::from_secs(3));
    assert_eq!(store.update_calls(), 4);
    assert_eq!(store.get_calls(), 5);
    let stored = store.object("prod", "demo").unwrap();
    assert_eq!(stored.status_or_empty().actions(), vec!["2024-01-01 reconcile started"]);
    assert_eq!(stored.status_or_empty().errors(), vec!["2024-01-01 host failed"]);
    assert_eq!(local.resource_version(), stored.resource_version());
}

#[tokio::test]
async fn test_synchronize_with_cancelled_token_does_nothing() {
    let (store, mut local) = setup();
    let token = CancellationToken::new();
    token.cancel();

    updater(&store, 3).synchronize(&token, &mut local, actions()).await.unwrap();

    assert_eq!(store.get_calls(), 0);
    assert_eq!(store.update_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_synchronize_stops_at_next_attempt_after_cancellation() {
    let (store, mut local) = setup();
    store.fail_next_writes(10);
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        canceller.cancel();
    });

    updater(&store, 60).synchronize(&token, &mut local, actions()).await.unwrap();

    assert_eq!(store.update_calls(), 1);
}

#[tokio::test]
async fn test_unobserved_write_is_accepted_anomaly() {
    let (store, mut local) = setup();
    store.set_observe_writes(false);
    let version_before = local.resource_version();

    updater(&store, 3)
        .synchronize(&CancellationToken::new(), &mut local, actions())
        .await
        .unwrap();

    // The write landed but the read-after-write still shows the old version.
    assert_eq!(local.resource_version(), version_before);
    assert_eq!(
        store.object("prod", "demo").unwrap().status_or_empty().actions(),
        vec!["2024-01-01 reconcile started"]
    );
    assert_eq!(store.update_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_synchronize_exhausts_attempts() {
    let (store, mut local) = setup();
    store.fail_next_writes(100);
    let start = Instant::now();

    let err = updater(&store, 3)
        .synchronize(&CancellationToken::new(), &mut local, actions())
        .await
        .unwrap_err();

    match err {
        SyncError::Exhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(source, StoreError::Unavailable(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.update_calls(), 3);
    // No sleep after the final attempt.
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_fetch_error_is_not_retried() {
    let (store, mut local) = setup();
    store.set_fetch_error(Some("connection refused"));

    let err = updater(&store, 60)
        .synchronize(&CancellationToken::new(), &mut local, actions())
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Fetch(StoreError::Unavailable(_))));
    assert_eq!(store.get_calls(), 1);
    assert_eq!(store.update_calls(), 0);
}

#[tokio::test]
async fn test_missing_resource_is_not_found() {
    let (store, mut local) = setup();
    store.remove("prod", "demo");

    let err = updater(&store, 3)
        .synchronize(&CancellationToken::new(), &mut local, actions())
        .await
        .unwrap_err();

    match err {
        SyncError::NotFound { namespace, name } => {
            assert_eq!(namespace, "prod");
            assert_eq!(name, "demo");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_tolerated_absence_succeeds_silently() {
    let (store, mut local) = setup();
    store.remove("prod", "demo");
    let opts = actions().tolerating_absence();

    updater(&store, 3)
        .synchronize(&CancellationToken::new(), &mut local, opts)
        .await
        .unwrap();
    assert_eq!(store.update_calls(), 0);

    store.set_fetch_error(Some("connection refused"));
    updater(&store, 3)
        .synchronize(&CancellationToken::new(), &mut local, opts)
        .await
        .unwrap();
    assert_eq!(store.update_calls(), 0);
}

#[tokio::test]
async fn test_resource_without_namespace_is_invalid() {
    let store = MockStore::new();
    let mut local = ClickHouseInstallation::new("demo", Default::default());

    let err = updater(&store, 3)
        .synchronize(&CancellationToken::new(), &mut local, actions())
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::InvalidResource(_)));
    assert_eq!(store.get_calls(), 0);
}
