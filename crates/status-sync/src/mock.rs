//! Mock ResourceStore for unit testing
//!
//! Keeps resources in memory, assigns monotonically increasing resource
//! versions and rejects writes based on a stale version, like the API server.
//! Failures can be scripted to exercise the retry paths of the updater.

use crate::error::StoreError;
use crate::store::ResourceStore;
use crds::StatusResource;
use kube::ResourceExt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
struct MockState<K> {
    objects: HashMap<(String, String), K>,
    next_version: u64,
    failing_writes: u32,
    interleaved_writes: u32,
    fetch_error: Option<String>,
    observe_writes: bool,
}

/// In-memory store for testing
#[derive(Debug, Clone)]
pub struct MockStore<K> {
    state: Arc<Mutex<MockState<K>>>,
    get_calls: Arc<AtomicUsize>,
    update_calls: Arc<AtomicUsize>,
}

impl<K: StatusResource> Default for MockStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StatusResource> MockStore<K> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                objects: HashMap::new(),
                next_version: 1,
                failing_writes: 0,
                interleaved_writes: 0,
                fetch_error: None,
                observe_writes: true,
            })),
            get_calls: Arc::new(AtomicUsize::new(0)),
            update_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn key(namespace: &str, name: &str) -> (String, String) {
        (namespace.to_string(), name.to_string())
    }

    /// Add a resource (for test setup), assigning it a fresh resource version
    pub fn insert(&self, mut object: K) -> K {
        let mut state = self.state.lock();
        object.meta_mut().resource_version = Some(state.next_version.to_string());
        state.next_version += 1;
        let key = Self::key(&object.namespace().unwrap_or_default(), &object.name_any());
        state.objects.insert(key, object.clone());
        object
    }

    /// Delete a resource
    pub fn remove(&self, namespace: &str, name: &str) -> Option<K> {
        self.state.lock().objects.remove(&Self::key(namespace, name))
    }

    /// Current persisted copy of a resource
    pub fn object(&self, namespace: &str, name: &str) -> Option<K> {
        self.state.lock().objects.get(&Self::key(namespace, name)).cloned()
    }

    /// Fail the next `count` status writes with [`StoreError::Unavailable`]
    pub fn fail_next_writes(&self, count: u32) {
        self.state.lock().failing_writes = count;
    }

    /// Let another writer bump the resource version just before each of the
    /// next `count` status writes, so those writes fail with [`StoreError::Conflict`]
    pub fn interleave_next_writes(&self, count: u32) {
        self.state.lock().interleaved_writes = count;
    }

    /// Fail every fetch with [`StoreError::Unavailable`] until cleared with `None`
    pub fn set_fetch_error(&self, message: Option<&str>) {
        self.state.lock().fetch_error = message.map(str::to_string);
    }

    /// When false, writes are persisted without bumping the resource version,
    /// so a read-after-write sees the pre-write version
    pub fn set_observe_writes(&self, observe: bool) {
        self.state.lock().observe_writes = observe;
    }

    /// Number of `get` calls so far
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Number of `update_status` calls so far
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl<K: StatusResource> ResourceStore<K> for MockStore<K> {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<K>, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        if let Some(message) = &state.fetch_error {
            return Err(StoreError::Unavailable(message.clone()));
        }
        Ok(state.objects.get(&Self::key(namespace, name)).cloned())
    }

    async fn update_status(&self, resource: &K) -> Result<(), StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.failing_writes > 0 {
            state.failing_writes -= 1;
            return Err(StoreError::Unavailable("scripted write failure".to_string()));
        }

        let key = Self::key(&resource.namespace().unwrap_or_default(), &resource.name_any());
        let Some(stored) = state.objects.get_mut(&key) else {
            return Err(StoreError::Unavailable(format!("{}/{} not found", key.0, key.1)));
        };
        if state.interleaved_writes > 0 {
            state.interleaved_writes -= 1;
            stored.meta_mut().resource_version = Some(state.next_version.to_string());
            state.next_version += 1;
        }

        let expected = resource.resource_version().unwrap_or_default();
        let actual = stored.resource_version().unwrap_or_default();
        if expected != actual {
            return Err(StoreError::Conflict { expected, actual });
        }

        stored.replace_status(resource.status().cloned().unwrap_or_default());
        if state.observe_writes {
            stored.meta_mut().resource_version = Some(state.next_version.to_string());
            state.next_version += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::ClickHouseInstallation;

    fn chi(name: &str) -> ClickHouseInstallation {
        let mut chi = ClickHouseInstallation::new(name, Default::default());
        chi.metadata.namespace = Some("prod".to_string());
        chi
    }

    #[tokio::test]
    async fn test_stale_write_conflicts() {
        let store = MockStore::new();
        let stored = store.insert(chi("demo"));

        let mut stale = stored.clone();
        stale.metadata.resource_version = Some("0".to_string());
        let err = store.update_status(&stale).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        store.update_status(&stored).await.unwrap();
        let current = store.object("prod", "demo").unwrap();
        assert_ne!(current.resource_version(), stored.resource_version());
    }

    #[tokio::test]
    async fn test_interleaved_write_conflicts_once() {
        let store = MockStore::new();
        let stored = store.insert(chi("demo"));
        store.interleave_next_writes(1);

        let err = store.update_status(&stored).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        let fresh = store.object("prod", "demo").unwrap();
        assert_ne!(fresh.resource_version(), stored.resource_version());
        store.update_status(&fresh).await.unwrap();
    }

    #[tokio::test]
    async fn test_scripted_failures_and_counters() {
        let store = MockStore::new();
        let stored = store.insert(chi("demo"));
        store.fail_next_writes(1);

        assert!(store.update_status(&stored).await.is_err());
        assert!(store.update_status(&stored).await.is_ok());
        assert_eq!(store.update_calls(), 2);

        store.set_fetch_error(Some("down"));
        assert!(store.get("prod", "demo").await.is_err());
        store.set_fetch_error(None);
        assert!(store.get("prod", "missing").await.unwrap().is_none());
        assert_eq!(store.get_calls(), 2);
    }
}
