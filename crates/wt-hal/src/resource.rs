//! The generic HAL resource proxy.
//!
//! Holds a raw document, derives the resource identifier, and implements
//! the lazy-load contract: at most one in-flight fetch per instance,
//! forced reloads discarding cached state, and deep-merge copies.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde_json::Value;
use wt_core::id_from_href;

use crate::error::HalError;
use crate::fetch::FetchBackend;
use crate::link::HalLink;

type LoadFuture = Shared<BoxFuture<'static, Result<Value, HalError>>>;

struct SourceState {
    source: Value,
    loaded: bool,
}

struct Inner {
    state: RwLock<SourceState>,
    inflight: Mutex<Option<LoadFuture>>,
    fetch: Option<Arc<dyn FetchBackend>>,
}

/// Generic proxy over a raw HAL document.
///
/// Cloning shares the proxy (and its load deduplication); use
/// [`HalResource::copy_with`] to derive an independent instance.
/// Equality is by self-link string, never by instance identity, since
/// copies and reloads produce distinct instances representing the same
/// logical resource.
#[derive(Clone)]
pub struct HalResource {
    inner: Arc<Inner>,
}

impl HalResource {
    /// Wrap a document that has not been fully loaded yet (e.g., a bare
    /// link with an empty body).
    #[must_use]
    pub fn new(source: Value, fetch: Option<Arc<dyn FetchBackend>>) -> Self {
        Self::build(source, false, fetch)
    }

    /// Wrap a document that already holds its full representation.
    #[must_use]
    pub fn from_loaded(source: Value, fetch: Option<Arc<dyn FetchBackend>>) -> Self {
        Self::build(source, true, fetch)
    }

    /// An empty resource shell around a self link.
    #[must_use]
    pub fn empty(self_href: Option<&str>, fetch: Option<Arc<dyn FetchBackend>>) -> Self {
        let href = self_href.map_or(Value::Null, |h| Value::String(h.to_string()));
        Self::new(
            serde_json::json!({ "_links": { "self": { "href": href } } }),
            fetch,
        )
    }

    fn build(source: Value, loaded: bool, fetch: Option<Arc<dyn FetchBackend>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(SourceState { source, loaded }),
                inflight: Mutex::new(None),
                fetch,
            }),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SourceState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SourceState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The resource identifier.
    ///
    /// Prefers an embedded `id` field (stringified); otherwise the purely
    /// numeric trailing segment of the self link. `None` is a valid
    /// outcome meaning "new/unpersisted", not an error.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        let state = self.read_state();
        match state.source.get("id") {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
        drop(state);
        self.self_href().as_deref().and_then(id_from_href)
    }

    /// The self-link href, if any.
    #[must_use]
    pub fn self_href(&self) -> Option<String> {
        let state = self.read_state();
        state
            .source
            .pointer("/_links/self/href")
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }

    /// Whether the full representation has been fetched or supplied.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.read_state().loaded
    }

    /// Deep copy of the raw source document.
    #[must_use]
    pub fn plain(&self) -> Value {
        self.read_state().source.clone()
    }

    /// Read a top-level property.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<Value> {
        self.read_state().source.get(key).cloned()
    }

    /// Write a top-level property. `Value::Null` removes the key so that
    /// "unset" and "never set" serialize identically.
    pub fn set_field(&self, key: &str, value: Value) {
        let mut state = self.write_state();
        let Some(object) = state.source.as_object_mut() else {
            return;
        };
        if value.is_null() {
            object.remove(key);
        } else {
            object.insert(key.to_string(), value);
        }
    }

    /// Read a named `_links` entry.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<HalLink> {
        let state = self.read_state();
        state
            .source
            .pointer(&format!("/_links/{name}"))
            .and_then(HalLink::from_value)
            .filter(|link| link.href.is_some())
    }

    /// Write (or remove) a named `_links` entry.
    pub fn set_link(&self, name: &str, link: Option<&HalLink>) {
        let value = link.map(|l| serde_json::to_value(l).unwrap_or(Value::Null));
        self.set_link_value(name, value);
    }

    /// Read a `_links` entry holding a list of links.
    #[must_use]
    pub fn link_list(&self, name: &str) -> Vec<HalLink> {
        let state = self.read_state();
        state
            .source
            .pointer(&format!("/_links/{name}"))
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(HalLink::from_value).collect())
            .unwrap_or_default()
    }

    /// Write (or remove) a `_links` entry holding a list of links.
    pub fn set_link_list(&self, name: &str, links: Option<&[HalLink]>) {
        let value =
            links.map(|ls| serde_json::to_value(ls).unwrap_or_else(|_| Value::Array(vec![])));
        self.set_link_value(name, value);
    }

    fn set_link_value(&self, name: &str, value: Option<Value>) {
        let mut state = self.write_state();
        if state.source.get("_links").is_none() {
            if let Some(object) = state.source.as_object_mut() {
                object.insert("_links".to_string(), Value::Object(serde_json::Map::new()));
            }
        }
        let Some(links) = state
            .source
            .get_mut("_links")
            .and_then(Value::as_object_mut)
        else {
            return;
        };
        match value {
            Some(v) => {
                links.insert(name.to_string(), v);
            }
            None => {
                links.remove(name);
            }
        }
    }

    /// Load the full representation of this resource.
    ///
    /// - not forced + already loaded: resolves immediately without a fetch
    /// - not forced + a load in flight: awaits the *same* shared fetch
    /// - forced: discards cached state and any in-flight fetch, then
    ///   issues a fresh one
    ///
    /// Failures propagate unchanged; the memoized future is dropped on
    /// completion either way, so a later unforced call after a failure
    /// fetches again.
    ///
    /// # Errors
    ///
    /// [`HalError::Detached`] without a backend, [`HalError::NoSelfLink`]
    /// without a self link, otherwise whatever the fetch produced.
    pub async fn load(&self, force: bool) -> Result<(), HalError> {
        if !force && self.is_loaded() {
            return Ok(());
        }

        let future = self.in_flight_or_start(force)?;
        let result = future.clone().await;

        // Drop the memoized future once it has settled. A concurrent
        // sharer may have done this already; only clear our own.
        {
            let mut inflight = self
                .inner
                .inflight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if inflight.as_ref().is_some_and(|f| f.ptr_eq(&future)) {
                *inflight = None;
            }
        }

        let source = result?;
        let mut state = self.write_state();
        state.source = source;
        state.loaded = true;
        Ok(())
    }

    fn in_flight_or_start(&self, force: bool) -> Result<LoadFuture, HalError> {
        let mut inflight = self
            .inner
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if force {
            *inflight = None;
            self.write_state().loaded = false;
        } else if let Some(future) = inflight.as_ref() {
            return Ok(future.clone());
        }

        let fetch = self.inner.fetch.clone().ok_or(HalError::Detached)?;
        let href = self.self_href().ok_or(HalError::NoSelfLink)?;
        tracing::debug!(%href, force, "starting resource load");

        let future: LoadFuture = async move { fetch.fetch(&href).await }.boxed().shared();
        *inflight = Some(future.clone());
        Ok(future)
    }

    /// Derive a new instance of the same kind by deep-merging `overrides`
    /// onto a deep copy of the raw source.
    ///
    /// The copy keeps the loaded flag and fetch backend but has its own
    /// load memoization; the original is untouched.
    #[must_use]
    pub fn copy_with(&self, overrides: Value) -> Self {
        let state = self.read_state();
        let mut source = state.source.clone();
        let loaded = state.loaded;
        drop(state);

        deep_merge(&mut source, overrides);
        Self::build(source, loaded, self.inner.fetch.clone())
    }
}

impl PartialEq for HalResource {
    /// Self-link equality. Two resources without self links are never
    /// considered the same logical resource.
    fn eq(&self, other: &Self) -> bool {
        match (self.self_href(), other.self_href()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Debug for HalResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HalResource")
            .field("href", &self.self_href())
            .field("id", &self.id())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Recursively merge `overrides` into `base`: objects merge key-wise,
/// everything else is replaced.
fn deep_merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Fetch backend that counts calls and blocks until released.
    struct GatedFetch {
        calls: AtomicUsize,
        gate: Notify,
        response: Value,
    }

    impl GatedFetch {
        fn new(response: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: Notify::new(),
                response,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl FetchBackend for GatedFetch {
        async fn fetch(&self, _href: &str) -> Result<Value, HalError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(self.response.clone())
        }
    }

    /// Fetch backend that answers immediately.
    struct ImmediateFetch {
        calls: AtomicUsize,
        response: Result<Value, HalError>,
    }

    impl ImmediateFetch {
        fn ok(response: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Ok(response),
            })
        }

        fn failing(err: HalError) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Err(err),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl FetchBackend for ImmediateFetch {
        async fn fetch(&self, _href: &str) -> Result<Value, HalError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn shell(href: &str, fetch: Arc<dyn FetchBackend>) -> HalResource {
        HalResource::empty(Some(href), Some(fetch))
    }

    #[test]
    fn id_prefers_embedded_field() {
        let res = HalResource::from_loaded(
            json!({ "id": 42, "_links": { "self": { "href": "/api/v3/work_packages/99" } } }),
            None,
        );
        assert_eq!(res.id(), Some("42".to_string()));
    }

    #[test]
    fn id_falls_back_to_numeric_self_link() {
        let res = HalResource::from_loaded(
            json!({ "_links": { "self": { "href": "/api/v3/work_packages/17" } } }),
            None,
        );
        assert_eq!(res.id(), Some("17".to_string()));
    }

    #[test]
    fn id_is_absent_for_non_numeric_trailer() {
        let res = HalResource::from_loaded(
            json!({ "_links": { "self": { "href": "/api/v3/work_packages/new" } } }),
            None,
        );
        assert_eq!(res.id(), None);
    }

    #[test]
    fn equality_is_by_self_link() {
        let a = HalResource::from_loaded(
            json!({ "_links": { "self": { "href": "/api/v3/queries/5" } }, "name": "a" }),
            None,
        );
        let b = HalResource::from_loaded(
            json!({ "_links": { "self": { "href": "/api/v3/queries/5" } }, "name": "b" }),
            None,
        );
        let c = HalResource::from_loaded(
            json!({ "_links": { "self": { "href": "/api/v3/queries/6" } } }),
            None,
        );
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(
            HalResource::empty(None, None),
            HalResource::empty(None, None)
        );
    }

    #[test]
    fn copy_with_merges_without_touching_original() {
        let original = HalResource::from_loaded(
            json!({
                "_links": { "self": { "href": "/api/v3/queries/5" } },
                "timelineVisible": false,
                "timelineLabels": { "farRight": "subject" }
            }),
            None,
        );
        let copy = original.copy_with(json!({
            "timelineVisible": true,
            "timelineLabels": { "left": "startDate" }
        }));

        assert_eq!(copy.field("timelineVisible"), Some(json!(true)));
        // Deep merge keeps untouched sibling keys.
        assert_eq!(
            copy.field("timelineLabels"),
            Some(json!({ "farRight": "subject", "left": "startDate" }))
        );
        assert_eq!(original.field("timelineVisible"), Some(json!(false)));
        assert!(copy.is_loaded());
        assert_eq!(copy, original);
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let fetch = GatedFetch::new(json!({
            "_links": { "self": { "href": "/api/v3/queries/5" } },
            "name": "loaded"
        }));
        let res = shell("/api/v3/queries/5", fetch.clone());

        let first = res.load(false);
        let second = res.load(false);
        let release = async {
            // Let both callers attach before releasing the gate.
            tokio::task::yield_now().await;
            fetch.gate.notify_waiters();
        };
        let (a, b, ()) = tokio::join!(first, second, release);

        a.unwrap();
        b.unwrap();
        assert_eq!(fetch.calls(), 1);
        assert!(res.is_loaded());
        assert_eq!(res.field("name"), Some(json!("loaded")));
    }

    #[tokio::test]
    async fn loaded_resource_resolves_without_fetch() {
        let fetch = ImmediateFetch::ok(json!({
            "_links": { "self": { "href": "/api/v3/queries/5" } }
        }));
        let res = shell("/api/v3/queries/5", fetch.clone());

        res.load(false).await.unwrap();
        res.load(false).await.unwrap();
        assert_eq!(fetch.calls(), 1);
    }

    #[tokio::test]
    async fn forced_load_always_fetches() {
        let fetch = ImmediateFetch::ok(json!({
            "_links": { "self": { "href": "/api/v3/queries/5" } }
        }));
        let res = shell("/api/v3/queries/5", fetch.clone());

        res.load(false).await.unwrap();
        res.load(true).await.unwrap();
        res.load(true).await.unwrap();
        assert_eq!(fetch.calls(), 3);
    }

    #[tokio::test]
    async fn failed_load_propagates_and_allows_retry() {
        let fetch = ImmediateFetch::failing(HalError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        let res = shell("/api/v3/queries/5", fetch.clone());

        let err = res.load(false).await.unwrap_err();
        assert!(matches!(err, HalError::Api { status: 500, .. }));
        assert!(!res.is_loaded());

        // The failed future is not memoized; the next call fetches again.
        let _ = res.load(false).await.unwrap_err();
        assert_eq!(fetch.calls(), 2);
    }

    #[tokio::test]
    async fn load_without_backend_is_detached() {
        let res = HalResource::empty(Some("/api/v3/queries/5"), None);
        assert_eq!(res.load(false).await.unwrap_err(), HalError::Detached);
    }

    #[tokio::test]
    async fn load_without_self_link_is_rejected() {
        let fetch = ImmediateFetch::ok(json!({}));
        let res = HalResource::empty(None, Some(fetch));
        assert_eq!(res.load(false).await.unwrap_err(), HalError::NoSelfLink);
    }
}
