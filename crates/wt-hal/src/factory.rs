//! Construction of typed resources from raw documents.
//!
//! Documents carry a `_type` tag; the factory dispatches on that tag to
//! the matching typed proxy instead of injecting behavior at runtime.
//! Unknown tags fall back to the generic proxy so that callers can still
//! follow links through documents this crate has no view model for.

use std::sync::Arc;

use serde_json::Value;

use crate::fetch::FetchBackend;
use crate::query::QueryResource;
use crate::resource::HalResource;
use crate::schema::QuerySchemaResource;
use crate::work_package::WorkPackageResource;

/// Known resource kinds, keyed by their declared `_type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Query,
    QuerySchema,
    WorkPackage,
    Generic,
}

impl ResourceKind {
    /// Resolve a kind from a document's `_type` tag. Unknown tags (and
    /// untagged documents) map to [`ResourceKind::Generic`].
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(QueryResource::TYPE_TAG) => Self::Query,
            Some(QuerySchemaResource::TYPE_TAG) => Self::QuerySchema,
            Some(WorkPackageResource::TYPE_TAG) => Self::WorkPackage,
            _ => Self::Generic,
        }
    }
}

/// A typed resource produced by the factory.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedResource {
    Query(QueryResource),
    QuerySchema(QuerySchemaResource),
    WorkPackage(WorkPackageResource),
    Generic(HalResource),
}

impl TypedResource {
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Query(_) => ResourceKind::Query,
            Self::QuerySchema(_) => ResourceKind::QuerySchema,
            Self::WorkPackage(_) => ResourceKind::WorkPackage,
            Self::Generic(_) => ResourceKind::Generic,
        }
    }

    /// The underlying generic proxy.
    #[must_use]
    pub const fn resource(&self) -> &HalResource {
        match self {
            Self::Query(q) => q.resource(),
            Self::QuerySchema(s) => s.resource(),
            Self::WorkPackage(wp) => wp.resource(),
            Self::Generic(res) => res,
        }
    }
}

/// Factory turning raw documents into typed resources.
///
/// Holds the fetch backend handed to every constructed resource; build
/// one per API endpoint at assembly time and pass it along explicitly
/// (no process-wide registry).
#[derive(Clone)]
pub struct ResourceFactory {
    fetch: Option<Arc<dyn FetchBackend>>,
}

impl ResourceFactory {
    #[must_use]
    pub const fn new(fetch: Arc<dyn FetchBackend>) -> Self {
        Self { fetch: Some(fetch) }
    }

    /// A factory whose resources cannot load; useful for tests working on
    /// fully materialized documents.
    #[must_use]
    pub const fn detached() -> Self {
        Self { fetch: None }
    }

    /// Wrap a fully loaded document in the typed proxy matching its
    /// `_type` tag.
    #[must_use]
    pub fn create(&self, source: Value) -> TypedResource {
        let tag = source
            .get("_type")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        let res = HalResource::from_loaded(source, self.fetch.clone());

        match ResourceKind::from_tag(tag.as_deref()) {
            ResourceKind::Query => TypedResource::Query(QueryResource::from_resource(res)),
            ResourceKind::QuerySchema => {
                TypedResource::QuerySchema(QuerySchemaResource::from_resource(res))
            }
            ResourceKind::WorkPackage => {
                TypedResource::WorkPackage(WorkPackageResource::from_resource(res))
            }
            ResourceKind::Generic => TypedResource::Generic(res),
        }
    }

    /// An unloaded query shell for a known href.
    #[must_use]
    pub fn query_shell(&self, href: &str) -> QueryResource {
        QueryResource::shell(href, self.fetch.clone())
    }
}
