//! The work package resource: one entity row of the table.

use std::sync::Arc;

use serde_json::Value;

use crate::error::HalError;
use crate::fetch::FetchBackend;
use crate::link::HalLink;
use crate::resource::HalResource;

/// Typed proxy over a work package document.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkPackageResource {
    res: HalResource,
}

impl WorkPackageResource {
    /// The `_type` tag of work package documents.
    pub const TYPE_TAG: &'static str = "WorkPackage";

    #[must_use]
    pub fn from_value(source: Value, fetch: Option<Arc<dyn FetchBackend>>) -> Self {
        Self {
            res: HalResource::from_loaded(source, fetch),
        }
    }

    #[must_use]
    pub const fn from_resource(res: HalResource) -> Self {
        Self { res }
    }

    #[must_use]
    pub const fn resource(&self) -> &HalResource {
        &self.res
    }

    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.res.id()
    }

    #[must_use]
    pub fn subject(&self) -> Option<String> {
        self.res.field("subject").and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    /// Resolve a linked attribute (e.g., `status`, `priority`, `type`).
    ///
    /// Returns `None` when the work package does not carry the attribute,
    /// which callers treat as "skip", not as an error.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<HalLink> {
        self.res.link(name)
    }

    /// Load the full work package document.
    ///
    /// # Errors
    ///
    /// Propagates [`HalError`] from the underlying resource load.
    pub async fn load(&self, force: bool) -> Result<(), HalError> {
        self.res.load(force).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    pub(crate) fn fixture(id: u32, status_id: Option<u32>) -> Value {
        let mut links = serde_json::Map::new();
        links.insert(
            "self".to_string(),
            json!({ "href": format!("/api/v3/work_packages/{id}") }),
        );
        if let Some(sid) = status_id {
            links.insert(
                "status".to_string(),
                json!({ "href": format!("/api/v3/statuses/{sid}"), "title": "In progress" }),
            );
        }
        json!({
            "_type": "WorkPackage",
            "id": id,
            "subject": format!("Work package #{id}"),
            "_links": Value::Object(links),
        })
    }

    #[test]
    fn resolves_linked_attributes() {
        let wp = WorkPackageResource::from_value(fixture(12, Some(3)), None);
        let status = wp.attribute("status").unwrap();
        assert_eq!(status.id(), Some("3".to_string()));
        assert_eq!(status.title.as_deref(), Some("In progress"));
    }

    #[test]
    fn missing_attribute_is_absent_not_an_error() {
        let wp = WorkPackageResource::from_value(fixture(12, None), None);
        assert_eq!(wp.attribute("status"), None);
        assert_eq!(wp.attribute("priority"), None);
    }

    #[test]
    fn id_and_subject() {
        let wp = WorkPackageResource::from_value(fixture(12, None), None);
        assert_eq!(wp.id(), Some("12".to_string()));
        assert_eq!(wp.subject(), Some("Work package #12".to_string()));
    }
}
