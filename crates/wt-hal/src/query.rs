//! The query resource: a saved or transient table view definition.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use wt_core::enums::{HighlightingMode, ZoomLevel};
use wt_core::highlight::AttributeRef;
use wt_core::timeline::TimelineLabels;

use crate::columns::{QueryColumn, SortByCriterion};
use crate::error::HalError;
use crate::fetch::FetchBackend;
use crate::link::HalLink;
use crate::resource::HalResource;

/// Typed proxy over a query document.
///
/// A query holds the persisted display options of one table view: group
/// by, sort criteria, highlighting, timeline settings, selected columns,
/// and the hierarchy flag. The instance is owned by the UI session and
/// mutated in place by [`apply`](crate::query) operations until it is
/// explicitly saved.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResource {
    res: HalResource,
}

impl QueryResource {
    /// The `_type` tag of query documents.
    pub const TYPE_TAG: &'static str = "Query";

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

    /// An unloaded shell pointing at a query href.
    #[must_use]
    pub fn shell(href: &str, fetch: Option<Arc<dyn FetchBackend>>) -> Self {
        Self {
            res: HalResource::empty(Some(href), fetch),
        }
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
    pub fn href(&self) -> Option<String> {
        self.res.self_href()
    }

    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.res.field("name").and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("createdAt")
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("updatedAt")
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.res
            .field(key)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// Load the full query document.
    ///
    /// # Errors
    ///
    /// Propagates [`HalError`] from the underlying resource load.
    pub async fn load(&self, force: bool) -> Result<(), HalError> {
        self.res.load(force).await
    }

    /// Derive a modified-but-uncommitted variant without mutating this
    /// instance.
    #[must_use]
    pub fn copy_with(&self, overrides: Value) -> Self {
        Self {
            res: self.res.copy_with(overrides),
        }
    }

    // --- group by ---------------------------------------------------------

    #[must_use]
    pub fn group_by(&self) -> Option<QueryColumn> {
        self.res
            .link("groupBy")
            .as_ref()
            .and_then(QueryColumn::from_link)
    }

    pub fn set_group_by(&self, column: Option<&QueryColumn>) {
        self.res
            .set_link("groupBy", column.map(QueryColumn::to_link).as_ref());
    }

    // --- sort by ----------------------------------------------------------

    #[must_use]
    pub fn sort_by(&self) -> Vec<SortByCriterion> {
        self.res
            .field("sortBy")
            .and_then(|v| {
                v.as_array().map(|entries| {
                    entries
                        .iter()
                        .filter_map(SortByCriterion::from_value)
                        .collect()
                })
            })
            .unwrap_or_default()
    }

    pub fn set_sort_by(&self, criteria: &[SortByCriterion]) {
        let entries: Vec<Value> = criteria.iter().map(SortByCriterion::to_value).collect();
        self.res.set_field("sortBy", Value::Array(entries));
    }

    // --- highlighting -----------------------------------------------------

    #[must_use]
    pub fn highlighting_mode(&self) -> HighlightingMode {
        self.res
            .field("highlightingMode")
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    pub fn set_highlighting_mode(&self, mode: HighlightingMode) {
        self.res
            .set_field("highlightingMode", Value::String(mode.as_str().to_string()));
    }

    /// The attribute allow-list for inline highlighting. Absent means
    /// "highlight every attribute".
    #[must_use]
    pub fn highlighted_attributes(&self) -> Option<Vec<AttributeRef>> {
        let links = self.res.link_list("highlightedAttributes");
        if links.is_empty() {
            return None;
        }
        Some(links.iter().filter_map(link_to_attribute).collect())
    }

    pub fn set_highlighted_attributes(&self, attributes: Option<&[AttributeRef]>) {
        let links: Option<Vec<HalLink>> =
            attributes.map(|attrs| attrs.iter().map(attribute_to_link).collect());
        self.res
            .set_link_list("highlightedAttributes", links.as_deref());
    }

    // --- timeline ---------------------------------------------------------

    #[must_use]
    pub fn timeline_visible(&self) -> bool {
        self.res
            .field("timelineVisible")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    pub fn set_timeline_visible(&self, visible: bool) {
        self.res.set_field("timelineVisible", Value::Bool(visible));
    }

    #[must_use]
    pub fn timeline_zoom_level(&self) -> ZoomLevel {
        self.res
            .field("timelineZoomLevel")
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or(ZoomLevel::Auto)
    }

    pub fn set_timeline_zoom_level(&self, level: ZoomLevel) {
        self.res.set_field(
            "timelineZoomLevel",
            Value::String(level.as_str().to_string()),
        );
    }

    /// Timeline labels with the empty-string spelling already folded into
    /// the absent marker.
    #[must_use]
    pub fn timeline_labels(&self) -> TimelineLabels {
        self.res
            .field("timelineLabels")
            .and_then(|v| serde_json::from_value::<TimelineLabels>(v).ok())
            .unwrap_or_default()
            .normalized()
    }

    pub fn set_timeline_labels(&self, labels: &TimelineLabels) {
        let value = serde_json::to_value(labels).unwrap_or(Value::Null);
        self.res.set_field("timelineLabels", value);
    }

    // --- columns & hierarchy ----------------------------------------------

    #[must_use]
    pub fn columns(&self) -> Vec<QueryColumn> {
        self.res
            .link_list("columns")
            .iter()
            .filter_map(QueryColumn::from_link)
            .collect()
    }

    pub fn set_columns(&self, columns: &[QueryColumn]) {
        let links: Vec<HalLink> = columns.iter().map(QueryColumn::to_link).collect();
        self.res.set_link_list("columns", Some(&links));
    }

    #[must_use]
    pub fn show_hierarchies(&self) -> bool {
        self.res
            .field("showHierarchies")
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }

    pub fn set_show_hierarchies(&self, enabled: bool) {
        self.res.set_field("showHierarchies", Value::Bool(enabled));
    }
}

fn link_to_attribute(link: &HalLink) -> Option<AttributeRef> {
    let id = link.trailing_segment().or_else(|| link.title.clone())?;
    Some(AttributeRef {
        id,
        href: link.href.clone(),
    })
}

fn attribute_to_link(attr: &AttributeRef) -> HalLink {
    HalLink {
        href: attr.href.clone(),
        title: Some(attr.id.clone()),
    }
}
