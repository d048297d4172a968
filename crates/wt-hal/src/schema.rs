//! The query schema resource: server-advertised column capabilities.

use std::sync::Arc;

use serde_json::Value;

use crate::columns::QueryColumn;
use crate::error::HalError;
use crate::fetch::FetchBackend;
use crate::resource::HalResource;

/// Typed proxy over a query schema document.
///
/// The schema advertises which columns exist and which of them the
/// backend accepts for grouping and sorting. Slice services validate
/// user input against these sets and silently drop anything outside
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySchemaResource {
    res: HalResource,
}

impl QuerySchemaResource {
    /// The `_type` tag of query schema documents.
    pub const TYPE_TAG: &'static str = "QuerySchema";

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

    /// Every column the table can display.
    #[must_use]
    pub fn available_columns(&self) -> Vec<QueryColumn> {
        self.column_list("availableColumns")
    }

    /// Columns accepted as a group-by criterion.
    #[must_use]
    pub fn groupable_columns(&self) -> Vec<QueryColumn> {
        self.column_list("groupableColumns")
    }

    /// Columns accepted as sort criteria.
    #[must_use]
    pub fn sortable_columns(&self) -> Vec<QueryColumn> {
        self.column_list("sortableColumns")
    }

    fn column_list(&self, name: &str) -> Vec<QueryColumn> {
        self.res
            .link_list(name)
            .iter()
            .filter_map(QueryColumn::from_link)
            .collect()
    }

    /// Load the full schema document.
    ///
    /// # Errors
    ///
    /// Propagates [`HalError`] from the underlying resource load.
    pub async fn load(&self, force: bool) -> Result<(), HalError> {
        self.res.load(force).await
    }
}
