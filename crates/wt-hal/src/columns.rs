//! Column value objects of the query document.
//!
//! Columns identify displayable/groupable/sortable work-package
//! attributes. They are lightweight value objects: equality is link-based
//! (falling back to the id), not instance-based, because the schema is
//! frequently re-fetched into new objects with the same semantic identity.

use serde_json::Value;
use wt_core::enums::SortDirection;

use crate::link::HalLink;

/// A displayable, groupable, or sortable column of the table.
#[derive(Debug, Clone, Eq)]
pub struct QueryColumn {
    /// Stable attribute id (e.g., `status`, `assignee`).
    pub id: String,
    pub href: Option<String>,
    /// Human-readable caption from the link title.
    pub name: Option<String>,
}

impl QueryColumn {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_href(id: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: Some(href.into()),
            name: None,
        }
    }

    /// Build a column from a `_links` entry; the id is the link's trailing
    /// path segment.
    #[must_use]
    pub fn from_link(link: &HalLink) -> Option<Self> {
        let id = link.trailing_segment()?;
        Some(Self {
            id,
            href: link.href.clone(),
            name: link.title.clone(),
        })
    }

    /// The `_links` entry representing this column.
    #[must_use]
    pub fn to_link(&self) -> HalLink {
        HalLink {
            href: self.href.clone(),
            title: self.name.clone(),
        }
    }
}

impl PartialEq for QueryColumn {
    fn eq(&self, other: &Self) -> bool {
        match (&self.href, &other.href) {
            (Some(a), Some(b)) => a == b,
            _ => self.id == other.id,
        }
    }
}

/// One entry of the query's ordered sort criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortByCriterion {
    pub column: QueryColumn,
    pub direction: SortDirection,
}

impl SortByCriterion {
    #[must_use]
    pub fn new(column: QueryColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Parse a criterion from its document shape
    /// `{ "column": link, "direction": link }`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let column = value
            .get("column")
            .and_then(HalLink::from_value)
            .as_ref()
            .and_then(QueryColumn::from_link)?;
        let direction = value
            .get("direction")
            .and_then(HalLink::from_value)
            .and_then(|link| link.href)
            .as_deref()
            .and_then(SortDirection::from_href)?;
        Some(Self { column, direction })
    }

    /// The document shape of this criterion.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "column": self.column.to_link(),
            "direction": { "href": self.direction.href() },
        })
    }
}
