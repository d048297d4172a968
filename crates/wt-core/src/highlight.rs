//! Highlighting state of a work-package table.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::HighlightingMode;

/// Reference to a highlightable work-package attribute (e.g., `status`).
///
/// Equality is link-based: two references to the same attribute compare
/// equal even when they come from different fetches of the schema
/// document. The href is preferred; the id is the fallback for references
/// that were never linked.
#[derive(Debug, Clone, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AttributeRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl AttributeRef {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: None,
        }
    }

    #[must_use]
    pub fn with_href(id: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: Some(href.into()),
        }
    }
}

impl PartialEq for AttributeRef {
    fn eq(&self, other: &Self) -> bool {
        match (&self.href, &other.href) {
            (Some(a), Some(b)) => a == b,
            _ => self.id == other.id,
        }
    }
}

/// Highlighting state: the active mode plus an optional attribute
/// allow-list restricting inline highlighting.
///
/// Invariant: an empty allow-list is normalized to `None` (absence) so
/// that `[]` and "unset" never diff against each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Highlight {
    pub mode: HighlightingMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_attributes: Option<Vec<AttributeRef>>,
}

impl Highlight {
    /// Build a highlight state, normalizing an empty allow-list to absence.
    #[must_use]
    pub fn new(mode: HighlightingMode, selected_attributes: Option<Vec<AttributeRef>>) -> Self {
        Self {
            mode,
            selected_attributes: selected_attributes.filter(|attrs| !attrs.is_empty()),
        }
    }

    /// Highlighting switched off entirely.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            mode: HighlightingMode::None,
            selected_attributes: None,
        }
    }
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            mode: HighlightingMode::Inline,
            selected_attributes: None,
        }
    }
}
