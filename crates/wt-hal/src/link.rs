//! HAL link objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wt_core::id_from_href;

/// A single `_links` entry of a HAL document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalLink {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl HalLink {
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(href: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            title: Some(title.into()),
        }
    }

    /// Numeric identifier from the link's href trailer, if any.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.href.as_deref().and_then(id_from_href)
    }

    /// Trailing path segment of the href, numeric or not.
    ///
    /// Column and attribute links are identified by name
    /// (`.../columns/status`), so unlike [`HalLink::id`] this does not
    /// require digits.
    #[must_use]
    pub fn trailing_segment(&self) -> Option<String> {
        let href = self.href.as_deref()?;
        let segment = href.trim_end_matches('/').rsplit('/').next()?;
        (!segment.is_empty()).then(|| segment.to_string())
    }

    /// Parse a link out of a raw `_links` entry.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
