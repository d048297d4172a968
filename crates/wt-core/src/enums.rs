//! Display-option enums for the work-package query document.
//!
//! All enums use lowercase serialization via `#[serde(rename_all = "lowercase")]`
//! to match the wire shape of the query document (`"auto"`, `"inline"`, …).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ZoomLevel
// ---------------------------------------------------------------------------

/// Timeline zoom granularity.
///
/// The concrete levels form a total order from finest to coarsest:
///
/// ```text
/// days < weeks < months < quarters < years
/// ```
///
/// `Auto` sits outside that order; it asks the timeline to pick a concrete
/// level that fits the visible date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ZoomLevel {
    Auto,
    Days,
    Weeks,
    Months,
    Quarters,
    Years,
}

/// Concrete zoom levels, ordered from finest to coarsest granularity.
pub const ZOOM_LEVEL_ORDER: [ZoomLevel; 5] = [
    ZoomLevel::Days,
    ZoomLevel::Weeks,
    ZoomLevel::Months,
    ZoomLevel::Quarters,
    ZoomLevel::Years,
];

impl ZoomLevel {
    /// Return the string representation used in the query document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Quarters => "quarters",
            Self::Years => "years",
        }
    }

    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Step `delta` positions along [`ZOOM_LEVEL_ORDER`].
    ///
    /// Returns `None` when `self` is [`ZoomLevel::Auto`] (no position in the
    /// order) or when the step would leave the order at either end. Callers
    /// treat `None` as a no-op rather than clamping to the boundary.
    #[must_use]
    pub fn step(self, delta: i32) -> Option<Self> {
        let idx = ZOOM_LEVEL_ORDER.iter().position(|&level| level == self)?;
        let target = i32::try_from(idx).ok()?.checked_add(delta)?;
        usize::try_from(target)
            .ok()
            .and_then(|i| ZOOM_LEVEL_ORDER.get(i))
            .copied()
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HighlightingMode
// ---------------------------------------------------------------------------

/// Row highlighting mode of a work-package table.
///
/// `Inline` colors individual attribute cells as they render themselves;
/// the attribute-driven modes (`Status`, `Priority`, `Type`) color whole
/// rows in a dedicated render pass; `None` disables highlighting entirely.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum HighlightingMode {
    #[default]
    Inline,
    None,
    Status,
    Priority,
    Type,
}

impl HighlightingMode {
    /// Return the string representation used in the query document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::None => "none",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Type => "type",
        }
    }

    /// The work-package attribute consulted by the row render pass.
    ///
    /// Only the attribute-driven modes name an attribute; `Inline` and
    /// `None` do not trigger the pass at all.
    #[must_use]
    pub const fn attribute_name(self) -> Option<&'static str> {
        match self {
            Self::Status => Some("status"),
            Self::Priority => Some("priority"),
            Self::Type => Some("type"),
            Self::Inline | Self::None => None,
        }
    }
}

impl fmt::Display for HighlightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

/// Href of the ascending sort direction resource.
pub const SORT_DIRECTION_ASC: &str = "urn:worktable:api:queries:directions:asc";
/// Href of the descending sort direction resource.
pub const SORT_DIRECTION_DESC: &str = "urn:worktable:api:queries:directions:desc";

/// Direction of one sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// The direction resource href used in the query document's `sortBy`
    /// criteria.
    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::Asc => SORT_DIRECTION_ASC,
            Self::Desc => SORT_DIRECTION_DESC,
        }
    }

    /// Resolve a direction from its resource href.
    #[must_use]
    pub fn from_href(href: &str) -> Option<Self> {
        match href {
            SORT_DIRECTION_ASC => Some(Self::Asc),
            SORT_DIRECTION_DESC => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zoom_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ZoomLevel::Auto).unwrap(), "\"auto\"");
        assert_eq!(
            serde_json::to_string(&ZoomLevel::Quarters).unwrap(),
            "\"quarters\""
        );
    }

    #[test]
    fn zoom_step_moves_along_the_order() {
        assert_eq!(ZoomLevel::Weeks.step(1), Some(ZoomLevel::Months));
        assert_eq!(ZoomLevel::Weeks.step(-1), Some(ZoomLevel::Days));
        assert_eq!(ZoomLevel::Days.step(2), Some(ZoomLevel::Months));
    }

    #[test]
    fn zoom_step_out_of_range_is_none() {
        assert_eq!(ZoomLevel::Years.step(1), None);
        assert_eq!(ZoomLevel::Days.step(-1), None);
        assert_eq!(ZoomLevel::Months.step(10), None);
    }

    #[test]
    fn zoom_step_from_auto_is_none() {
        assert_eq!(ZoomLevel::Auto.step(1), None);
        assert_eq!(ZoomLevel::Auto.step(-1), None);
    }

    #[test]
    fn highlighting_mode_attribute_names() {
        assert_eq!(HighlightingMode::Status.attribute_name(), Some("status"));
        assert_eq!(
            HighlightingMode::Priority.attribute_name(),
            Some("priority")
        );
        assert_eq!(HighlightingMode::Inline.attribute_name(), None);
        assert_eq!(HighlightingMode::None.attribute_name(), None);
    }

    #[test]
    fn highlighting_mode_round_trips_type_keyword() {
        let mode: HighlightingMode = serde_json::from_str("\"type\"").unwrap();
        assert_eq!(mode, HighlightingMode::Type);
        assert_eq!(serde_json::to_string(&mode).unwrap(), "\"type\"");
    }

    #[test]
    fn sort_direction_href_round_trip() {
        for dir in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(SortDirection::from_href(dir.href()), Some(dir));
        }
        assert_eq!(SortDirection::from_href("urn:other"), None);
    }

    #[test]
    fn sort_direction_reversed() {
        assert_eq!(SortDirection::Asc.reversed(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.reversed(), SortDirection::Asc);
    }
}
