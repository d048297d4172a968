//! Timeline visibility, zoom, and label state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ZoomLevel;

/// Attribute labels rendered next to timeline bars.
///
/// Each position holds the name of the work-package attribute to render,
/// or `None` when the label is switched off. On the wire an explicit
/// empty string also means "switched off"; [`TimelineLabels::normalized`]
/// folds that spelling into `None` so the two never diff against each
/// other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLabels {
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
    #[serde(default)]
    pub far_right: Option<String>,
}

impl TimelineLabels {
    /// The label layout used when a query specifies none.
    #[must_use]
    pub fn default_labels() -> Self {
        Self {
            left: None,
            right: None,
            far_right: Some("subject".to_string()),
        }
    }

    /// Fold explicit empty strings into the absent marker.
    #[must_use]
    pub fn normalized(self) -> Self {
        let fold = |label: Option<String>| label.filter(|attr| !attr.is_empty());
        Self {
            left: fold(self.left),
            right: fold(self.right),
            far_right: fold(self.far_right),
        }
    }

    /// Whether no position carries a label at all.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.far_right.is_none()
    }
}

/// Timeline state of a work-package table: visibility, zoom, labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimelineState {
    pub visible: bool,
    pub zoom_level: ZoomLevel,
    pub labels: TimelineLabels,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            visible: false,
            zoom_level: ZoomLevel::Auto,
            labels: TimelineLabels::default_labels(),
        }
    }
}
