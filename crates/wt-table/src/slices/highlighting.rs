//! The highlighting slice: row/attribute color configuration.

use std::sync::Arc;

use wt_core::enums::HighlightingMode;
use wt_core::highlight::Highlight;
use wt_hal::QueryResource;

use crate::slice::QueryStateSlice;
use crate::space::QuerySpace;

/// Externally supplied policy that can force highlighting off at read
/// time (e.g., a plan restriction), overriding any stored value.
pub trait EnterpriseGating: Send + Sync {
    fn highlighting_restricted(&self) -> bool;
}

/// Gating that never restricts anything.
pub struct NoRestrictions;

impl EnterpriseGating for NoRestrictions {
    fn highlighting_restricted(&self) -> bool {
        false
    }
}

impl EnterpriseGating for bool {
    fn highlighting_restricted(&self) -> bool {
        *self
    }
}

/// Drives the query's `highlightingMode` and `highlightedAttributes`.
///
/// All reads go through one normalization: an empty attribute allow-list
/// becomes absence, and an active restriction forces the mode to `none`.
/// Applying the same normalization in [`QueryStateSlice::value_from_query`]
/// and [`HighlightingService::current`] keeps the two consistent no
/// matter which one a caller consults first.
pub struct HighlightingService {
    space: Arc<QuerySpace>,
    gating: Arc<dyn EnterpriseGating>,
}

impl HighlightingService {
    #[must_use]
    pub fn new(space: Arc<QuerySpace>, gating: Arc<dyn EnterpriseGating>) -> Self {
        Self { space, gating }
    }

    #[must_use]
    pub fn current(&self) -> Highlight {
        self.normalize(self.space.highlighting.value_or(Highlight::default()))
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.current().mode == HighlightingMode::Inline
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.current().mode == HighlightingMode::None
    }

    /// Whether the given attribute should inline-highlight itself.
    ///
    /// False whenever the mode is not inline (the restriction already
    /// folded into [`HighlightingService::current`]); true by default
    /// when no allow-list is set; otherwise membership by attribute id.
    #[must_use]
    pub fn should_highlight_inline(&self, attribute: &str) -> bool {
        let current = self.current();
        if current.mode != HighlightingMode::Inline {
            return false;
        }
        current.selected_attributes.is_none_or(|attrs| {
            attrs.iter().any(|attr| attr.id == attribute)
        })
    }

    fn normalize(&self, value: Highlight) -> Highlight {
        if self.gating.highlighting_restricted() {
            return Highlight::disabled();
        }
        // Re-assert the empty-list invariant for values that were built
        // by hand rather than through the constructor.
        Highlight::new(value.mode, value.selected_attributes)
    }
}

impl QueryStateSlice for HighlightingService {
    type Value = Highlight;

    fn value_from_query(&self, query: &QueryResource) -> Self::Value {
        self.normalize(Highlight::new(
            query.highlighting_mode(),
            query.highlighted_attributes(),
        ))
    }

    fn has_changed(&self, query: &QueryResource) -> bool {
        self.value_from_query(query) != self.current()
    }

    fn apply_to_query(&self, query: &QueryResource) -> bool {
        let current = self.current();
        query.set_highlighting_mode(current.mode);
        query.set_highlighted_attributes(current.selected_attributes.as_deref());
        false
    }

    fn update(&self, value: Self::Value) {
        self.space.highlighting.put(self.normalize(value));
    }
}
