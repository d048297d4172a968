//! The query-scoped state container.

use wt_core::enums::ZoomLevel;
use wt_core::highlight::Highlight;
use wt_core::timeline::TimelineState;
use wt_hal::{QueryColumn, QueryResource, SortByCriterion};

use crate::cell::StateCell;
use crate::render::TableBody;

/// One isolated namespace of state cells per open table view.
///
/// Two simultaneously open tables own two spaces and never cross
/// contaminate state. The space is created when a table view opens and
/// torn down — all cells cleared, all subscriptions terminated — when it
/// closes; stale callbacks firing against a destroyed view are a bug of
/// the caller that skipped [`QuerySpace::tear_down`].
#[derive(Default, Clone)]
pub struct QuerySpace {
    /// The query resource this table renders.
    pub query: StateCell<QueryResource>,

    // Live slice values.
    pub group_by: StateCell<Option<QueryColumn>>,
    pub sort_by: StateCell<Vec<SortByCriterion>>,
    pub highlighting: StateCell<Highlight>,
    pub timeline: StateCell<TimelineState>,
    pub columns: StateCell<Vec<QueryColumn>>,
    pub hierarchy: StateCell<bool>,

    /// Last concretely resolved zoom while `zoom_level` was `auto`.
    /// Ephemeral: never persisted, never diffed against the query.
    pub applied_zoom_level: StateCell<ZoomLevel>,

    /// The most recent render result, rebuilt on every render.
    pub rendered: StateCell<TableBody>,

    // Server-advertised capabilities, seeded from the query schema.
    pub available_columns: StateCell<Vec<QueryColumn>>,
    pub groupable_columns: StateCell<Vec<QueryColumn>>,
    pub sortable_columns: StateCell<Vec<QueryColumn>>,
}

impl QuerySpace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy the namespace: every cell loses its value and all
    /// subscriptions are terminated.
    pub fn tear_down(&self) {
        tracing::debug!("tearing down query space");
        self.query.clear();
        self.group_by.clear();
        self.sort_by.clear();
        self.highlighting.clear();
        self.timeline.clear();
        self.columns.clear();
        self.hierarchy.clear();
        self.applied_zoom_level.clear();
        self.rendered.clear();
        self.available_columns.clear();
        self.groupable_columns.clear();
        self.sortable_columns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn spaces_are_isolated() {
        let a = QuerySpace::new();
        let b = QuerySpace::new();

        a.hierarchy.put(true);
        assert_eq!(a.hierarchy.value(), Some(true));
        assert_eq!(b.hierarchy.value(), None);
    }

    #[test]
    fn tear_down_clears_values_and_subscriptions() {
        let space = QuerySpace::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let sink = Arc::clone(&fired);
        let _handle = space.hierarchy.subscribe(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        space.hierarchy.put(true);
        space.tear_down();
        space.hierarchy.put(false);

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(space.group_by.value(), None);
    }
}
