//! The per-view coordinator tying the slices to one query.

use std::sync::Arc;

use wt_hal::{QueryColumn, QueryResource, QuerySchemaResource, WorkPackageResource};

use crate::render::{HighlightRenderPass, TableBody};
use crate::slice::QueryStateSlice;
use crate::slices::columns::ColumnsService;
use crate::slices::group_by::GroupByService;
use crate::slices::hierarchy::HierarchyService;
use crate::slices::highlighting::{EnterpriseGating, HighlightingService};
use crate::slices::sort_by::SortByService;
use crate::slices::timeline::TimelineService;
use crate::space::QuerySpace;

/// One table view's complete state: the space plus one service per
/// slice, all sharing it.
///
/// Cross-slice rules live here and nowhere else. Hierarchy and group-by
/// are mutually exclusive, so the mutating entry points on this type
/// switch the other one off; calling the slice services directly
/// bypasses that rule on purpose (initialization does).
pub struct TableState {
    space: Arc<QuerySpace>,
    pub group_by: GroupByService,
    pub sort_by: SortByService,
    pub highlighting: HighlightingService,
    pub timeline: TimelineService,
    pub columns: ColumnsService,
    pub hierarchy: HierarchyService,
}

impl TableState {
    #[must_use]
    pub fn new(gating: Arc<dyn EnterpriseGating>) -> Self {
        let space = Arc::new(QuerySpace::new());
        Self {
            group_by: GroupByService::new(Arc::clone(&space)),
            sort_by: SortByService::new(Arc::clone(&space)),
            highlighting: HighlightingService::new(Arc::clone(&space), gating),
            timeline: TimelineService::new(Arc::clone(&space)),
            columns: ColumnsService::new(Arc::clone(&space)),
            hierarchy: HierarchyService::new(Arc::clone(&space)),
            space,
        }
    }

    #[must_use]
    pub fn space(&self) -> &Arc<QuerySpace> {
        &self.space
    }

    /// Seed every slice from a freshly loaded query and its schema.
    ///
    /// The schema's capability lists land first so that slices which
    /// validate against them see them during initialization.
    pub fn initialize(&self, query: &QueryResource, schema: &QuerySchemaResource) {
        tracing::debug!(query = ?query.id(), "initializing table state");

        self.space
            .available_columns
            .put(schema.available_columns());
        self.space
            .groupable_columns
            .put(schema.groupable_columns());
        self.space.sortable_columns.put(schema.sortable_columns());

        self.group_by.initialize(query);
        self.sort_by.initialize(query);
        self.highlighting.initialize(query);
        self.timeline.initialize(query);
        self.columns.initialize(query);
        self.hierarchy.initialize(query);

        self.space.query.put(query.clone());
    }

    /// Whether any slice's live value differs from the query.
    #[must_use]
    pub fn has_changes(&self, query: &QueryResource) -> bool {
        self.group_by.has_changed(query)
            || self.sort_by.has_changed(query)
            || self.highlighting.has_changed(query)
            || self.timeline.has_changed(query)
            || self.columns.has_changed(query)
            || self.hierarchy.has_changed(query)
    }

    /// Write every slice back onto the query in preparation for a save.
    ///
    /// Returns whether the table needs a full re-render afterwards,
    /// which is the case as soon as any slice says so.
    pub fn apply_to_query(&self, query: &QueryResource) -> bool {
        let mut rerender = false;
        rerender |= self.group_by.apply_to_query(query);
        rerender |= self.sort_by.apply_to_query(query);
        rerender |= self.highlighting.apply_to_query(query);
        rerender |= self.timeline.apply_to_query(query);
        rerender |= self.columns.apply_to_query(query);
        rerender |= self.hierarchy.apply_to_query(query);
        rerender
    }

    /// Flip hierarchy mode. Enabling it switches grouping off.
    pub fn toggle_hierarchy(&self) -> bool {
        let enabled = self.hierarchy.toggle();
        if enabled {
            self.group_by.disable();
        }
        enabled
    }

    /// Enable hierarchy mode, switching grouping off.
    pub fn enable_hierarchy(&self) {
        self.hierarchy.set_enabled(true);
        self.group_by.disable();
    }

    /// Group by a column, switching hierarchy mode off. The group-by
    /// slice still rejects columns the backend does not advertise; in
    /// that case hierarchy stays as it was.
    pub fn group_by_column(&self, column: &QueryColumn) {
        self.group_by.set_by(column);
        if self.group_by.is_currently_grouped_by(column) {
            self.hierarchy.set_enabled(false);
        }
    }

    /// Render the result rows, run the highlighting pass over them, and
    /// publish the body on the space's `rendered` cell.
    pub fn render(&self, work_packages: Vec<Option<WorkPackageResource>>) -> TableBody {
        let mut body = TableBody::build(work_packages);
        HighlightRenderPass::new(&self.highlighting).render(&mut body);
        self.space.rendered.put(body.clone());
        body
    }

    /// Close the view: clear every cell and terminate all subscriptions.
    pub fn tear_down(&self) {
        self.space.tear_down();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slices::highlighting::NoRestrictions;
    use crate::test_support::{query_fixture, schema_fixture};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wt_core::enums::{HighlightingMode, ZoomLevel};
    use wt_core::highlight::Highlight;

    fn table() -> TableState {
        let table = TableState::new(Arc::new(NoRestrictions));
        table.initialize(&query_fixture(), &schema_fixture());
        table
    }

    #[test]
    fn initialize_seeds_every_slice_and_reports_no_changes() {
        let table = table();
        let query = query_fixture();

        assert!(!table.has_changes(&query));
        assert_eq!(
            table.group_by.current().map(|c| c.id),
            Some("status".to_string())
        );
        assert_eq!(table.timeline.zoom_level(), ZoomLevel::Weeks);
        assert!(!table.hierarchy.is_enabled());
        assert_eq!(
            table.space().query.value().and_then(|q| q.id()),
            Some("5".to_string())
        );
    }

    #[test]
    fn any_slice_change_shows_up_in_has_changes() {
        let table = table();
        let query = query_fixture();

        table.timeline.toggle();
        assert!(table.has_changes(&query));
    }

    #[test]
    fn apply_folds_rerender_flags_across_slices() {
        let table = table();
        let query = query_fixture();

        table.timeline.set_zoom_level(ZoomLevel::Months);
        // Structural slices always request a rebuild on write-back.
        assert!(table.apply_to_query(&query));

        // Everything written back, so the diff is clean again.
        assert!(!table.has_changes(&query));
        assert_eq!(query.timeline_zoom_level(), ZoomLevel::Months);
    }

    #[test]
    fn enabling_hierarchy_disables_grouping() {
        let table = table();
        assert!(table.group_by.is_enabled());

        assert!(table.toggle_hierarchy());
        assert!(table.hierarchy.is_enabled());
        assert!(!table.group_by.is_enabled());
    }

    #[test]
    fn grouping_disables_hierarchy_only_when_accepted() {
        let table = table();
        table.enable_hierarchy();

        let bogus = QueryColumn {
            id: "bogus".to_string(),
            href: Some("/api/v3/queries/columns/bogus".to_string()),
            name: None,
        };
        table.group_by_column(&bogus);
        assert!(table.hierarchy.is_enabled());
        assert!(!table.group_by.is_enabled());

        let assignee = table
            .group_by
            .available()
            .into_iter()
            .find(|c| c.id == "assignee")
            .unwrap();
        table.group_by_column(&assignee);
        assert!(!table.hierarchy.is_enabled());
        assert!(table.group_by.is_enabled());
    }

    #[test]
    fn render_publishes_the_decorated_body() {
        let table = table();
        table
            .highlighting
            .update(Highlight::new(HighlightingMode::Status, None));

        let wp = WorkPackageResource::from_value(
            json!({
                "_type": "WorkPackage",
                "id": 7,
                "_links": {
                    "self": { "href": "/api/v3/work_packages/7" },
                    "status": { "href": "/api/v3/statuses/3" }
                }
            }),
            None,
        );

        let body = table.render(vec![Some(wp), None]);
        assert!(body.rows()[0].classes.contains("__hl_background_status_3"));
        assert_eq!(table.space().rendered.value().map(|b| b.len()), Some(2));
    }

    #[test]
    fn tear_down_empties_the_space() {
        let table = table();
        table.tear_down();
        assert!(table.space().query.value().is_none());
        assert!(!table.group_by.is_enabled());
    }
}
