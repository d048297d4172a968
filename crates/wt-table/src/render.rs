//! Row rendering and the post-render highlighting pass.
//!
//! The primary render builds one [`RenderedRow`] per result slot; rows
//! without a resolved work package render as placeholders. Highlighting
//! runs afterwards as a decoration pass over the finished body, so
//! changing the highlight mode never rebuilds the table.

use std::collections::BTreeSet;

use wt_hal::WorkPackageResource;

use crate::slices::highlighting::HighlightingService;

/// The DOM id of a work package row.
#[must_use]
pub fn row_html_id(work_package_id: &str) -> String {
    format!("wp-row-{work_package_id}-table")
}

/// The CSS class carrying the highlight color of one attribute value.
#[must_use]
pub fn highlight_background_class(attribute: &str, attribute_id: &str) -> String {
    format!("__hl_background_{attribute}_{attribute_id}")
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub html_id: String,
    pub classes: BTreeSet<String>,
    pub work_package: Option<WorkPackageResource>,
}

impl RenderedRow {
    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.insert(class.into());
    }
}

/// The rendered table body, rows in result order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableBody {
    rows: Vec<RenderedRow>,
}

impl TableBody {
    /// Primary render: one row per result slot, placeholders included.
    #[must_use]
    pub fn build(work_packages: Vec<Option<WorkPackageResource>>) -> Self {
        let rows = work_packages
            .into_iter()
            .map(|work_package| {
                let mut classes = BTreeSet::new();
                classes.insert("wp-table--row".to_string());
                let html_id = match &work_package {
                    Some(wp) => wp.id().map(|id| row_html_id(&id)).unwrap_or_default(),
                    None => {
                        classes.insert("wp-table--placeholder-row".to_string());
                        String::new()
                    }
                };
                RenderedRow {
                    html_id,
                    classes,
                    work_package,
                }
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [RenderedRow] {
        &mut self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Decorates an already rendered body with per-row highlight classes.
pub struct HighlightRenderPass<'a> {
    highlighting: &'a HighlightingService,
}

impl<'a> HighlightRenderPass<'a> {
    #[must_use]
    pub const fn new(highlighting: &'a HighlightingService) -> Self {
        Self { highlighting }
    }

    /// Apply the current highlight mode to every row.
    ///
    /// A no-op when highlighting is inline or disabled; those modes color
    /// individual cells during the primary render, not whole rows. Rows
    /// without a work package, or whose work package lacks the highlight
    /// attribute or a numeric attribute id, stay untouched.
    pub fn render(&self, body: &mut TableBody) {
        let mode = self.highlighting.current().mode;
        let Some(attribute) = mode.attribute_name() else {
            return;
        };

        for row in body.rows_mut() {
            let Some(work_package) = &row.work_package else {
                continue;
            };
            let Some(link) = work_package.attribute(attribute) else {
                continue;
            };
            let Some(id) = link.id() else {
                continue;
            };
            row.add_class(highlight_background_class(attribute, &id));
        }
    }
}
