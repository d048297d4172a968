//! # wt-table
//!
//! Per-query table state for Worktable.
//!
//! A work-package table view owns one [`QuerySpace`]: an isolated
//! namespace of observable state cells, one per display concern (group
//! by, sort by, highlighting, timeline, columns, hierarchy). Each concern
//! is driven by a slice service implementing the uniform
//! [`QueryStateSlice`] contract:
//! - `value_from_query` — pure extraction/defaulting from a query
//! - `has_changed` — structural diff against the query (link equality)
//! - `apply_to_query` — write-back before a save, reporting whether the
//!   table needs a full re-render
//! - `update` — mutate the live slice and publish synchronously
//!
//! The [`render`] module holds the post-render highlighting pass that
//! decorates already-built rows without rebuilding the table.

pub mod cell;
pub mod render;
pub mod slice;
pub mod slices;
pub mod space;
pub mod table;

#[cfg(test)]
pub(crate) mod test_support;

pub use cell::{StateCell, SubscriptionHandle};
pub use render::{HighlightRenderPass, RenderedRow, TableBody};
pub use slice::QueryStateSlice;
pub use slices::columns::ColumnsService;
pub use slices::group_by::GroupByService;
pub use slices::hierarchy::HierarchyService;
pub use slices::highlighting::{EnterpriseGating, HighlightingService, NoRestrictions};
pub use slices::sort_by::SortByService;
pub use slices::timeline::TimelineService;
pub use space::QuerySpace;
pub use table::TableState;
