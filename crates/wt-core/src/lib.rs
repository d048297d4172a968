//! # wt-core
//!
//! Core types and error types for Worktable.
//!
//! This crate provides the foundational types shared across all Worktable
//! crates:
//! - Display-option enums for the query document (zoom level, highlighting
//!   mode, sort direction)
//! - Timeline label and visibility state
//! - Highlighting state with its normalization rules
//! - Link-based attribute references and href→id parsing
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod highlight;
pub mod hrefs;
pub mod timeline;

pub use enums::{HighlightingMode, SortDirection, ZOOM_LEVEL_ORDER, ZoomLevel};
pub use errors::CoreError;
pub use highlight::{AttributeRef, Highlight};
pub use hrefs::id_from_href;
pub use timeline::{TimelineLabels, TimelineState};
