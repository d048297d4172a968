//! The timeline slice: visibility, zoom level, and bar labels.

use std::sync::Arc;

use wt_core::enums::ZoomLevel;
use wt_core::timeline::{TimelineLabels, TimelineState};
use wt_hal::QueryResource;

use crate::slice::QueryStateSlice;
use crate::space::QuerySpace;

/// Drives the query's `timelineVisible`, `timelineZoomLevel`, and
/// `timelineLabels`.
///
/// Besides the persisted state, the service remembers the last
/// concretely resolved zoom while the level is `auto` (the "applied"
/// zoom), so that delta-zoom operations stay continuous after leaving
/// autozoom. That memory is ephemeral: never persisted, never diffed.
pub struct TimelineService {
    space: Arc<QuerySpace>,
}

impl TimelineService {
    #[must_use]
    pub const fn new(space: Arc<QuerySpace>) -> Self {
        Self { space }
    }

    #[must_use]
    pub fn current(&self) -> TimelineState {
        self.space.timeline.value_or(TimelineState::default())
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.current().visible
    }

    #[must_use]
    pub fn zoom_level(&self) -> ZoomLevel {
        self.current().zoom_level
    }

    #[must_use]
    pub fn is_auto_zoom(&self) -> bool {
        self.zoom_level().is_auto()
    }

    /// The labels to render, falling back to the defaults when the
    /// stored state carries none at all.
    #[must_use]
    pub fn labels(&self) -> TimelineLabels {
        let labels = self.current().labels;
        if labels.is_unset() {
            TimelineLabels::default_labels()
        } else {
            labels
        }
    }

    /// Record the concrete zoom the timeline resolved while in autozoom.
    pub fn set_applied_zoom_level(&self, level: ZoomLevel) {
        self.space.applied_zoom_level.put(level);
    }

    #[must_use]
    pub fn applied_zoom_level(&self) -> ZoomLevel {
        self.space.applied_zoom_level.value_or(ZoomLevel::Auto)
    }

    pub fn toggle(&self) {
        let visible = self.is_visible();
        self.set_visible(!visible);
    }

    pub fn set_visible(&self, visible: bool) {
        self.modify(|state| state.visible = visible);
    }

    pub fn set_zoom_level(&self, level: ZoomLevel) {
        self.modify(|state| state.zoom_level = level);
    }

    pub fn enable_autozoom(&self) {
        self.set_zoom_level(ZoomLevel::Auto);
    }

    /// Labels are normalized on write: an explicit empty string is the
    /// disabled marker and stores as absent.
    pub fn update_labels(&self, labels: TimelineLabels) {
        self.modify(|state| state.labels = labels.normalized());
    }

    /// Step the zoom by `delta` positions along the concrete order.
    ///
    /// - concrete level: clamped step; out-of-range deltas are silent
    ///   no-ops
    /// - `auto` with a previously resolved concrete zoom: step from that
    ///   remembered value
    /// - `auto` without memory: jump straight to the end matching the
    ///   delta's sign (negative → finest, positive → coarsest)
    pub fn update_zoom_with_delta(&self, delta: i32) {
        let level = self.zoom_level();
        if !level.is_auto() {
            if let Some(next) = level.step(delta) {
                self.set_zoom_level(next);
            }
            return;
        }

        let applied = self.applied_zoom_level();
        if applied.is_auto() {
            let target = if delta < 0 {
                ZoomLevel::Days
            } else {
                ZoomLevel::Years
            };
            self.set_zoom_level(target);
        } else if let Some(next) = applied.step(delta) {
            self.set_zoom_level(next);
        }
    }

    fn modify(&self, change: impl FnOnce(&mut TimelineState)) {
        let mut state = self.current();
        change(&mut state);
        self.update(state);
    }
}

impl QueryStateSlice for TimelineService {
    type Value = TimelineState;

    fn value_from_query(&self, query: &QueryResource) -> Self::Value {
        TimelineState {
            visible: query.timeline_visible(),
            zoom_level: query.timeline_zoom_level(),
            labels: query.timeline_labels(),
        }
    }

    fn has_changed(&self, query: &QueryResource) -> bool {
        self.value_from_query(query) != self.current()
    }

    fn apply_to_query(&self, query: &QueryResource) -> bool {
        let current = self.current();
        query.set_timeline_visible(current.visible);
        query.set_timeline_zoom_level(current.zoom_level);
        query.set_timeline_labels(&current.labels);
        false
    }

    fn update(&self, value: Self::Value) {
        self.space.timeline.put(value);
    }
}
