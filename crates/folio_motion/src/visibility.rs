//! Viewport visibility tracking
//!
//! The intersection-observer half of the orbit and carousel: a component
//! counts as in view while at least `threshold` of its area is inside the
//! viewport. Only edges are reported, so callers can start and stop work
//! exactly once per crossing.

use folio_core::geometry::Rect;

/// Edge-triggered visibility state for one element
#[derive(Clone, Debug)]
pub struct VisibilityObserver {
    threshold: f32,
    in_view: bool,
}

impl VisibilityObserver {
    /// `threshold` is the visible fraction (0.0 to 1.0) needed to count as
    /// in view; `initially_visible` is assumed until the first measurement
    pub fn new(threshold: f32, initially_visible: bool) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            in_view: initially_visible,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_in_view(&self) -> bool {
        self.in_view
    }

    /// Feed a freshly computed visible ratio; returns the new state on a
    /// crossing, `None` if nothing changed
    pub fn observe_ratio(&mut self, ratio: f32) -> Option<bool> {
        if !ratio.is_finite() {
            return None;
        }

        let visible = if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        };

        if visible == self.in_view {
            return None;
        }

        self.in_view = visible;
        tracing::debug!(ratio, visible, "visibility crossed threshold");
        Some(visible)
    }

    /// Measure `target` against `viewport`. Unmeasured targets are skipped.
    pub fn observe(&mut self, target: &Rect, viewport: &Rect) -> Option<bool> {
        let ratio = target.visible_ratio(viewport)?;
        self.observe_ratio(ratio)
    }
}
