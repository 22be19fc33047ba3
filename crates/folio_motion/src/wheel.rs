//! Smoothed wheel scrolling
//!
//! Wheel deltas accumulate into a scroll target clamped to the page, and
//! the page eases toward it with a restartable tween. Ctrl+wheel (zoom)
//! is passed through untouched and resyncs the target to wherever the
//! page actually is. Smoothing is off for coarse pointers and for users
//! who prefer reduced motion.

use folio_animation::{Easing, Tween};
use folio_core::events::{event_types, Event, EventData};

use crate::page::PageConfig;

/// Drives the page scroll offset from wheel input
#[derive(Clone, Debug)]
pub struct WheelSmoother {
    enabled: bool,
    multiplier: f32,
    duration: f32,
    max_scroll: f32,
    target: f32,
    position: Tween,
}

impl WheelSmoother {
    pub fn new(config: &PageConfig) -> Self {
        let enabled = !config.reduced_motion && !config.coarse_pointer;
        if !enabled {
            tracing::debug!(
                reduced_motion = config.reduced_motion,
                coarse_pointer = config.coarse_pointer,
                "wheel smoothing disabled"
            );
        }
        Self {
            enabled,
            multiplier: config.wheel_multiplier,
            duration: config.wheel_duration,
            max_scroll: 0.0,
            target: 0.0,
            position: Tween::new(0.0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Scrollable extent: document height minus viewport height
    pub fn set_max_scroll(&mut self, max_scroll: f32) {
        self.max_scroll = max_scroll.max(0.0);
        self.target = self.target.min(self.max_scroll);
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Current eased scroll offset
    pub fn position(&self) -> f32 {
        self.position.value()
    }

    /// Handle one wheel tick. Returns false when the host should apply
    /// the native scroll (smoothing disabled or a zoom gesture).
    pub fn on_wheel(&mut self, delta_y: f32, ctrl: bool) -> bool {
        if !self.enabled {
            return false;
        }
        if ctrl {
            self.target = self.position.value();
            return false;
        }
        if delta_y == 0.0 || !delta_y.is_finite() {
            return true;
        }

        self.target = (self.target + delta_y * self.multiplier).clamp(0.0, self.max_scroll);
        self.position
            .retarget(self.target, self.duration, Easing::Power3Out);
        tracing::trace!(target = self.target, "wheel target");
        true
    }

    /// The page was scrolled by something other than the wheel (scrollbar,
    /// keyboard, anchor link). Ignored while a wheel ease is in flight,
    /// since those scroll events are our own.
    pub fn sync_scroll(&mut self, scroll_y: f32) {
        if !self.position.is_finished() {
            return;
        }
        let scroll_y = scroll_y.clamp(0.0, self.max_scroll);
        self.target = scroll_y;
        self.position.set_immediate(scroll_y);
    }

    pub fn on_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::WHEEL, EventData::Wheel { delta_y, ctrl }) => {
                self.on_wheel(*delta_y, *ctrl)
            }
            (event_types::SCROLL, EventData::Scroll { scroll_y, .. }) => {
                self.sync_scroll(*scroll_y);
                false
            }
            _ => false,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.position.step(dt);
    }

    pub fn is_animating(&self) -> bool {
        !self.position.is_finished()
    }
}
