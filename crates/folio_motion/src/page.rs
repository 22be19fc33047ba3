//! Page-level behaviours
//!
//! Settings shared by the page chrome, and the floating nav's
//! show/hide rule. The nav is shown while scrolling up, near the top of
//! the page, or while the viewport centre is inside the "about" section.
//! Scroll events are coalesced so the rule runs at most once per frame.

use folio_core::events::{event_types, Event, EventData};
use serde::{Deserialize, Serialize};

fn default_nav_near_top() -> f32 {
    40.0
}

fn default_wheel_multiplier() -> f32 {
    45.0
}

fn default_wheel_duration() -> f32 {
    1.05
}

/// Page configuration (`[page]` in `folio.toml`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Scroll offset under which the nav is always shown
    #[serde(default = "default_nav_near_top")]
    pub nav_near_top: f32,

    /// Pixels scrolled per unit of wheel delta
    #[serde(default = "default_wheel_multiplier")]
    pub wheel_multiplier: f32,

    /// Seconds to ease toward the wheel target
    #[serde(default = "default_wheel_duration")]
    pub wheel_duration: f32,

    /// User prefers reduced motion; disables wheel smoothing
    #[serde(default)]
    pub reduced_motion: bool,

    /// Touch or other coarse pointer; disables wheel smoothing
    #[serde(default)]
    pub coarse_pointer: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            nav_near_top: default_nav_near_top(),
            wheel_multiplier: default_wheel_multiplier(),
            wheel_duration: default_wheel_duration(),
            reduced_motion: false,
            coarse_pointer: false,
        }
    }
}

/// Vertical extent of a section in document coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSpan {
    pub top: f32,
    pub height: f32,
}

impl SectionSpan {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Inclusive at both edges
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y <= self.top + self.height
    }
}

/// Show/hide state of the floating nav
#[derive(Clone, Debug)]
pub struct NavVisibility {
    near_top: f32,
    visible: bool,
    last_scroll_y: f32,
    viewport_height: f32,
    about: Option<SectionSpan>,
    pending: Option<f32>,
}

impl NavVisibility {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            near_top: config.nav_near_top,
            visible: true,
            last_scroll_y: 0.0,
            viewport_height: 0.0,
            about: None,
            pending: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        if height.is_finite() && height > 0.0 {
            self.viewport_height = height;
        }
    }

    /// Position of the section that keeps the nav pinned
    pub fn set_about_section(&mut self, span: Option<SectionSpan>) {
        self.about = span;
    }

    /// Queue a scroll position; only the latest one per frame is evaluated
    pub fn on_scroll(&mut self, scroll_y: f32) {
        self.pending = Some(scroll_y);
    }

    pub fn on_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (
                event_types::SCROLL,
                EventData::Scroll {
                    scroll_y,
                    viewport_height,
                    ..
                },
            ) => {
                self.set_viewport_height(*viewport_height);
                self.on_scroll(*scroll_y);
                true
            }
            (event_types::RESIZE, EventData::Resize { height, .. }) => {
                self.set_viewport_height(*height);
                true
            }
            _ => false,
        }
    }

    /// Evaluate the queued scroll position; returns the new visibility if
    /// it changed
    pub fn frame(&mut self) -> Option<bool> {
        let scroll_y = self.pending.take()?;
        self.evaluate(scroll_y)
    }

    /// Apply the visibility rule to `scroll_y` immediately
    pub fn evaluate(&mut self, scroll_y: f32) -> Option<bool> {
        let scrolling_up = scroll_y < self.last_scroll_y;
        let near_top = scroll_y < self.near_top;
        let viewport_centre = scroll_y + self.viewport_height / 2.0;
        let within_about = self
            .about
            .is_some_and(|span| span.contains(viewport_centre));

        self.last_scroll_y = scroll_y;

        let show = scrolling_up || near_top || within_about;
        if show == self.visible {
            return None;
        }
        self.visible = show;
        tracing::debug!(show, scroll_y, "nav visibility changed");
        Some(show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> NavVisibility {
        let mut nav = NavVisibility::new(&PageConfig::default());
        nav.set_viewport_height(800.0);
        nav.set_about_section(Some(SectionSpan::new(2000.0, 1000.0)));
        nav
    }

    #[test]
    fn test_hides_scrolling_down_shows_scrolling_up() {
        let mut nav = nav();
        assert_eq!(nav.evaluate(10.0), None);
        assert_eq!(nav.evaluate(300.0), Some(false));
        assert_eq!(nav.evaluate(600.0), None);
        assert_eq!(nav.evaluate(550.0), Some(true));
    }

    #[test]
    fn test_near_top_shows_while_scrolling_down() {
        let mut nav = nav();
        assert_eq!(nav.evaluate(30.0), None);
        assert!(nav.is_visible());
        assert_eq!(nav.evaluate(41.0), Some(false));
    }

    #[test]
    fn test_about_section_pins_nav() {
        let mut nav = nav();
        nav.evaluate(1000.0);
        assert!(!nav.is_visible());

        // Centre at 1700 + 400 = 2100, inside the section
        assert_eq!(nav.evaluate(1700.0), Some(true));
        assert_eq!(nav.evaluate(2400.0), None);
        // Centre past the section
        assert_eq!(nav.evaluate(2700.0), Some(false));
    }

    #[test]
    fn test_scroll_events_coalesce_per_frame() {
        let mut nav = nav();
        nav.on_scroll(100.0);
        nav.on_scroll(400.0);
        nav.on_scroll(900.0);
        assert_eq!(nav.frame(), Some(false));
        // Nothing queued
        assert_eq!(nav.frame(), None);
    }

    #[test]
    fn test_config_defaults_from_empty_toml() {
        let config: PageConfig = toml::from_str("").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.wheel_multiplier, 45.0);
    }
}
