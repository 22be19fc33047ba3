//! Scroll-synced timeline progress
//!
//! Tracks how far a container has been scrolled through a window defined
//! by two viewport offsets: progress is 0 when the container's top meets
//! `start_offset` of the viewport height and 1 when its bottom meets
//! `end_offset`. Progress drives a growing vertical line and a short
//! opacity fade-in.

use folio_core::content::{TimelineEntry, TimelineSection};
use folio_core::events::{event_types, Event, EventData};
use folio_core::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Timeline configuration (`[timeline]` in `folio.toml`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Viewport fraction the container's top must reach for progress 0
    pub start_offset: f32,
    /// Viewport fraction the container's bottom must reach for progress 1
    pub end_offset: f32,
    /// Progress over which the line fades in
    pub fade_span: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            start_offset: 0.1,
            end_offset: 0.5,
            fade_span: 0.1,
        }
    }
}

/// Progress of `target` (in viewport coordinates) through the window, in
/// `[0, 1]`.
///
/// Returns `None` while the target or viewport is unmeasured.
pub fn scroll_fraction(target: &Rect, viewport_height: f32, start: f32, end: f32) -> Option<f32> {
    if !target.is_measured() || viewport_height <= 0.0 || !viewport_height.is_finite() {
        return None;
    }

    let start_line = start * viewport_height;
    let end_top = end * viewport_height - target.height;
    let span = start_line - end_top;

    if span <= f32::EPSILON {
        // Container shorter than the gap between the offsets: the window
        // collapses to a step at the start line
        return Some(if target.top() <= start_line { 1.0 } else { 0.0 });
    }

    Some(((start_line - target.top()) / span).clamp(0.0, 1.0))
}

/// One rendered frame of the timeline line
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ProgressFrame {
    pub progress: f32,
    /// Height of the filled line in pixels
    pub line_height: f32,
    pub opacity: f32,
}

/// The scroll-synced experience timeline
#[derive(Clone, Debug)]
pub struct ScrollProgress {
    config: TimelineConfig,
    section: TimelineSection,
    content_height: f32,
    progress: f32,
}

impl ScrollProgress {
    pub fn new(config: TimelineConfig, section: TimelineSection) -> Self {
        Self {
            config,
            section,
            content_height: 0.0,
            progress: 0.0,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.section.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.section.description.as_deref()
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.section.entries
    }

    /// Replace the entries. The host must report the new content height.
    pub fn set_entries(&mut self, entries: Vec<TimelineEntry>) {
        self.section.entries = entries;
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Record the measured height of the entry list; unmeasured heights are
    /// ignored and the previous measurement kept
    pub fn set_content_height(&mut self, height: f32) {
        if height.is_finite() && height >= 0.0 {
            self.content_height = height;
        } else {
            tracing::warn!(height, "ignoring invalid timeline content height");
        }
    }

    /// Recompute progress from the container rect; returns false if the
    /// frame was skipped
    pub fn on_scroll(&mut self, container: &Rect, viewport_height: f32) -> bool {
        match scroll_fraction(
            container,
            viewport_height,
            self.config.start_offset,
            self.config.end_offset,
        ) {
            Some(progress) => {
                self.progress = progress;
                tracing::trace!(progress, "timeline progress");
                true
            }
            None => false,
        }
    }

    pub fn on_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (
                event_types::SCROLL,
                EventData::Scroll {
                    viewport_height,
                    target,
                    ..
                },
            ) => self.on_scroll(target, *viewport_height),
            (event_types::CONTENT_CHANGED, EventData::Content { height }) => {
                self.set_content_height(*height);
                true
            }
            _ => false,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn line_height(&self) -> f32 {
        self.progress * self.content_height
    }

    pub fn opacity(&self) -> f32 {
        if self.config.fade_span <= 0.0 {
            return if self.progress > 0.0 { 1.0 } else { 0.0 };
        }
        (self.progress / self.config.fade_span).clamp(0.0, 1.0)
    }

    pub fn frame(&self) -> ProgressFrame {
        ProgressFrame {
            progress: self.progress,
            line_height: self.line_height(),
            opacity: self.opacity(),
        }
    }
}
