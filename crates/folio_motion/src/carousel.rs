//! Auto-scrolling project carousel
//!
//! A row of cards that drifts continuously while it is on screen. Hover
//! and keyboard focus stop the drift; leaving the viewport stops it too,
//! and coming back starts it again. Previous/next buttons always work,
//! ease to the neighbouring card and restart the auto-scroll delay so the
//! drift does not fight the manual move.
//!
//! The track loops only when there is more than one card.

use folio_animation::{Easing, Tween};
use folio_core::content::{GalleryCard, GallerySection};
use folio_core::events::{event_types, Event, EventData, EventType};
use folio_core::fsm::{Machine, StateTransitions};
use folio_core::geometry::Rect;
use serde::{Deserialize, Serialize};

use crate::visibility::VisibilityObserver;

/// Auto-scroll playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PlaybackState {
    Playing,
    #[default]
    Stopped,
}

impl StateTransitions for PlaybackState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (PlaybackState::Stopped, VIEW_ENTER) => Some(PlaybackState::Playing),
            (PlaybackState::Stopped, POINTER_LEAVE) => Some(PlaybackState::Playing),
            (PlaybackState::Playing, VIEW_LEAVE) => Some(PlaybackState::Stopped),
            (PlaybackState::Playing, POINTER_ENTER) => Some(PlaybackState::Stopped),
            (PlaybackState::Playing, FOCUS_IN) => Some(PlaybackState::Stopped),
            _ => None,
        }
    }
}

/// Carousel configuration (`[carousel]` in `folio.toml`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Drift in pixels per 60 Hz frame
    pub speed: f32,
    pub visibility_threshold: f32,
    /// Pause before drifting resumes after a manual move
    pub start_delay_ms: u32,
    pub slide_width: f32,
    pub gap: f32,
    /// Ease duration of a manual previous/next move, in seconds
    pub nav_duration: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            speed: 1.1,
            visibility_threshold: 0.25,
            start_delay_ms: 0,
            slide_width: 320.0,
            gap: 20.0,
            nav_duration: 0.45,
        }
    }
}

/// Carousel state exposed to the renderer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CarouselFrame {
    /// Track offset in pixels
    pub offset: f32,
    pub selected_index: usize,
    pub playback: PlaybackState,
    pub can_scroll_prev: bool,
    pub can_scroll_next: bool,
}

/// The project gallery carousel
#[derive(Clone, Debug)]
pub struct Carousel {
    config: CarouselConfig,
    section: GallerySection,
    playback: Machine<PlaybackState>,
    visibility: VisibilityObserver,
    offset: Tween,
    /// Seconds left before the drift resumes
    resume_in: f32,
}

impl Carousel {
    pub fn new(config: CarouselConfig, section: GallerySection) -> Self {
        let visibility = VisibilityObserver::new(config.visibility_threshold, false);
        Self {
            config,
            section,
            playback: Machine::new(PlaybackState::Stopped),
            visibility,
            offset: Tween::new(0.0),
            resume_in: 0.0,
        }
    }

    pub fn cards(&self) -> &[GalleryCard] {
        &self.section.items
    }

    pub fn title(&self) -> Option<&str> {
        self.section.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.section.description.as_deref()
    }

    pub fn len(&self) -> usize {
        self.section.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.section.items.is_empty()
    }

    /// Looping needs at least two cards; a single card is static
    pub fn is_looping(&self) -> bool {
        self.len() > 1
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback.current()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_in(PlaybackState::Playing)
    }

    pub fn is_in_view(&self) -> bool {
        self.visibility.is_in_view()
    }

    fn pitch(&self) -> f32 {
        (self.config.slide_width + self.config.gap).max(1.0)
    }

    fn track_length(&self) -> f32 {
        self.pitch() * self.len() as f32
    }

    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    /// Card nearest to the start edge
    pub fn selected_index(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let snap = (self.offset.value() / self.pitch()).round() as i64;
        snap.rem_euclid(self.len() as i64) as usize
    }

    /// A looping track always has a neighbour; a static one has none
    pub fn can_scroll_prev(&self) -> bool {
        self.is_looping()
    }

    pub fn can_scroll_next(&self) -> bool {
        self.is_looping()
    }

    fn send(&mut self, event: EventType) {
        if let Some(state) = self.playback.send(event) {
            tracing::debug!(?state, event, "carousel playback changed");
        }
    }

    /// Feed a visible ratio from the host's intersection measurement
    pub fn observe_ratio(&mut self, ratio: f32) {
        match self.visibility.observe_ratio(ratio) {
            Some(true) => self.send(event_types::VIEW_ENTER),
            Some(false) => self.send(event_types::VIEW_LEAVE),
            None => {}
        }
    }

    /// Measure the container against the viewport; unmeasured rects are skipped
    pub fn observe(&mut self, container: &Rect, viewport: &Rect) {
        match self.visibility.observe(container, viewport) {
            Some(true) => self.send(event_types::VIEW_ENTER),
            Some(false) => self.send(event_types::VIEW_LEAVE),
            None => {}
        }
    }

    pub fn on_pointer_enter(&mut self) {
        self.send(event_types::POINTER_ENTER);
    }

    /// Resumes the drift, but only while the carousel is on screen
    pub fn on_pointer_leave(&mut self) {
        if self.visibility.is_in_view() {
            self.send(event_types::POINTER_LEAVE);
        }
    }

    pub fn on_focus_in(&mut self) {
        self.send(event_types::FOCUS_IN);
    }

    fn ease_to(&mut self, offset: f32) {
        self.offset
            .retarget(offset, self.config.nav_duration, Easing::EaseOut);
        self.resume_in = self.config.start_delay_ms as f32 / 1000.0;
    }

    fn current_snap(&self) -> f32 {
        (self.offset.target() / self.pitch()).round()
    }

    /// Ease to the previous card; returns false if there is none
    pub fn scroll_prev(&mut self) -> bool {
        if !self.can_scroll_prev() {
            return false;
        }
        let target = (self.current_snap() - 1.0) * self.pitch();
        self.ease_to(target);
        true
    }

    /// Ease to the next card; returns false if there is none
    pub fn scroll_next(&mut self) -> bool {
        if !self.can_scroll_next() {
            return false;
        }
        let target = (self.current_snap() + 1.0) * self.pitch();
        self.ease_to(target);
        true
    }

    /// Ease to card `index` (dot navigation)
    pub fn scroll_to(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        let target = index as f32 * self.pitch();
        self.ease_to(target);
        true
    }

    pub fn on_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::POINTER_ENTER, _) => self.on_pointer_enter(),
            (event_types::POINTER_LEAVE, _) => self.on_pointer_leave(),
            (event_types::FOCUS_IN, _) => self.on_focus_in(),
            (event_types::VISIBILITY, EventData::Visibility { ratio }) => {
                self.observe_ratio(*ratio)
            }
            (event_types::NAV_PREV, _) => return self.scroll_prev(),
            (event_types::NAV_NEXT, _) => return self.scroll_next(),
            (event_types::NAV_TO, EventData::Index(index)) => return self.scroll_to(*index),
            _ => return false,
        }
        true
    }

    /// Advance the manual ease or the drift by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if !self.offset.is_finished() {
            self.offset.step(dt);
            if self.offset.is_finished() {
                self.wrap();
            }
            return;
        }

        if !self.is_playing() || !self.is_looping() {
            return;
        }

        if self.resume_in > 0.0 {
            self.resume_in = (self.resume_in - dt).max(0.0);
            return;
        }

        let drift = self.config.speed * 60.0 * dt;
        self.offset.set_immediate(self.offset.value() + drift);
        self.wrap();
    }

    fn wrap(&mut self) {
        if !self.is_looping() {
            return;
        }
        let wrapped = self.offset.value().rem_euclid(self.track_length());
        self.offset.set_immediate(wrapped);
    }

    pub fn is_animating(&self) -> bool {
        !self.offset.is_finished() || (self.is_playing() && self.is_looping())
    }

    pub fn frame(&self) -> CarouselFrame {
        CarouselFrame {
            offset: self.offset.value(),
            selected_index: self.selected_index(),
            playback: self.playback(),
            can_scroll_prev: self.can_scroll_prev(),
            can_scroll_next: self.can_scroll_next(),
        }
    }
}
