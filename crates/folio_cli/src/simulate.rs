//! Deterministic frame simulations
//!
//! Each function drives one component with a fixed frame delta and
//! returns a serializable report, so the CLI can print what a page would
//! render without a browser.

use folio_core::events::{event_types, Event, EventData};
use folio_core::{GallerySection, ItemId, Point, Rect, TimelineItem, TimelineSection};
use folio_motion::stage::{Component, Stage};
use folio_motion::{
    Carousel, CarouselConfig, CarouselFrame, NodeView, OrbitConfig, OrbitalLayout,
    PointerTracker, PointerTrailNode, ProgressFrame, ScrollProgress, TiltAngles, TiltCard,
    TiltConfig, TiltTransform, TimelineConfig, TrailConfig,
};
use serde::Serialize;

/// Fixed frame clock
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    pub frames: usize,
    pub dt: f32,
}

impl FrameClock {
    pub fn new(frames: usize, fps: f32) -> Self {
        let dt = if fps > 0.0 { 1.0 / fps } else { 1.0 / 60.0 };
        Self { frames, dt }
    }
}

#[derive(Debug, Serialize)]
pub struct OrbitReport {
    pub rotation: f32,
    pub auto_rotating: bool,
    pub expanded: Option<ItemId>,
    pub pulsing: Vec<ItemId>,
    pub nodes: Vec<NodeView>,
}

/// Mount an orbit, optionally click one node, and run the clock
pub fn orbit(
    config: &OrbitConfig,
    skills: Vec<TimelineItem>,
    select: Option<ItemId>,
    clock: FrameClock,
) -> OrbitReport {
    let mut stage = Stage::new();
    let id = stage.mount(OrbitalLayout::new(config.clone(), skills));

    if let Some(item) = select {
        let handled = stage.dispatch(Event::new(
            event_types::NODE_CLICK,
            id,
            EventData::Item {
                id: item,
                source: None,
            },
        ));
        tracing::debug!(item, handled, "orbit node clicked");
    }

    for _ in 0..clock.frames {
        stage.frame(clock.dt);
    }

    let report = stage.with_component(id, |component| match component {
        Component::Orbit(orbit) => {
            let state = orbit.state();
            let mut pulsing: Vec<ItemId> = state.pulsing.iter().copied().collect();
            pulsing.sort_unstable();
            Some(OrbitReport {
                rotation: state.rotation,
                auto_rotating: state.auto_rotating,
                expanded: state.expanded,
                pulsing,
                nodes: orbit.node_views(),
            })
        }
        _ => None,
    });
    stage.unmount(id);

    report.flatten().unwrap_or(OrbitReport {
        rotation: 0.0,
        auto_rotating: false,
        expanded: None,
        pulsing: Vec::new(),
        nodes: Vec::new(),
    })
}

#[derive(Debug, Serialize)]
pub struct TiltReport {
    pub target: TiltAngles,
    pub hovered: TiltTransform,
    pub released: TiltTransform,
}

/// Hover `surface` at `pointer` for the clock, then leave for the clock
pub fn tilt(config: &TiltConfig, surface: Rect, pointer: Point, clock: FrameClock) -> TiltReport {
    let mut card = TiltCard::new(config.clone(), "portrait");
    card.set_surface(surface);
    card.on_pointer_enter();
    card.on_pointer_move(pointer);
    let target = card.target_angles();

    for _ in 0..clock.frames {
        card.tick(clock.dt);
    }
    let hovered = card.transform();

    card.on_pointer_leave();
    for _ in 0..clock.frames {
        card.tick(clock.dt);
    }

    TiltReport {
        target,
        hovered,
        released: card.transform(),
    }
}

#[derive(Debug, Serialize)]
pub struct TrailSample {
    pub frame: usize,
    pub nodes: Vec<PointerTrailNode>,
}

/// Jump the pointer to `to` and sample the blobs every `every` frames
pub fn trail(config: &TrailConfig, to: Point, clock: FrameClock, every: usize) -> Vec<TrailSample> {
    let every = every.max(1);
    let mut tracker = PointerTracker::new(config);
    tracker.on_pointer_move(to);

    let mut samples = Vec::new();
    for frame in 1..=clock.frames {
        tracker.tick(clock.dt);
        if frame % every == 0 || frame == clock.frames {
            samples.push(TrailSample {
                frame,
                nodes: tracker.nodes(),
            });
        }
    }
    samples
}

/// Most scroll positions a single sweep will sample
const MAX_PROGRESS_SAMPLES: usize = 10_000;

#[derive(Debug, Serialize)]
pub struct ProgressSample {
    pub scroll_y: f32,
    #[serde(flatten)]
    pub frame: ProgressFrame,
}

/// Scroll past a timeline section placed at `section_top` in the document
pub fn progress(
    config: &TimelineConfig,
    section: TimelineSection,
    section_top: f32,
    content_height: f32,
    viewport: Rect,
    step: f32,
) -> Vec<ProgressSample> {
    let mut timeline = ScrollProgress::new(config.clone(), section);
    timeline.set_content_height(content_height);

    let viewport_height = viewport.height;
    let end = section_top + content_height;
    if end < 0.0 || !end.is_finite() {
        return Vec::new();
    }

    let step = if step > 0.0 && step.is_finite() {
        step
    } else {
        viewport_height / 10.0
    };
    let wanted = if step > 0.0 && step.is_finite() {
        (end / step).floor() as usize
    } else {
        0
    };
    let (count, step) = if wanted > MAX_PROGRESS_SAMPLES {
        tracing::warn!(step, end, "progress step too small, widening to fit the sample cap");
        (MAX_PROGRESS_SAMPLES, end / MAX_PROGRESS_SAMPLES as f32)
    } else {
        (wanted, step)
    };

    let mut samples = Vec::with_capacity(count + 1);
    for i in 0..=count {
        let scroll_y = i as f32 * step;
        let target = Rect::new(0.0, section_top - scroll_y, viewport.width, content_height);
        timeline.on_scroll(&target, viewport_height);
        samples.push(ProgressSample {
            scroll_y,
            frame: timeline.frame(),
        });
    }
    samples
}

/// Scroll a carousel into view, play it, and optionally hover it at
/// `hover_at` frames in
pub fn carousel(
    config: &CarouselConfig,
    gallery: GallerySection,
    clock: FrameClock,
    hover_at: Option<usize>,
    every: usize,
) -> Vec<CarouselFrame> {
    let every = every.max(1);
    let mut carousel = Carousel::new(config.clone(), gallery);
    carousel.observe_ratio(1.0);

    let mut frames = Vec::new();
    for frame in 1..=clock.frames {
        if hover_at == Some(frame) {
            carousel.on_pointer_enter();
        }
        carousel.tick(clock.dt);
        if frame % every == 0 || frame == clock.frames {
            frames.push(carousel.frame());
        }
    }
    frames
}
