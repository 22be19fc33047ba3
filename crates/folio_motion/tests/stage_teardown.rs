//! Integration tests for mounting and tearing down components
//!
//! These tests verify that:
//! - Every component kind can be mounted and driven through the stage
//! - Unmounting removes all of a component's listeners
//! - Events and frames never reach a torn-down component, even through a
//!   handle the host kept around

use folio_core::content::{GallerySection, TimelineItem, TimelineSection};
use folio_core::events::{event_types, Event, EventData};
use folio_core::geometry::Rect;
use folio_motion::stage::{Component, Stage};
use folio_motion::{
    Carousel, CarouselConfig, NavVisibility, OrbitConfig, OrbitalLayout, PageConfig,
    PointerTracker, RevealGroup, RevealStyle, ScrollProgress, TiltCard, TiltConfig,
    TimelineConfig, TrailConfig, WheelSmoother,
};

fn orbit() -> OrbitalLayout {
    OrbitalLayout::new(
        OrbitConfig::default(),
        vec![
            TimelineItem::new(1, "Front-end").with_related([2]),
            TimelineItem::new(2, "Back-end"),
            TimelineItem::new(3, "Design"),
        ],
    )
}

fn rotation_of(stage: &Stage, id: folio_core::WidgetId) -> Option<f32> {
    stage
        .with_component(id, |c| match c {
            Component::Orbit(orbit) => Some(orbit.state().rotation),
            _ => None,
        })
        .flatten()
}

#[test]
fn test_mount_every_component_kind() {
    let mut stage = Stage::new();
    let page = PageConfig::default();

    stage.mount(PointerTracker::new(&TrailConfig::default()));
    stage.mount(TiltCard::new(TiltConfig::default(), "portrait.png"));
    stage.mount(orbit());
    stage.mount(ScrollProgress::new(
        TimelineConfig::default(),
        TimelineSection::default(),
    ));
    stage.mount(Carousel::new(
        CarouselConfig::default(),
        GallerySection::default(),
    ));
    stage.mount(NavVisibility::new(&page));
    stage.mount(WheelSmoother::new(&page));
    stage.mount(RevealGroup::new(RevealStyle::section(), 4));

    assert_eq!(stage.len(), 8);
    // 2 + 3 + 4 + 2 + 7 + 2 + 2 + 0
    assert_eq!(stage.listener_count(), 22);
}

#[test]
fn test_unmount_removes_listeners() {
    let mut stage = Stage::new();
    let trail = stage.mount(PointerTracker::new(&TrailConfig::default()));
    let orbit = stage.mount(orbit());
    assert_eq!(stage.listener_count(), 6);

    assert!(stage.unmount(orbit));
    assert_eq!(stage.listener_count(), 2);
    assert!(stage.is_mounted(trail));
    assert!(!stage.is_mounted(orbit));
}

#[test]
fn test_events_to_unmounted_widget_are_dropped() {
    let mut stage = Stage::new();
    let id = stage.mount(orbit());
    let handle = stage.component(id).unwrap();

    assert!(stage.unmount(id));

    let handled = stage.dispatch(Event::new(
        event_types::NODE_CLICK,
        id,
        EventData::Item { id: 1, source: None },
    ));
    assert_eq!(handled, 0);

    // The host's stale handle shows the click never landed
    let expanded = match &*handle.lock().unwrap() {
        Component::Orbit(orbit) => orbit.state().expanded,
        _ => panic!("expected orbit"),
    };
    assert_eq!(expanded, None);
}

#[test]
fn test_frames_stop_after_unmount() {
    let mut stage = Stage::new();
    let id = stage.mount(orbit());
    let handle = stage.component(id).unwrap();

    stage.frame(0.05);
    assert!((rotation_of(&stage, id).unwrap() - 0.3).abs() < 1e-3);

    stage.unmount(id);
    for _ in 0..20 {
        assert_eq!(stage.frame(0.05), 0);
    }

    let rotation = match &*handle.lock().unwrap() {
        Component::Orbit(orbit) => orbit.state().rotation,
        _ => panic!("expected orbit"),
    };
    assert!((rotation - 0.3).abs() < 1e-3);
    assert_eq!(rotation_of(&stage, id), None);
}

#[test]
fn test_stage_drives_orbit_selection_and_visibility() {
    let mut stage = Stage::new();
    let id = stage.mount(orbit());

    stage.dispatch(Event::new(
        event_types::NODE_CLICK,
        id,
        EventData::Item { id: 2, source: None },
    ));
    stage.frame(1.0);
    let parked = rotation_of(&stage, id).unwrap();

    // Selected: no auto-rotation
    stage.frame(0.2);
    assert_eq!(rotation_of(&stage, id), Some(parked));

    stage.dispatch(Event::new(event_types::BACKGROUND_CLICK, id, EventData::None));
    stage.dispatch(Event::new(
        event_types::VISIBILITY,
        id,
        EventData::Visibility { ratio: 0.05 },
    ));
    // Out of view: still parked
    stage.frame(0.2);
    assert_eq!(rotation_of(&stage, id), Some(parked));

    stage.dispatch(Event::new(
        event_types::VISIBILITY,
        id,
        EventData::Visibility { ratio: 0.9 },
    ));
    stage.frame(0.05);
    assert!(rotation_of(&stage, id).unwrap() > parked);
}

#[test]
fn test_scroll_event_reaches_timeline_and_nav() {
    let mut stage = Stage::new();
    let timeline = stage.mount(ScrollProgress::new(
        TimelineConfig::default(),
        TimelineSection::default(),
    ));
    let nav = stage.mount(NavVisibility::new(&PageConfig::default()));

    stage.dispatch(Event::new(
        event_types::CONTENT_CHANGED,
        timeline,
        EventData::Content { height: 1000.0 },
    ));
    for target in [timeline, nav] {
        stage.dispatch(Event::new(
            event_types::SCROLL,
            target,
            EventData::Scroll {
                scroll_y: 900.0,
                viewport_height: 1000.0,
                target: Rect::new(0.0, -700.0, 1200.0, 2000.0),
            },
        ));
    }
    stage.frame(1.0 / 60.0);

    let line = stage.with_component(timeline, |c| match c {
        Component::Timeline(t) => t.line_height(),
        _ => 0.0,
    });
    assert!((line.unwrap() - 500.0).abs() < 0.1);

    let visible = stage.with_component(nav, |c| match c {
        Component::Nav(n) => n.is_visible(),
        _ => true,
    });
    assert_eq!(visible, Some(false));
}
