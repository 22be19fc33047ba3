//! Cross-component behaviour checks
//!
//! These tests sweep item counts, rotations and scroll positions to check
//! that:
//! - Orbit angles are distinct and evenly spaced for any rotation
//! - Selecting an item parks it at the top of the orbit
//! - At most one item is ever expanded, and a background click always
//!   returns to the initial selection state
//! - Tilt, scroll progress and carousel playback respond within one tick

use folio_core::content::{GallerySection, TimelineItem};
use folio_core::geometry::{Point, Rect};
use folio_motion::carousel::{Carousel, CarouselConfig, PlaybackState};
use folio_motion::orbit::{orbit_angle, OrbitConfig, OrbitPosition, OrbitalLayout, FOCUS_ANGLE};
use folio_motion::scroll_progress::scroll_fraction;
use folio_motion::tilt::tilt_angles;
use rustc_hash::FxHashSet;

const ROTATIONS: [f32; 7] = [0.0, 0.3, 45.0, 150.0, 269.7, 359.9, 720.5];

fn items(n: u32) -> Vec<TimelineItem> {
    (1..=n)
        .map(|id| {
            let next = id % n + 1;
            TimelineItem::new(id, format!("Item {id}")).with_related([next])
        })
        .collect()
}

/// Smallest distance between two angles on the circle
fn circular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[test]
fn test_angles_evenly_spaced_for_any_rotation() {
    for n in 1..=12usize {
        let step = 360.0 / n as f32;
        for rotation in ROTATIONS {
            let angles: Vec<f32> = (0..n).map(|i| orbit_angle(i, n, rotation)).collect();

            for angle in &angles {
                assert!((0.0..360.0).contains(angle), "angle {angle} out of range");
            }

            for i in 0..n {
                let next = angles[(i + 1) % n];
                let gap = (next - angles[i]).rem_euclid(360.0);
                let expected = if n == 1 { 0.0 } else { step };
                assert!(
                    circular_distance(gap, expected) < 1e-3,
                    "n={n} rotation={rotation} gap={gap}"
                );
            }

            for i in 0..n {
                for j in (i + 1)..n {
                    assert!(circular_distance(angles[i], angles[j]) > 1e-3);
                }
            }
        }
    }
}

#[test]
fn test_selection_parks_item_at_top() {
    for n in 1..=10u32 {
        let mut orbit = OrbitalLayout::new(OrbitConfig::default(), items(n));
        for (index, id) in (1..=n).enumerate() {
            orbit.toggle(id);
            let rotation = orbit.state().rotation;
            let angle = orbit_angle(index, n as usize, rotation);
            assert!(
                circular_distance(angle, FOCUS_ANGLE) < 1e-3,
                "n={n} id={id} angle={angle}"
            );

            let position = OrbitPosition::compute(index, n as usize, rotation, 100.0);
            assert!(position.x.abs() < 1e-2);
            assert!((position.y + 100.0).abs() < 1e-2);
        }
    }
}

#[test]
fn test_six_skills_example() {
    let skills = vec![
        TimelineItem::new(1, "Front-end").with_related([2, 4]),
        TimelineItem::new(2, "Back-end").with_related([1, 3]),
        TimelineItem::new(3, "UI Design").with_related([1, 5]),
        TimelineItem::new(4, "Mobile").with_related([1]),
        TimelineItem::new(5, "DevOps").with_related([2, 6]),
        TimelineItem::new(6, "Data").with_related([5]),
    ];
    let mut orbit = OrbitalLayout::new(OrbitConfig::default(), skills);

    orbit.toggle(3);

    let state = orbit.state();
    let expected: FxHashSet<u32> = [1, 5].into_iter().collect();
    assert_eq!(state.pulsing, expected);
    assert!((state.rotation - 150.0).abs() < 1e-3);
    assert_eq!(state.expanded, Some(3));
    assert!(!state.auto_rotating);
}

#[test]
fn test_single_expansion_and_escape() {
    let mut orbit = OrbitalLayout::new(OrbitConfig::default(), items(5));

    // A then B from A's panel: A collapses in the same transition
    orbit.toggle(1);
    orbit.select_related(2);
    let expanded: Vec<u32> = orbit
        .node_views()
        .iter()
        .filter(|v| v.expanded)
        .map(|v| v.id)
        .collect();
    assert_eq!(expanded, [2]);

    let sequences: [&[u32]; 4] = [&[], &[3], &[3, 3], &[1, 4, 5]];
    for clicks in sequences {
        let mut orbit = OrbitalLayout::new(OrbitConfig::default(), items(5));
        for &id in clicks {
            orbit.toggle(id);
            orbit.tick(0.2);
        }
        orbit.background_click();

        let state = orbit.state();
        assert_eq!(state.expanded, None);
        assert!(state.pulsing.is_empty());
        assert!(state.auto_rotating);
        assert!(orbit.node_views().iter().all(|v| !v.expanded && !v.related));
    }
}

#[test]
fn test_tilt_centre_and_corners() {
    let surfaces = [
        Rect::new(0.0, 0.0, 300.0, 400.0),
        Rect::new(120.0, 80.0, 50.0, 50.0),
        Rect::new(-40.0, 900.0, 1024.0, 10.0),
    ];
    for surface in surfaces {
        for amplitude in [10.0, 12.0, 14.0] {
            let centre = tilt_angles(&surface, surface.center(), amplitude).unwrap();
            assert_eq!((centre.rotate_x, centre.rotate_y), (0.0, 0.0));

            let corner = Point::new(surface.right(), surface.bottom());
            let angles = tilt_angles(&surface, corner, amplitude).unwrap();
            assert!((angles.rotate_x + amplitude).abs() < 1e-3);
            assert!((angles.rotate_y - amplitude).abs() < 1e-3);
        }
    }
}

#[test]
fn test_scroll_progress_monotonic_and_clamped() {
    for height in [300.0, 1200.0, 4000.0] {
        let mut last = 0.0f32;
        let mut top = 1500.0;
        while top > -6000.0 {
            let target = Rect::new(0.0, top, 900.0, height);
            let progress = scroll_fraction(&target, 900.0, 0.1, 0.5).unwrap();
            assert!((0.0..=1.0).contains(&progress));
            assert!(progress >= last, "height={height} top={top}");
            last = progress;
            top -= 25.0;
        }
        assert_eq!(last, 1.0);
    }
}

#[test]
fn test_carousel_responds_within_one_tick() {
    let section = GallerySection {
        title: None,
        description: None,
        items: Vec::new(),
    };
    let mut carousel = Carousel::new(CarouselConfig::default(), section);

    carousel.observe_ratio(0.8);
    carousel.tick(1.0 / 60.0);
    assert_eq!(carousel.playback(), PlaybackState::Playing);

    carousel.on_pointer_enter();
    assert_eq!(carousel.playback(), PlaybackState::Stopped);

    carousel.on_pointer_leave();
    carousel.observe_ratio(0.0);
    assert_eq!(carousel.playback(), PlaybackState::Stopped);

    carousel.observe_ratio(0.3);
    assert_eq!(carousel.playback(), PlaybackState::Playing);
}
