//! Pointer trail
//!
//! A short chain of blobs chasing the pointer. The lead blob eases in
//! quickly; the followers use a slower ease, so the chain stretches out
//! behind fast movements and gathers again when the pointer rests. When
//! the pointer leaves the window the blobs simply stop receiving targets
//! and finish easing to the last one.

use folio_animation::{Easing, Tween};
use folio_core::events::{event_types, Event};
use folio_core::geometry::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Pointer trail configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub trail_count: usize,
    /// Outer blob diameter per node; missing entries reuse the last one
    pub sizes: Vec<f32>,
    /// Inner highlight diameter per node
    pub inner_sizes: Vec<f32>,
    pub opacities: Vec<f32>,
    /// Ease duration of the lead blob, in seconds
    pub fast_duration: f32,
    /// Ease duration of the followers, in seconds
    pub slow_duration: f32,
    pub fast_ease: Easing,
    pub slow_ease: Easing,
    pub z_index: i32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            trail_count: 3,
            sizes: vec![60.0, 125.0, 75.0],
            inner_sizes: vec![20.0, 35.0, 25.0],
            opacities: vec![0.6, 0.6, 0.6],
            fast_duration: 0.1,
            slow_duration: 0.5,
            fast_ease: Easing::Power3Out,
            slow_ease: Easing::Power1Out,
            z_index: 100,
        }
    }
}

fn nth_or_last(values: &[f32], index: usize, fallback: f32) -> f32 {
    values
        .get(index)
        .or_else(|| values.last())
        .copied()
        .unwrap_or(fallback)
}

/// Snapshot of one trail blob, ready to render
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PointerTrailNode {
    /// Current eased position (blob centre)
    pub x: f32,
    pub y: f32,
    /// Where the blob is heading
    pub target_x: f32,
    pub target_y: f32,
    /// Ease duration in seconds; smaller is faster
    pub easing_speed: f32,
    pub visual_size: f32,
    pub inner_size: f32,
    /// Offset of the inner highlight inside the blob
    pub inner_offset: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug)]
struct TrailBlob {
    x: Tween,
    y: Tween,
    duration: f32,
    easing: Easing,
    size: f32,
    inner_size: f32,
    opacity: f32,
}

/// Drives the trail blobs toward the pointer
#[derive(Clone, Debug)]
pub struct PointerTracker {
    blobs: SmallVec<[TrailBlob; 4]>,
    z_index: i32,
}

impl PointerTracker {
    pub fn new(config: &TrailConfig) -> Self {
        let defaults = TrailConfig::default();
        let blobs = (0..config.trail_count)
            .map(|i| {
                let lead = i == 0;
                TrailBlob {
                    x: Tween::new(0.0),
                    y: Tween::new(0.0),
                    duration: if lead {
                        config.fast_duration
                    } else {
                        config.slow_duration
                    },
                    easing: if lead { config.fast_ease } else { config.slow_ease },
                    size: nth_or_last(&config.sizes, i, defaults.sizes[0]),
                    inner_size: nth_or_last(&config.inner_sizes, i, defaults.inner_sizes[0]),
                    opacity: nth_or_last(&config.opacities, i, defaults.opacities[0])
                        .clamp(0.0, 1.0),
                }
            })
            .collect();

        Self {
            blobs,
            z_index: config.z_index,
        }
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Point every blob at a new pointer position
    pub fn on_pointer_move(&mut self, point: Point) {
        for blob in self.blobs.iter_mut() {
            blob.x.retarget(point.x, blob.duration, blob.easing);
            blob.y.retarget(point.y, blob.duration, blob.easing);
        }
        tracing::trace!(x = point.x, y = point.y, "trail retargeted");
    }

    /// Handle a pointer or touch movement event; returns true if consumed
    pub fn on_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            event_types::POINTER_MOVE | event_types::TOUCH_MOVE => {
                match event.primary_point() {
                    Some(point) => {
                        self.on_pointer_move(point);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Advance the eases by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for blob in self.blobs.iter_mut() {
            blob.x.step(dt);
            blob.y.step(dt);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.blobs
            .iter()
            .any(|b| !b.x.is_finished() || !b.y.is_finished())
    }

    /// Current render state of every blob, lead first
    pub fn nodes(&self) -> Vec<PointerTrailNode> {
        self.blobs
            .iter()
            .map(|b| PointerTrailNode {
                x: b.x.value(),
                y: b.y.value(),
                target_x: b.x.target(),
                target_y: b.y.target(),
                easing_speed: b.duration,
                visual_size: b.size,
                inner_size: b.inner_size,
                inner_offset: (b.size - b.inner_size) / 2.0,
                opacity: b.opacity,
            })
            .collect()
    }
}
