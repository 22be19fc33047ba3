//! Scroll reveal
//!
//! Elements start hidden and offset downward, then fade and slide into
//! place the first time their top crosses a trigger line in the viewport.
//! Elements crossing on the same frame reveal as one batch, staggered in
//! document order. Each element plays once; scrolling back up does not
//! hide it again.

use folio_animation::{AnimationScheduler, Easing, Tween, TweenId};
use serde::Serialize;

/// How a group of elements reveals
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    /// Starting vertical offset in pixels
    pub from_y: f32,
    /// Starting rotation in degrees
    pub from_rotate: f32,
    pub duration: f32,
    pub easing: Easing,
    /// Delay between consecutive elements of one batch
    pub stagger: f32,
    /// Delay before the first element of a batch
    pub delay: f32,
    /// Viewport fraction the element's top must rise above; `None` plays
    /// on mount
    pub trigger: Option<f32>,
}

impl RevealStyle {
    /// Whole page sections
    pub const fn section() -> Self {
        Self {
            from_y: 60.0,
            from_rotate: 0.0,
            duration: 1.0,
            easing: Easing::Power3Out,
            stagger: 0.0,
            delay: 0.0,
            trigger: Some(0.85),
        }
    }

    /// Cards and list items inside sections
    pub const fn item() -> Self {
        Self {
            from_y: 20.0,
            from_rotate: 0.0,
            duration: 0.7,
            easing: Easing::Power2Out,
            stagger: 0.12,
            delay: 0.0,
            trigger: Some(0.9),
        }
    }

    /// Hero text, played on load
    pub const fn hero() -> Self {
        Self {
            from_y: 40.0,
            from_rotate: 0.0,
            duration: 1.0,
            easing: Easing::Power3Out,
            stagger: 0.12,
            delay: 0.2,
            trigger: None,
        }
    }

    /// Hero portrait, played on load with a slight counter-rotation
    pub const fn hero_media() -> Self {
        Self {
            from_y: 60.0,
            from_rotate: -8.0,
            duration: 1.1,
            easing: Easing::Power4Out,
            stagger: 0.0,
            delay: 0.3,
            trigger: None,
        }
    }
}

/// Render state of one element
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RevealFrame {
    pub opacity: f32,
    pub y: f32,
    pub rotate: f32,
    pub played: bool,
}

#[derive(Clone, Copy, Debug)]
struct RevealElement {
    opacity: TweenId,
    y: TweenId,
    rotate: TweenId,
    played: bool,
}

/// A set of elements sharing one reveal style
pub struct RevealGroup {
    style: RevealStyle,
    scheduler: AnimationScheduler,
    elements: Vec<RevealElement>,
}

impl RevealGroup {
    pub fn new(style: RevealStyle, count: usize) -> Self {
        let mut scheduler = AnimationScheduler::new();
        let elements = (0..count)
            .map(|_| RevealElement {
                opacity: scheduler.add_tween(Tween::new(0.0)),
                y: scheduler.add_tween(Tween::new(style.from_y)),
                rotate: scheduler.add_tween(Tween::new(style.from_rotate)),
                played: false,
            })
            .collect();

        Self {
            style,
            scheduler,
            elements,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn style(&self) -> &RevealStyle {
        &self.style
    }

    fn play_batch(&mut self, batch: &[usize]) {
        let style = self.style;
        for (order, &index) in batch.iter().enumerate() {
            let Some(element) = self.elements.get_mut(index) else {
                continue;
            };
            element.played = true;
            let element = *element;
            let delay = style.delay + style.stagger * order as f32;

            for (id, to) in [(element.opacity, 1.0), (element.y, 0.0), (element.rotate, 0.0)] {
                if let Some(tween) = self.scheduler.get_tween_mut(id) {
                    tween.retarget_delayed(to, style.duration, delay, style.easing);
                }
            }
        }
        tracing::debug!(count = batch.len(), "reveal batch started");
    }

    /// Play every element that has not played yet (mount-time reveals)
    pub fn play_all(&mut self) -> usize {
        let batch: Vec<usize> = (0..self.elements.len())
            .filter(|&i| !self.elements[i].played)
            .collect();
        if !batch.is_empty() {
            self.play_batch(&batch);
        }
        batch.len()
    }

    /// Check element tops (viewport coordinates, document order) against
    /// the trigger line; returns how many elements started revealing.
    ///
    /// Unmeasured tops (non-finite) are skipped.
    pub fn on_scroll(&mut self, tops: &[f32], viewport_height: f32) -> usize {
        let Some(trigger) = self.style.trigger else {
            return 0;
        };
        if viewport_height <= 0.0 || !viewport_height.is_finite() {
            return 0;
        }

        let line = trigger * viewport_height;
        let batch: Vec<usize> = tops
            .iter()
            .enumerate()
            .take(self.elements.len())
            .filter(|&(i, top)| !self.elements[i].played && top.is_finite() && *top <= line)
            .map(|(i, _)| i)
            .collect();

        if !batch.is_empty() {
            self.play_batch(&batch);
        }
        batch.len()
    }

    pub fn tick(&mut self, dt: f32) {
        self.scheduler.advance(dt);
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.has_active_animations()
    }

    pub fn frame(&self, index: usize) -> Option<RevealFrame> {
        let element = self.elements.get(index)?;
        let value = |id| self.scheduler.get_tween(id).map(|t| t.value());
        Some(RevealFrame {
            opacity: value(element.opacity)?,
            y: value(element.y)?,
            rotate: value(element.rotate)?,
            played: element.played,
        })
    }

    pub fn frames(&self) -> Vec<RevealFrame> {
        (0..self.elements.len())
            .filter_map(|i| self.frame(i))
            .collect()
    }

    /// Drop every tween; the group renders nothing afterwards
    pub fn clear(&mut self) {
        self.scheduler.clear();
        self.elements.clear();
    }
}
