//! Animation scheduler
//!
//! Owns free-standing springs and tweens and advances them together each
//! frame. Components that animate a variable number of values (reveal
//! groups, for instance) keep their handles here instead of in ad-hoc
//! vectors, and drop them on teardown.

use crate::spring::Spring;
use crate::tween::Tween;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    pub struct SpringId;
    pub struct TweenId;
}

/// Largest frame delta fed to animations; longer gaps (a backgrounded
/// tab, a debugger pause) are treated as one slow frame
const MAX_FRAME_DT: f32 = 0.25;

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    tweens: SlotMap<TweenId, Tween>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
            tweens: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn get_spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    /// Run `f` on a spring if it still exists
    pub fn with_spring_mut<R>(
        &mut self,
        id: SpringId,
        f: impl FnOnce(&mut Spring) -> R,
    ) -> Option<R> {
        self.springs.get_mut(id).map(f)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    pub fn add_tween(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    pub fn get_tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    pub fn get_tween_mut(&mut self, id: TweenId) -> Option<&mut Tween> {
        self.tweens.get_mut(id)
    }

    pub fn remove_tween(&mut self, id: TweenId) -> Option<Tween> {
        self.tweens.remove(id)
    }

    /// Advance every animation by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
        for (_, tween) in self.tweens.iter_mut() {
            tween.step(dt);
        }
    }

    /// Advance by the wall-clock time since the previous tick, returning it
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        if dt > MAX_FRAME_DT {
            tracing::trace!(dt, "long frame clamped");
        }
        self.advance(dt);
        dt
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
            || self.tweens.iter().any(|(_, t)| !t.is_finished())
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Drop every animation
    pub fn clear(&mut self) {
        tracing::debug!(
            springs = self.springs.len(),
            tweens = self.tweens.len(),
            "scheduler cleared"
        );
        self.springs.clear();
        self.tweens.clear();
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
