//! Fixed-interval timer driven by frame deltas

/// Fires once every `period` seconds of accumulated running time
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    period: f32,
    accumulated: f32,
    running: bool,
}

impl IntervalTimer {
    /// A running timer; `period` is clamped to at least one millisecond
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(0.001),
            accumulated: 0.0,
            running: true,
        }
    }

    pub fn from_millis(ms: u32) -> Self {
        Self::new(ms as f32 / 1000.0)
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt` seconds, returning how many periods elapsed
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.running || dt <= 0.0 || !dt.is_finite() {
            return 0;
        }

        self.accumulated += dt;
        let fires = (self.accumulated / self.period).floor();
        self.accumulated = self.accumulated.rem_euclid(self.period);
        fires.min(u32::MAX as f32) as u32
    }

    /// Stop counting; partial progress is discarded like a cleared interval
    pub fn pause(&mut self) {
        self.running = false;
        self.accumulated = 0.0;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Restart the current period from zero
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
