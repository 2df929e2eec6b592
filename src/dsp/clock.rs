//! Free-running square-wave clock.

use super::*;

/// A phase-accumulating clock with a 50% duty cycle. The rate is expressed as
/// an exponent, i.e. a rate of `r` runs at `2^r` Hz.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    phase: f32,
}

impl Clock {
    pub const fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Advances the clock by one sample. Returns `true` when the phase wraps,
    /// i.e. at the start of each new period.
    ///
    /// `rate` is clamped to `MIN_CLOCK_RATE..=MAX_CLOCK_RATE`.
    pub fn advance(&mut self, rate: f32, sample_time: f32) -> bool {
        let rate = rate.clamp(MIN_CLOCK_RATE, MAX_CLOCK_RATE);
        self.phase += rate.exp2() * sample_time;

        if self.phase >= 1.0 {
            self.phase = 0.0;
            return true;
        }

        false
    }

    /// Whether the clock's output is currently high.
    pub fn gate(&self) -> bool {
        self.phase < 0.5
    }

    pub const fn phase(&self) -> f32 {
        self.phase
    }

    /// Resets the clock to the start of its period.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Returns the clock's rate in beats per minute, for display.
    pub fn rate_to_bpm(rate: f32) -> f32 {
        rate.clamp(MIN_CLOCK_RATE, MAX_CLOCK_RATE).exp2() * 60.0
    }
}
