//! Hysteresis-based edge detection.

/// Detects rising edges in a control signal. The trigger goes high once the
/// input rises to `1.0` or above, and only goes low again once it drops to
/// `0.1` or below, so a noisy signal hovering around one threshold won't
/// retrigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchmittTrigger {
    high: bool,
}

impl SchmittTrigger {
    const HIGH_THRESHOLD: f32 = 1.0;
    const LOW_THRESHOLD: f32 = 0.1;

    pub const fn new() -> Self {
        Self { high: false }
    }

    /// Processes the next input value, returning `true` only on a rising
    /// edge.
    pub fn process(&mut self, value: f32) -> bool {
        if self.high {
            if value <= Self::LOW_THRESHOLD {
                self.high = false;
            }

            false
        }
        else if value >= Self::HIGH_THRESHOLD {
            self.high = true;
            true
        }
        else {
            false
        }
    }

    pub const fn is_high(&self) -> bool {
        self.high
    }

    pub fn reset(&mut self) {
        self.high = false;
    }
}
