//! The CV module host: clocks the note generator and holds its outputs.

use super::*;
use crate::dsp::{Clock, SchmittTrigger};
use std::sync::Arc;

mod params;

pub use params::ModuleParams;

/// A note produced by the module, sent to the host for display or logging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteEvent {
    pub pitch: u8,
    pub velocity: u8,
    /// The pitch as a 1 V/octave voltage.
    pub cv: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleInputs {
    /// An external clock voltage. If connected, it replaces the internal
    /// clock, and a new note is generated on each rising edge.
    pub external_clock: Option<f32>,
}

/// Output voltages for a single sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModuleOutputs {
    pub gate: f32,
    pub cv: f32,
    pub velocity: f32,
}

/// Drives a [`NoteGenerator`] from a clock and converts its notes to
/// voltages.
///
/// [`process()`](Self::process) is called once per sample on the audio
/// thread. It never blocks: note events are offered to the host with
/// `try_send()`, and dropped if the queue is full.
pub struct CvGenerator {
    generator: NoteGenerator,
    params: Arc<ModuleParams>,

    clock: Clock,
    clock_trigger: SchmittTrigger,
    run_trigger: SchmittTrigger,
    running: bool,

    cv: f32,
    velocity: f32,

    note_sender: Option<CCSender<NoteEvent>>,
    dropped_events: u64,
}

impl CvGenerator {
    pub fn new(generator: NoteGenerator, params: Arc<ModuleParams>) -> Self {
        Self {
            generator,
            params,

            clock: Clock::new(),
            clock_trigger: SchmittTrigger::new(),
            run_trigger: SchmittTrigger::new(),
            running: true,

            cv: 0.0,
            velocity: 0.0,

            note_sender: None,
            dropped_events: 0,
        }
    }

    /// Sends each generated note to `sender`.
    pub fn with_note_sender(mut self, sender: CCSender<NoteEvent>) -> Self {
        self.note_sender = Some(sender);
        self
    }

    /// Processes one sample.
    pub fn process(
        &mut self,
        inputs: &ModuleInputs,
        sample_time: f32,
    ) -> ModuleOutputs {
        if self.run_trigger.process(self.params.run.lr()) {
            self.running = !self.running;

            // resume from the start of a clock period
            if !self.running {
                self.clock.reset();
                self.clock_trigger.reset();
            }
        }

        if !self.running {
            return ModuleOutputs::default();
        }

        let (new_note, gate) = match inputs.external_clock {
            Some(voltage) => {
                let rising = self.clock_trigger.process(voltage);
                (rising, self.clock_trigger.is_high())
            }
            None => {
                let wrapped = self
                    .clock
                    .advance(self.params.clock_rate.lr(), sample_time);
                (wrapped, self.clock.gate())
            }
        };

        if new_note {
            self.next_note();
        }

        ModuleOutputs {
            gate: if gate { GATE_HIGH_VOLTS } else { 0.0 },
            cv: self.cv,
            velocity: self.velocity,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The number of note events dropped because the host's queue was full.
    pub const fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    fn next_note(&mut self) {
        let pitch = self.generator.generate_pitch();
        let velocity = self.generator.generate_velocity();

        self.cv = note_to_cv(pitch);
        self.velocity = quantize_level(velocity, self.params.velocity_bits.lr());

        if let Some(sender) = &self.note_sender {
            let event = NoteEvent { pitch, velocity, cv: self.cv };

            if sender.try_send(event).is_err() {
                self.dropped_events += 1;
            }
        }
    }
}

/// Reduces a 7-bit `level` to `bits` of resolution (clamped to `1..=7`) and
/// scales it to `0.0..=VELOCITY_MAX_VOLTS`.
pub fn quantize_level(level: u8, bits: u8) -> f32 {
    let bits = bits.clamp(1, 7);
    let step = (level.min(127) >> (7 - bits)) as f32;
    let max_step = ((1u8 << bits) - 1) as f32;

    map_f32(step, 0.0, max_step, 0.0, VELOCITY_MAX_VOLTS)
}
