//! Global constants.

/// The number of notes in a diatonic scale.
pub const NUM_NOTES_IN_SCALE: usize = 7;

/// The number of notes in a chromatic octave.
pub const NUM_NOTES_CHROMATIC: usize = 12;

/// The highest MIDI note value.
pub const MIDI_NOTE_MAX: u8 = 127;

/// The MIDI note which corresponds to 0 V on the CV output (middle C).
pub const CV_REFERENCE_NOTE: f32 = 60.0;

/// The start state of the note generator's shift register. Used whenever a
/// seed of zero is provided, as zero is a fixed point of the register.
pub const DEFAULT_LFSR_SEED: u16 = 0xACE1;

/// The toggle mask applied to the shift register when a set bit is shifted
/// out. Taps 16, 14, 13 and 11, which gives a maximal period of `2¹⁶ - 1`.
pub const LFSR_TOGGLE_MASK: u16 = 0xB400;

/// The default centre note of the generation window.
pub const DEFAULT_WINDOW_CENTRE: u8 = 64;

/// The default range of the generation window in semitones.
pub const DEFAULT_WINDOW_RANGE: u8 = 64;

/// The lowest clock rate, as an exponent of 2 Hz.
pub const MIN_CLOCK_RATE: f32 = -2.0;
/// The highest clock rate, as an exponent of 2 Hz.
pub const MAX_CLOCK_RATE: f32 = 6.0;
/// The default clock rate (`2² == 4` Hz, displayed as 240 bpm).
pub const DEFAULT_CLOCK_RATE: f32 = 2.0;

/// The voltage of a high gate.
pub const GATE_HIGH_VOLTS: f32 = 10.0;

/// The full-scale voltage of the velocity output.
pub const VELOCITY_MAX_VOLTS: f32 = 10.0;

/// The default resolution of the velocity output in bits (`2⁷ == 128` levels).
pub const DEFAULT_VELOCITY_BITS: u8 = 7;

/// The rate at which the control thread polls the module parameters.
pub const PARAM_UPDATE_RATE: f64 = 110.0;

/// The number of note events which may be queued for the host before new
/// events are dropped.
pub const NOTE_EVENT_QUEUE_SIZE: usize = 64;

/// The default sample rate of the headless runner.
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;
