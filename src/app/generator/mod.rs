//! Random note generation on the audio thread.

use super::*;
use crate::app::control::KeyController;
use crate::dsp::Lfsr;
use std::sync::Arc;
use triple_buffer::triple_buffer;

pub mod store;
pub mod window;

pub use store::ScaleTableStore;
pub use window::GenerationWindow;

/// Creates a note generator for the audio thread, along with the controller
/// the control thread uses to change its key and window.
pub fn build_generator(lfsr: Lfsr) -> (KeyController, NoteGenerator) {
    let store = Arc::new(ScaleTableStore::new());
    let (window_input, window_output) =
        triple_buffer(&GenerationWindow::default());

    let controller = KeyController::new(Arc::clone(&store), window_input);
    let generator = NoteGenerator::new(lfsr, store, window_output);

    (controller, generator)
}

/// Generates random pitches and velocities, snapping pitches to the key
/// published by the control thread.
///
/// None of the methods block or allocate, so this is safe to drive from the
/// audio callback.
pub struct NoteGenerator {
    lfsr: Lfsr,
    store: Arc<ScaleTableStore>,
    window: triple_buffer::Output<GenerationWindow>,

    /// The last snapped note, returned whenever the table can't be read.
    last_note: u8,
    has_snapped: bool,
}

impl NoteGenerator {
    pub fn new(
        lfsr: Lfsr,
        store: Arc<ScaleTableStore>,
        window: triple_buffer::Output<GenerationWindow>,
    ) -> Self {
        let last_note = window.peek_output_buffer().centre();

        Self { lfsr, store, window, last_note, has_snapped: false }
    }

    /// Generates the next pitch as a MIDI note.
    ///
    /// A random note is folded by octaves into the current window, then
    /// snapped to the active key (if any). If the control thread is
    /// publishing a new key at that moment, the previous snapped note is
    /// returned instead (or, before any note has snapped, the window's
    /// centre in the active key).
    pub fn generate_pitch(&mut self) -> u8 {
        let raw = self.next_raw_pitch();
        let window = *self.window.read();
        let folded = window.fold(raw);

        let Some(key) = self.store.active_key() else {
            return folded;
        };

        if let Some(table) = self.store.try_read() {
            self.last_note = snap_in_midi_range(&table, folded);
            self.has_snapped = true;
        }
        else if !self.has_snapped {
            // nothing has snapped yet: fall back to the live window's centre
            // in the active key
            self.last_note =
                snap_in_midi_range(&ScaleTable::major(key), window.centre());
        }

        self.last_note
    }

    /// Generates the next velocity, in the range `0` to `127`. Independent
    /// of the key and window.
    pub fn generate_velocity(&mut self) -> u8 {
        (self.lfsr.generate() & 0x7F) as u8
    }

    /// The last note produced by snapping to a key.
    pub const fn last_note(&self) -> u8 {
        self.last_note
    }

    /// The most recent window published by the control thread.
    pub fn window(&mut self) -> GenerationWindow {
        *self.window.read()
    }

    /// Draws an 8-bit value and treats it as a note with one fractional bit,
    /// rounding halves up (`0..=128`).
    fn next_raw_pitch(&mut self) -> u8 {
        let draw = self.lfsr.generate() & 0xFF;
        ((draw + 1) >> 1) as u8
    }
}

/// Snaps `note` with `table`, dropping it by an octave if the result would
/// land above the MIDI range (which only the wraparound entry can cause).
fn snap_in_midi_range(table: &ScaleTable, note: u8) -> u8 {
    let mut snapped = table.snap(note);

    while snapped > u16::from(MIDI_NOTE_MAX) {
        snapped -= NUM_NOTES_CHROMATIC as u16;
    }

    snapped as u8
}
