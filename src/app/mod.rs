//! All app-related state and logic.

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod args;
pub mod control;
pub mod generator;
pub mod module;
pub mod musical;

use args::{Arguments, RunnerError};
pub use control::{ControlHandler, GeneratorSettings, KeyController};
pub use generator::{
    build_generator, GenerationWindow, NoteGenerator, ScaleTableStore,
};
pub use module::{
    quantize_level, CvGenerator, ModuleInputs, ModuleOutputs, ModuleParams,
    NoteEvent,
};
pub use musical::*;

/// The number of samples processed between draining the note queue.
const RUNNER_BLOCK_SIZE: u64 = 512;

/// Runs the module headlessly for the duration given in `args`, with the
/// control thread polling its parameters in the background.
///
/// # Errors
///
/// Returns an error if the settings couldn't be loaded or the control thread
/// couldn't be started.
pub fn run(args: &Arguments) -> Result<(), RunnerError> {
    let settings = args.generator_settings()?;
    let sample_time = args.sample_time()?;

    let params = Arc::new(ModuleParams::new());
    params.set_settings(&settings);
    params.clock_rate.sr(args.rate);
    params.velocity_bits.sr(args.velocity_bits);

    let (controller, generator) = build_generator(args.lfsr());
    let mut control = ControlHandler::new(Arc::clone(&params), controller);

    // an unsupported mode is logged and leaves snapping disabled
    _ = control.update_now();
    control.start_update().map_err(RunnerError::ControlThread)?;

    log::info!(
        target: "cvgen::runner",
        "running {} in {} to {} at {:.0} bpm",
        settings.key,
        note_name(settings.window.lower()),
        note_name(settings.window.upper()),
        crate::dsp::Clock::rate_to_bpm(args.rate),
    );

    let (note_tx, note_rx) = bounded_channel(NOTE_EVENT_QUEUE_SIZE);
    let mut module =
        CvGenerator::new(generator, Arc::clone(&params)).with_note_sender(note_tx);

    let inputs = ModuleInputs::default();
    let num_samples = args.num_samples();
    let mut sample = 0;

    while sample < num_samples {
        let block_end = (sample + RUNNER_BLOCK_SIZE).min(num_samples);

        for _ in sample..block_end {
            module.process(&inputs, sample_time);
        }

        sample = block_end;

        for event in note_rx.try_iter() {
            log::info!(
                target: "cvgen::runner",
                "{:>9.3}s  {:<4} pitch {:>3}  velocity {:>3}  cv {:+.3} V",
                sample as f32 * sample_time,
                note_name(event.pitch),
                event.pitch,
                event.velocity,
                event.cv,
            );
        }
    }

    control.stop_update();

    if module.dropped_events() > 0 {
        log::warn!(
            target: "cvgen::runner",
            "{} note events were dropped",
            module.dropped_events()
        );
    }

    Ok(())
}

/// Formats a MIDI note as its name and octave, e.g. `C4` for note 60.
pub fn note_name(note: u8) -> String {
    let octave = i32::from(note) / NUM_NOTES_CHROMATIC as i32 - 1;
    format!("{}{octave}", PitchClass::of_note(note))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_names() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(69), "A4");
        assert_eq!(note_name(127), "G9");
    }
}
