//! Project-wide exports for easy access.

pub use crate::app::{
    GenerationWindow, GeneratorSettings, KeyConfiguration, NoteEvent,
    PitchClass, ScaleTable,
};
pub use crate::settings::*;
pub use crate::util::*;
pub use atomic_float::AtomicF32;
pub use crossbeam_channel::{
    bounded as bounded_channel, Receiver as CCReceiver, Sender as CCSender,
};
