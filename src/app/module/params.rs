use super::*;
use atomic::Atomic;
use std::sync::atomic::AtomicU8;

/// The module's front panel, shared between the control thread (which owns
/// key resolution) and the audio thread (which reads the clock and run
/// controls each sample).
///
/// All fields are relaxed atomics; see [`AtomicOps`].
#[derive(Debug)]
pub struct ModuleParams {
    /// Internal clock rate, as a power of two in Hz.
    pub clock_rate: AtomicF32,
    /// The run button, as a voltage. Each rising edge toggles the module.
    pub run: AtomicF32,

    pub key_root: Atomic<KeyRoot>,
    pub accidental: Atomic<Accidental>,
    pub mode: Atomic<ScaleMode>,

    /// Window centre, as a MIDI note.
    pub centre: AtomicU8,
    /// Window range, in semitones.
    pub range: AtomicU8,

    /// Resolution of the velocity output, from 1 to 7 bits.
    pub velocity_bits: AtomicU8,
}

impl ModuleParams {
    pub fn new() -> Self {
        Self {
            clock_rate: AtomicF32::new(DEFAULT_CLOCK_RATE),
            run: AtomicF32::new(0.0),

            key_root: Atomic::new(KeyRoot::A),
            accidental: Atomic::new(Accidental::Natural),
            mode: Atomic::new(ScaleMode::Minor),

            centre: AtomicU8::new(DEFAULT_WINDOW_CENTRE),
            range: AtomicU8::new(DEFAULT_WINDOW_RANGE),

            velocity_bits: AtomicU8::new(DEFAULT_VELOCITY_BITS),
        }
    }

    /// A snapshot of the key and window parameters.
    pub fn settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            key: KeyConfiguration::new(
                self.key_root.lr(),
                self.accidental.lr(),
                self.mode.lr(),
            ),
            window: GenerationWindow::new(
                i32::from(self.centre.lr()),
                i32::from(self.range.lr()),
            ),
        }
    }

    pub fn set_settings(&self, settings: &GeneratorSettings) {
        self.key_root.sr(settings.key.root);
        self.accidental.sr(settings.key.accidental);
        self.mode.sr(settings.key.mode);

        self.centre.sr(settings.window.centre());
        self.range.sr(settings.window.range());
    }
}

impl Default for ModuleParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a_minor() {
        let settings = ModuleParams::new().settings();

        assert_eq!(
            settings.key,
            KeyConfiguration::new(
                KeyRoot::A,
                Accidental::Natural,
                ScaleMode::Minor
            )
        );
        assert_eq!(settings.window, GenerationWindow::default());
    }

    #[test]
    fn settings_survive_a_round_trip() {
        let params = ModuleParams::new();
        let settings = GeneratorSettings {
            key: KeyConfiguration::new(
                KeyRoot::D,
                Accidental::Flat,
                ScaleMode::Major,
            ),
            window: GenerationWindow::new(40, 18),
        };

        params.set_settings(&settings);
        assert_eq!(params.settings(), settings);
    }
}
