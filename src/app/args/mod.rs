use super::*;
use crate::dsp::Lfsr;
use clap::Parser;
use std::path::PathBuf;

/// Errors which stop the headless runner.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to read settings from {}: {source}", path.display())]
    SettingsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("sample rate must be positive (got {0})")]
    InvalidSampleRate(f32),

    #[error("failed to start the control thread: {0}")]
    ControlThread(std::io::Error),
}

/// Runs the note generator headlessly, logging each note it produces.
#[derive(Debug, Parser)]
#[command(name = "cvgen", version, about)]
pub struct Arguments {
    /// Key root (a-g, or "none" to disable snapping).
    #[arg(long)]
    pub root: Option<KeyRoot>,

    /// Accidental applied to the root (flat, natural or sharp).
    #[arg(long)]
    pub accidental: Option<Accidental>,

    /// Scale mode (major or minor).
    #[arg(long)]
    pub mode: Option<ScaleMode>,

    /// Centre of the pitch window, as a MIDI note.
    #[arg(long, allow_negative_numbers = true)]
    pub centre: Option<i32>,

    /// Width of the pitch window in semitones.
    #[arg(long, allow_negative_numbers = true)]
    pub range: Option<i32>,

    /// Seed for the shift register, in decimal or 0x-prefixed hex.
    #[arg(long, value_parser = parse_seed, conflicts_with = "entropy")]
    pub seed: Option<u16>,

    /// Seed the shift register randomly.
    #[arg(long)]
    pub entropy: bool,

    /// Internal clock rate, as a power of two in Hz.
    #[arg(long, default_value_t = DEFAULT_CLOCK_RATE, allow_negative_numbers = true)]
    pub rate: f32,

    /// Resolution of the velocity output in bits.
    #[arg(long, default_value_t = DEFAULT_VELOCITY_BITS)]
    pub velocity_bits: u8,

    /// How long to run for, in seconds of generated audio.
    #[arg(long, default_value_t = 4.0)]
    pub seconds: f32,

    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: f32,

    /// A JSON file of generator settings. Flags take precedence over it.
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

impl Arguments {
    /// Loads the settings file (if any) and applies the flags on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file can't be read or parsed.
    pub fn generator_settings(&self) -> Result<GeneratorSettings, RunnerError> {
        let mut settings = match &self.settings {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| {
                    RunnerError::SettingsFile { path: path.clone(), source }
                })?;
                serde_json::from_str(&json)?
            }
            None => GeneratorSettings {
                key: KeyConfiguration::new(
                    KeyRoot::A,
                    Accidental::Natural,
                    ScaleMode::Minor,
                ),
                window: GenerationWindow::default(),
            },
        };

        self.apply_overrides(&mut settings);

        Ok(settings)
    }

    /// The shift register to generate with.
    pub fn lfsr(&self) -> Lfsr {
        if self.entropy {
            Lfsr::from_entropy()
        }
        else {
            Lfsr::new(self.seed.unwrap_or(DEFAULT_LFSR_SEED))
        }
    }

    /// The duration between samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample rate isn't positive.
    pub fn sample_time(&self) -> Result<f32, RunnerError> {
        if self.sample_rate > 0.0 {
            Ok(self.sample_rate.recip())
        }
        else {
            Err(RunnerError::InvalidSampleRate(self.sample_rate))
        }
    }

    /// The total number of samples to process.
    pub fn num_samples(&self) -> u64 {
        (self.seconds.max(0.0) * self.sample_rate.max(0.0)) as u64
    }

    fn apply_overrides(&self, settings: &mut GeneratorSettings) {
        if let Some(root) = self.root {
            settings.key.root = root;
        }
        if let Some(accidental) = self.accidental {
            settings.key.accidental = accidental;
        }
        if let Some(mode) = self.mode {
            settings.key.mode = mode;
        }

        if self.centre.is_some() || self.range.is_some() {
            let window = settings.window;

            settings.window = GenerationWindow::new(
                self.centre.unwrap_or_else(|| i32::from(window.centre())),
                self.range.unwrap_or_else(|| i32::from(window.range())),
            );
        }
    }
}

fn parse_seed(s: &str) -> Result<u16, std::num::ParseIntError> {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .map_or_else(|| s.parse(), |hex| u16::from_str_radix(hex, 16))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Arguments {
        Arguments::try_parse_from(std::iter::once("cvgen").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        let settings = args.generator_settings().unwrap();

        assert_eq!(settings.key.root, KeyRoot::A);
        assert_eq!(settings.key.mode, ScaleMode::Minor);
        assert_eq!(settings.window, GenerationWindow::default());
        assert_eq!(args.lfsr(), Lfsr::new(DEFAULT_LFSR_SEED));
        assert_eq!(args.num_samples(), 4 * 44100);
    }

    #[test]
    fn flags_override_settings() {
        let args = parse(&[
            "--root", "e", "--accidental", "flat", "--mode", "major",
            "--centre", "200", "--range", "-3",
        ]);
        let settings = args.generator_settings().unwrap();

        assert_eq!(
            settings.key,
            KeyConfiguration::new(KeyRoot::E, Accidental::Flat, ScaleMode::Major)
        );
        assert_eq!(settings.window, GenerationWindow::new(127, 1));
    }

    #[test]
    fn settings_file_is_loaded() {
        let path = std::env::temp_dir()
            .join(format!("cvgen-settings-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "key": { "root": "d", "mode": "major" }, "window": { "centre": 48 } }"#,
        )
        .unwrap();

        let args = Arguments::try_parse_from([
            "cvgen",
            "--settings",
            path.to_str().unwrap(),
            "--range",
            "12",
        ])
        .unwrap();
        let settings = args.generator_settings().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.key.root, KeyRoot::D);
        assert_eq!(settings.key.accidental, Accidental::Natural);
        assert_eq!(settings.window, GenerationWindow::new(48, 12));
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let args = parse(&["--settings", "/nonexistent/cvgen.json"]);

        assert!(matches!(
            args.generator_settings(),
            Err(RunnerError::SettingsFile { .. })
        ));
    }

    #[test]
    fn seeds() {
        assert_eq!(parse(&["--seed", "0x1D2C"]).lfsr(), Lfsr::new(0x1D2C));
        assert_eq!(parse(&["--seed", "42"]).lfsr(), Lfsr::new(42));
        assert!(Arguments::try_parse_from(["cvgen", "--seed", "1", "--entropy"])
            .is_err());
        assert_ne!(parse(&["--entropy"]).lfsr().state(), 0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Arguments::try_parse_from(["cvgen", "--root", "h"]).is_err());
        assert!(Arguments::try_parse_from(["cvgen", "--seed", "70000"]).is_err());

        let args = parse(&["--sample-rate", "0"]);
        assert!(args.sample_time().is_err());
    }
}
