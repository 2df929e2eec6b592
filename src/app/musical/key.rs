//! Key selection and its resolution to a scale root.

use super::*;
use std::fmt::Display;

/// Errors arising from key selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The mode has no defined scale table.
    #[error("{0} scales are not supported")]
    UnsupportedMode(ScaleMode),

    /// A key name which could not be parsed.
    #[error("unknown {kind} \"{name}\"")]
    UnknownName { kind: &'static str, name: String },
}

/// The user's key selection: a root letter, an accidental, and a mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(default)]
pub struct KeyConfiguration {
    pub root: KeyRoot,
    pub accidental: Accidental,
    pub mode: ScaleMode,
}

impl KeyConfiguration {
    pub const fn new(
        root: KeyRoot,
        accidental: Accidental,
        mode: ScaleMode,
    ) -> Self {
        Self { root, accidental, mode }
    }

    /// A configuration with snapping disabled.
    pub const fn no_key() -> Self {
        Self::new(KeyRoot::NoKey, Accidental::Natural, ScaleMode::Major)
    }

    /// Resolves the configuration to the root of the major scale which
    /// contains its notes.
    ///
    /// Returns `Ok(None)` if no key is selected, regardless of mode.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedMode`] for the pentatonic modes, which
    /// have no diatonic table.
    pub fn resolve(&self) -> Result<Option<PitchClass>, KeyError> {
        let Some(natural) = self.root.natural_pitch_class() else {
            return Ok(None);
        };

        let offset = self
            .mode
            .relative_major_offset()
            .ok_or(KeyError::UnsupportedMode(self.mode))?;

        Ok(Some(natural.transpose(self.accidental.semitones() + offset)))
    }

    /// Resolves the configuration and builds its scale table.
    ///
    /// # Errors
    ///
    /// See [`resolve()`](Self::resolve).
    pub fn build_table(&self) -> Result<Option<ScaleTable>, KeyError> {
        Ok(self.resolve()?.map(ScaleTable::major))
    }
}

impl Display for KeyConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.root == KeyRoot::NoKey {
            return write!(f, "no key");
        }

        write!(f, "{}{} {}", self.root, self.accidental, self.mode)
    }
}
