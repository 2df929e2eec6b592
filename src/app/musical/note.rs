//! Pitch class and key-name representations.

use super::*;
use bytemuck::NoUninit;
use std::fmt::Display;
use std::str::FromStr;

const PITCH_CLASS_NAMES: [&str; NUM_NOTES_CHROMATIC] =
    ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// One of the twelve notes of an octave, independent of the octave.
///
/// `C` is represented as 0, and `B` as 11.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Returns the pitch class of any (possibly negative) semitone value.
    pub const fn wrapping(value: i32) -> Self {
        Self(value.rem_euclid(NUM_NOTES_CHROMATIC as i32) as u8)
    }

    /// Returns the pitch class of a MIDI note.
    pub const fn of_note(note: u8) -> Self {
        Self(note % NUM_NOTES_CHROMATIC as u8)
    }

    /// The value of the pitch class, in the range `0` to `11`.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the pitch class `semitones` away from this one.
    #[must_use]
    pub const fn transpose(self, semitones: i32) -> Self {
        Self::wrapping(self.0 as i32 + semitones)
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PITCH_CLASS_NAMES[self.0 as usize])
    }
}

/// The letter name of a key root, as selected on the key knob. `NoKey`
/// disables scale snapping entirely.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum KeyRoot {
    #[default]
    NoKey,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

unsafe impl NoUninit for KeyRoot {}

impl KeyRoot {
    /// Returns the root for a knob position, saturating out-of-range values
    /// (`0` is no key, `1` to `7` are `A` to `G`).
    pub fn from_index(index: i32) -> Self {
        match index {
            i32::MIN..=0 => Self::NoKey,
            1 => Self::A,
            2 => Self::B,
            3 => Self::C,
            4 => Self::D,
            5 => Self::E,
            6 => Self::F,
            _ => Self::G,
        }
    }

    /// Returns the natural pitch class of the root letter, or `None` for
    /// [`KeyRoot::NoKey`].
    pub const fn natural_pitch_class(self) -> Option<PitchClass> {
        match self {
            Self::NoKey => None,
            Self::A => Some(PitchClass(9)),
            Self::B => Some(PitchClass(11)),
            Self::C => Some(PitchClass(0)),
            Self::D => Some(PitchClass(2)),
            Self::E => Some(PitchClass(4)),
            Self::F => Some(PitchClass(5)),
            Self::G => Some(PitchClass(7)),
        }
    }
}

impl Display for KeyRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoKey => write!(f, "None"),
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::E => write!(f, "E"),
            Self::F => write!(f, "F"),
            Self::G => write!(f, "G"),
        }
    }
}

impl FromStr for KeyRoot {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "no_key" | "nokey" => Ok(Self::NoKey),
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            "e" => Ok(Self::E),
            "f" => Ok(Self::F),
            "g" => Ok(Self::G),
            _ => Err(KeyError::UnknownName { kind: "key root", name: s.into() }),
        }
    }
}

/// Flat, natural or sharp, applied to the key root.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Accidental {
    Flat,
    #[default]
    Natural,
    Sharp,
}

unsafe impl NoUninit for Accidental {}

impl Accidental {
    /// Returns the accidental for a three-way switch position: negative
    /// values are flat, positive values are sharp.
    pub fn from_switch(value: f32) -> Self {
        if value <= -0.5 {
            Self::Flat
        }
        else if value >= 0.5 {
            Self::Sharp
        }
        else {
            Self::Natural
        }
    }

    /// The accidental's offset in semitones.
    pub const fn semitones(self) -> i32 {
        match self {
            Self::Flat => -1,
            Self::Natural => 0,
            Self::Sharp => 1,
        }
    }
}

impl Display for Accidental {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat => write!(f, "b"),
            Self::Natural => Ok(()),
            Self::Sharp => write!(f, "#"),
        }
    }
}

impl FromStr for Accidental {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" | "b" => Ok(Self::Flat),
            "natural" | "n" => Ok(Self::Natural),
            "sharp" | "#" | "s" => Ok(Self::Sharp),
            _ => {
                Err(KeyError::UnknownName { kind: "accidental", name: s.into() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_class_wraps_both_ways() {
        assert_eq!(PitchClass::wrapping(-1).value(), 11);
        assert_eq!(PitchClass::wrapping(12).value(), 0);
        assert_eq!(PitchClass::wrapping(25).value(), 1);
        assert_eq!(PitchClass::of_note(69).value(), 9);
        assert_eq!(PitchClass::wrapping(11).transpose(3).value(), 2);
    }

    #[test]
    fn pitch_class_names() {
        assert_eq!(PitchClass::wrapping(1).to_string(), "C#");
        assert_eq!(PitchClass::wrapping(9).to_string(), "A");
    }

    #[test]
    fn knob_index_saturates() {
        assert_eq!(KeyRoot::from_index(-4), KeyRoot::NoKey);
        assert_eq!(KeyRoot::from_index(0), KeyRoot::NoKey);
        assert_eq!(KeyRoot::from_index(1), KeyRoot::A);
        assert_eq!(KeyRoot::from_index(7), KeyRoot::G);
        assert_eq!(KeyRoot::from_index(40), KeyRoot::G);
    }

    #[test]
    fn accidental_switch_positions() {
        assert_eq!(Accidental::from_switch(-1.0), Accidental::Flat);
        assert_eq!(Accidental::from_switch(0.0), Accidental::Natural);
        assert_eq!(Accidental::from_switch(1.0), Accidental::Sharp);
    }

    #[test]
    fn names_parse() {
        assert_eq!("C".parse::<KeyRoot>(), Ok(KeyRoot::C));
        assert_eq!("none".parse::<KeyRoot>(), Ok(KeyRoot::NoKey));
        assert_eq!("sharp".parse::<Accidental>(), Ok(Accidental::Sharp));
        assert!("H".parse::<KeyRoot>().is_err());
    }
}
