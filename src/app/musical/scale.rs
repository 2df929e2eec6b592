//! Scale modes and chromatic-to-scale lookup tables.

use super::*;
use bytemuck::NoUninit;
use std::fmt::Display;
use std::str::FromStr;

/// The intervals of notes in a major scale for a single octave.
pub const MAJOR_SCALE_DEGREES: [u8; NUM_NOTES_IN_SCALE] = [0, 2, 4, 5, 7, 9, 11];

/// Scale modes selectable on the module.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ScaleMode {
    #[default]
    Major,
    Minor,
    /// Accepted as a value, but has no defined table.
    MajorPentatonic,
    /// Accepted as a value, but has no defined table.
    MinorPentatonic,
}

unsafe impl NoUninit for ScaleMode {}

impl ScaleMode {
    /// Returns the mode for a major/minor switch position.
    pub fn from_switch(is_minor: bool) -> Self {
        if is_minor { Self::Minor } else { Self::Major }
    }

    /// The number of semitones between a key root and the root of the major
    /// scale sharing its notes, or `None` if the mode has no diatonic table.
    pub const fn relative_major_offset(self) -> Option<i32> {
        match self {
            Self::Major => Some(0),
            // the relative major sits a minor third above
            Self::Minor => Some(3),
            Self::MajorPentatonic | Self::MinorPentatonic => None,
        }
    }
}

impl Display for ScaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "Major"),
            Self::Minor => write!(f, "Minor"),
            Self::MajorPentatonic => write!(f, "Maj Pent."),
            Self::MinorPentatonic => write!(f, "Min Pent."),
        }
    }
}

impl FromStr for ScaleMode {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "major" | "maj" => Ok(Self::Major),
            "minor" | "min" => Ok(Self::Minor),
            "major_pentatonic" | "maj_pent" => Ok(Self::MajorPentatonic),
            "minor_pentatonic" | "min_pent" => Ok(Self::MinorPentatonic),
            _ => Err(KeyError::UnknownName { kind: "mode", name: s.into() }),
        }
    }
}

/// Returns the pitch classes of a scale built from `root` and `degrees`,
/// sorted in ascending order.
pub fn scale_tones(
    root: PitchClass,
    degrees: &[u8; NUM_NOTES_IN_SCALE],
) -> [u8; NUM_NOTES_IN_SCALE] {
    let mut tones = degrees.map(|deg| root.transpose(i32::from(deg)).value());
    tones.sort_unstable();
    tones
}

/// Finds the scale tone which `note` should snap to, using a binary search
/// over the ascending `sorted` tones.
///
/// Exact matches are returned as-is. Otherwise the tone one semitone below
/// `note` is favoured; the upper neighbour is never chosen. If no tone is
/// found (`note` is below the lowest tone), the highest tone is returned, as
/// it is adjacent to the bottom of the octave.
pub fn nearest_in_scale(sorted: &[u8], note: u8) -> u8 {
    let Some(&highest) = sorted.last() else {
        return note;
    };

    let mut closest = highest;
    let mut start = 0isize;
    let mut end = sorted.len() as isize - 1;

    while start <= end {
        let mid = (start + end) / 2;
        let tone = sorted[mid as usize];

        if tone == note {
            return tone;
        }

        if tone > note {
            end = mid - 1;
        }
        else {
            // favour rounding down
            if note - tone == 1 {
                closest = tone;
            }

            start = mid + 1;
        }
    }

    closest
}

/// A lookup table from each chromatic offset (`0` to `11`) to the pitch class
/// of its nearest tone in a scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleTable {
    root: PitchClass,
    map: [u8; NUM_NOTES_CHROMATIC],
}

impl ScaleTable {
    /// Builds the table for the scale with the given root and degrees.
    pub fn build(root: PitchClass, degrees: &[u8; NUM_NOTES_IN_SCALE]) -> Self {
        let tones = scale_tones(root, degrees);
        let mut map = [0; NUM_NOTES_CHROMATIC];

        for (offset, entry) in map.iter_mut().enumerate() {
            *entry = nearest_in_scale(&tones, offset as u8);
        }

        Self { root, map }
    }

    /// Builds the table for the major scale starting at `root`.
    pub fn major(root: PitchClass) -> Self {
        Self::build(root, &MAJOR_SCALE_DEGREES)
    }

    /// A table which maps every offset to itself.
    pub fn identity() -> Self {
        Self {
            root: PitchClass::default(),
            map: std::array::from_fn(|i| i as u8),
        }
    }

    /// The root of the major scale this table was built from.
    pub const fn root(&self) -> PitchClass {
        self.root
    }

    /// Returns the scale pitch class for a chromatic offset. Offsets are
    /// taken modulo 12.
    #[inline]
    pub fn snap_offset(&self, offset: u8) -> u8 {
        self.map[offset as usize % NUM_NOTES_CHROMATIC]
    }

    /// Snaps a MIDI note into the scale, keeping its octave.
    ///
    /// Note that the wraparound entry (a note below the lowest scale tone of
    /// the octave) snaps *up* to the highest tone of the same octave.
    #[inline]
    pub fn snap(&self, note: u8) -> u16 {
        let octave = u16::from(note) / NUM_NOTES_CHROMATIC as u16;
        u16::from(self.snap_offset(note)) + octave * NUM_NOTES_CHROMATIC as u16
    }

    pub const fn as_array(&self) -> &[u8; NUM_NOTES_CHROMATIC] {
        &self.map
    }
}

impl Default for ScaleTable {
    fn default() -> Self {
        Self::identity()
    }
}
