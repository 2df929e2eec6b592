//! The pitch window which generated notes are folded into.

use super::*;

/// A window of MIDI notes described by a centre note and a range in
/// semitones. Both are saturated on construction, so every window is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawWindow")]
pub struct GenerationWindow {
    centre: u8,
    range: u8,
}

// deserialised windows go through the same saturation as `new()`
#[derive(Deserialize)]
#[serde(default)]
struct RawWindow {
    centre: i32,
    range: i32,
}

impl Default for RawWindow {
    fn default() -> Self {
        Self {
            centre: i32::from(DEFAULT_WINDOW_CENTRE),
            range: i32::from(DEFAULT_WINDOW_RANGE),
        }
    }
}

impl From<RawWindow> for GenerationWindow {
    fn from(raw: RawWindow) -> Self {
        Self::new(raw.centre, raw.range)
    }
}

impl GenerationWindow {
    /// Creates a new window. `centre` is clamped to `0..=127`, and `range` to
    /// `1..=127`.
    pub fn new(centre: i32, range: i32) -> Self {
        let max = i32::from(MIDI_NOTE_MAX);

        Self {
            centre: centre.clamp(0, max) as u8,
            range: range.clamp(1, max) as u8,
        }
    }

    pub const fn centre(&self) -> u8 {
        self.centre
    }

    pub const fn range(&self) -> u8 {
        self.range
    }

    /// The highest note in the window.
    pub fn upper(&self) -> u8 {
        (u16::from(self.centre) + u16::from(self.range) / 2)
            .min(u16::from(MIDI_NOTE_MAX)) as u8
    }

    /// The lowest note in the window. Never above [`upper()`](Self::upper).
    pub fn lower(&self) -> u8 {
        self.upper().saturating_sub(self.range)
    }

    /// Moves `note` by whole octaves until it lies within the window. If the
    /// window is narrower than an octave and no octave of `note` fits, the
    /// result is clamped to [`upper()`](Self::upper).
    pub fn fold(&self, note: u8) -> u8 {
        let upper = i32::from(self.upper());
        let lower = i32::from(self.lower());
        let octave = NUM_NOTES_CHROMATIC as i32;

        let mut note = i32::from(note);

        while note > upper {
            note -= octave;
        }

        while note < lower {
            note += octave;
        }

        note.min(upper) as u8
    }

    pub fn contains(&self, note: u8) -> bool {
        (self.lower()..=self.upper()).contains(&note)
    }
}

impl Default for GenerationWindow {
    fn default() -> Self {
        Self::new(
            i32::from(DEFAULT_WINDOW_CENTRE),
            i32::from(DEFAULT_WINDOW_RANGE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_saturates() {
        let w = GenerationWindow::new(-20, 0);
        assert_eq!((w.centre(), w.range()), (0, 1));

        let w = GenerationWindow::new(500, 500);
        assert_eq!((w.centre(), w.range()), (127, 127));
    }

    #[test]
    fn bounds_are_clamped_and_ordered() {
        let w = GenerationWindow::new(64, 127);
        assert_eq!(w.upper(), 127);
        assert_eq!(w.lower(), 0);

        let w = GenerationWindow::new(120, 40);
        assert_eq!(w.upper(), 127);
        assert_eq!(w.lower(), 87);

        let w = GenerationWindow::new(2, 60);
        assert_eq!(w.upper(), 32);
        assert_eq!(w.lower(), 0);

        for centre in 0..=127 {
            for range in 1..=127 {
                let w = GenerationWindow::new(centre, range);
                assert!(w.lower() <= w.upper());
            }
        }
    }

    #[test]
    fn fold_keeps_pitch_class_or_clamps_to_top() {
        for centre in 0..=127 {
            for range in 1..=127 {
                let w = GenerationWindow::new(centre, range);
                let octave_wide = w.upper() - w.lower() >= 11;

                for note in 0..=128u8 {
                    let folded = w.fold(note);
                    assert!(w.contains(folded), "{note} -> {folded} in {w:?}");

                    let fits = (w.lower()..=w.upper())
                        .any(|n| n % 12 == note % 12);

                    if fits {
                        assert_eq!(folded % 12, note % 12, "{note} in {w:?}");
                    }
                    else {
                        assert!(!octave_wide);
                        assert_eq!(folded, w.upper(), "{note} in {w:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn fold_clamps_at_the_bottom_edge() {
        // range 12 at centre 0 is saturated down to 0..=6
        let w = GenerationWindow::new(0, 12);
        assert_eq!((w.lower(), w.upper()), (0, 6));

        assert_eq!(w.fold(5), 5);
        assert_eq!(w.fold(17), 5);
        assert_eq!(w.fold(7), 6);
        assert_eq!(w.fold(19), 6);
    }

    #[test]
    fn fold_to_single_note_window() {
        // range 1: upper = 64, lower = 63
        let w = GenerationWindow::new(64, 1);

        assert_eq!(w.fold(64), 64);
        assert_eq!(w.fold(63), 63);
        assert_eq!(w.fold(4), 64);
        assert_eq!(w.fold(75), 63);
        // no octave of 50 fits, so it's clamped to the top
        assert_eq!(w.fold(50), 64);
    }

    #[test]
    fn fold_does_not_underflow() {
        let w = GenerationWindow::new(3, 4);
        assert_eq!((w.lower(), w.upper()), (1, 5));

        assert_eq!(w.fold(128), 5);
        assert_eq!(w.fold(12), 5);
        assert_eq!(w.fold(13), 1);
    }

    #[test]
    fn deserialisation_saturates() {
        let w: GenerationWindow =
            serde_json::from_str(r#"{ "centre": 300, "range": 0 }"#).unwrap();
        assert_eq!(w, GenerationWindow::new(127, 1));

        let w: GenerationWindow = serde_json::from_str("{}").unwrap();
        assert_eq!(w, GenerationWindow::default());
    }
}
