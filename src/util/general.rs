//! General-purpose utility functions.

use super::*;

/// Converts a MIDI note value to a 1 V/octave control voltage, where
/// [`CV_REFERENCE_NOTE`] (middle C) sits at 0 V.
#[inline]
pub fn note_to_cv(note: u8) -> f32 {
    (f32::from(note) - CV_REFERENCE_NOTE) / NUM_NOTES_CHROMATIC as f32
}

/// Converts a 1 V/octave control voltage back to a (fractional) MIDI note
/// value.
#[inline]
pub fn cv_to_note(cv: f32) -> f32 {
    cv.mul_add(NUM_NOTES_CHROMATIC as f32, CV_REFERENCE_NOTE)
}

/// Maps a value from the provided input range to the provided output range.
#[inline]
pub fn map_f32(
    value: f32,
    in_min: f32,
    in_max: f32,
    out_min: f32,
    out_max: f32,
) -> f32 {
    normalize_f32(value, in_min, in_max).mul_add(out_max - out_min, out_min)
}

/// Normalizes a value from a provided range.
///
/// Like `map_f32()`, but with the output range set to `0.0 - 1.0`.
#[inline]
pub fn normalize_f32(value: f32, min: f32, max: f32) -> f32 {
    (value - min) / (max - min)
}

/// Returns whether `value` and `target` are equal, with a tolerance of
/// [`f32::EPSILON`].
pub fn eps_eq_f32(value: f32, target: f32) -> bool {
    (target - value).abs() < f32::EPSILON
}

/// Returns whether the absolute value of `value` is less than the provided
/// `tolerance` value. Useful for checking approximate equality.
pub fn within_tolerance(value: f32, target: f32, tolerance: f32) -> bool {
    (value - target).abs() <= tolerance
}
