//! Global utility functions, publicly re-exported in `prelude.rs`.

use crate::settings::{CV_REFERENCE_NOTE, NUM_NOTES_CHROMATIC};

pub mod atomic_ops;
pub mod general;
pub mod spin_lock;
pub mod timer;

pub use atomic_ops::AtomicOps;
pub use general::*;
pub use spin_lock::{SpinLock, SpinLockGuard};
pub use timer::TimerThread;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_to_cv_reference_points() {
        assert!(eps_eq_f32(note_to_cv(60), 0.0));
        assert!(eps_eq_f32(note_to_cv(72), 1.0));
        assert!(eps_eq_f32(note_to_cv(48), -1.0));
    }

    #[test]
    fn test_note_cv_conversion() {
        for note in [0, 7, 33, 60, 61, 99, 127] {
            let cv = note_to_cv(note);
            assert!(within_tolerance(cv_to_note(cv), f32::from(note), 1e-4));
        }

        assert!(within_tolerance(note_to_cv(61), 1.0 / 12.0, 1e-6));
        assert!(within_tolerance(note_to_cv(0), -5.0, 1e-6));
    }

    #[test]
    fn test_range_mapping() {
        assert!(eps_eq_f32(map_f32(0.5, 0.0, 1.0, 0.0, 10.0), 5.0));
        assert!(eps_eq_f32(map_f32(127.0, 0.0, 127.0, 0.0, 10.0), 10.0));
        assert!(eps_eq_f32(normalize_f32(3.0, 2.0, 4.0), 0.5));
    }
}
