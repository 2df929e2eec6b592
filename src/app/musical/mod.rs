//! Musical types and logic.

use super::*;

pub mod key;
pub mod note;
pub mod scale;

pub use key::{KeyConfiguration, KeyError};
pub use note::{Accidental, KeyRoot, PitchClass};
pub use scale::{ScaleMode, ScaleTable, MAJOR_SCALE_DEGREES};
