//! Pseudo-random sources.

use super::*;

pub mod lfsr;

pub use lfsr::Lfsr;
