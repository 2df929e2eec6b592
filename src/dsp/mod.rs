//! Sample-rate signal sources and utilities.

use crate::prelude::*;

pub mod clock;
pub mod random;
pub mod trigger;

pub use clock::Clock;
pub use random::Lfsr;
pub use trigger::SchmittTrigger;
