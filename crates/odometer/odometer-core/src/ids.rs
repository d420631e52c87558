//! Wheel identifiers.

use serde::{Deserialize, Serialize};

/// Decimal place of a wheel: 0 is the ones digit, 1 the tens, and so on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct WheelId(pub u32);

impl WheelId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The next more significant place.
    #[inline]
    pub fn next(self) -> WheelId {
        WheelId(self.0.wrapping_add(1))
    }

    /// `10^id`, the weight of this place in the displayed value.
    #[inline]
    pub fn place_value(self) -> u64 {
        10u64.saturating_pow(self.0)
    }
}

impl From<usize> for WheelId {
    fn from(index: usize) -> Self {
        WheelId(index as u32)
    }
}

impl std::fmt::Display for WheelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wheel#{}", self.0)
    }
}
