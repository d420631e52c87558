//! Output contracts from the controller.
//!
//! Every `set_target` and `tick` call resets the buffer and records what
//! happened structurally during that call. Painting goes through the
//! [`RenderSurface`](crate::surface::RenderSurface); these events are for
//! hosts that want to observe or forward the cascade.

use serde::{Deserialize, Serialize};

use crate::ids::WheelId;

/// Discrete signals emitted while retargeting and stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum OdometerEvent {
    /// All wheels were discarded and re-seeded for `target`.
    Rebuilt { target: u64, wheels: u32 },
    /// The ones wheel was pointed at a new target.
    Retargeted { target: u64 },
    /// A more significant wheel was appended by a carry.
    WheelAdded { wheel: WheelId },
    SeparatorAdded { before: WheelId },
    /// `wheel` carried `amount` into the next wheel.
    Rollover { wheel: WheelId, amount: u64 },
    /// `wheel` reached its target and stopped requesting frames.
    Settled { wheel: WheelId, value: u64 },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<OdometerEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: OdometerEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of carries out of `wheel` recorded in this buffer.
    pub fn carried_from(&self, wheel: WheelId) -> u64 {
        self.events
            .iter()
            .map(|e| match e {
                OdometerEvent::Rollover { wheel: w, amount } if *w == wheel => *amount,
                _ => 0,
            })
            .sum()
    }
}
