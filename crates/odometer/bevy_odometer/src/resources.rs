use bevy::prelude::*;
use std::time::Duration;

use odometer_core::{FrameClock, Slot, SurfaceOp, TargetInput};

/// Clock fed from Bevy's `Time` once per frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppClock {
    pub elapsed: Duration,
}

impl FrameClock for AppClock {
    fn now(&self) -> Duration {
        self.elapsed
    }
}

/// Request to point the odometer at a new value.
#[derive(Event, Debug, Clone)]
pub struct SetOdometerTarget(pub TargetInput);

impl From<u64> for SetOdometerTarget {
    fn from(value: u64) -> Self {
        Self(TargetInput::Number(value as f64))
    }
}

impl From<&str> for SetOdometerTarget {
    fn from(value: &str) -> Self {
        Self(TargetInput::Text(value.to_string()))
    }
}

/// Surface operations staged by the tick system and applied in a separate
/// system (keeps ordering explicit: Compute -> Apply).
#[derive(Resource, Default)]
pub struct PendingSurfaceOps {
    pub ops: Vec<SurfaceOp>,
}

/// Entities backing the mounted slots, in visual order (leftmost first).
#[derive(Resource, Default)]
pub struct MountedSlots {
    pub entities: Vec<(Slot, Entity)>,
}

impl MountedSlots {
    pub fn digit_entity(&self, wheel: odometer_core::WheelId) -> Option<Entity> {
        self.entities.iter().find_map(|(slot, e)| match slot {
            Slot::Digit { wheel: w } if *w == wheel => Some(*e),
            _ => None,
        })
    }
}
