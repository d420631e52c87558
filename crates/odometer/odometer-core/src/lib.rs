//! Odometer Core (renderer-agnostic)
//!
//! Rolling digit-wheel counter: one [`DigitWheel`] per decimal place, each
//! easing toward its target, with carries cascading from the least significant
//! wheel upward exactly as a mechanical odometer does. Painting is delegated to
//! a [`RenderSurface`]; frame pacing to a [`FrameClock`].

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod ids;
pub mod layout;
pub mod outputs;
pub mod surface;
pub mod target;
pub mod wheel;

// Re-exports for consumers (adapters)
pub use clock::{FrameClock, ManualClock, SystemClock};
pub use config::{Config, VelocityParams};
pub use controller::OdometerController;
pub use error::OdometerError;
pub use ids::WheelId;
pub use layout::Slot;
pub use outputs::{OdometerEvent, Outputs};
pub use surface::{NullSurface, RecordingSurface, RenderSurface, SurfaceOp, TextSurface};
pub use target::{IntoTarget, TargetInput, MAX_TARGET};
pub use wheel::{DigitWheel, Retarget, RolloverListener, WheelFrame};

/// Odometer result type
pub type Result<T> = core::result::Result<T, OdometerError>;
