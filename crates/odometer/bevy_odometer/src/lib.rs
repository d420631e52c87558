use bevy::prelude::*;
use odometer_core::{Config, OdometerController, RecordingSurface};

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{DigitGlyphs, OdometerSlot, SlotPosition};
pub use resources::{AppClock, MountedSlots, PendingSurfaceOps, SetOdometerTarget};

/// The odometer driven by this app. Deref to the core controller to read
/// digits or call `set_target` directly.
#[derive(Resource, Deref, DerefMut)]
pub struct Odometer(pub OdometerController<RecordingSurface, AppClock>);

/// Adds an [`Odometer`] resource and the systems that step it each frame and
/// mirror its digit slots as entities.
#[derive(Default)]
pub struct OdometerPlugin {
    pub config: Config,
}

impl Plugin for OdometerPlugin {
    fn build(&self, app: &mut App) {
        let controller =
            OdometerController::new(RecordingSurface::new(), AppClock::default(), self.config.clone())
                .or_else(|err| {
                    error!("odometer config rejected ({err}); using defaults");
                    OdometerController::new(
                        RecordingSurface::new(),
                        AppClock::default(),
                        Config::default(),
                    )
                });
        let Ok(controller) = controller else {
            return;
        };

        app.insert_resource(Odometer(controller))
            .init_resource::<PendingSurfaceOps>()
            .init_resource::<MountedSlots>()
            .add_event::<SetOdometerTarget>()
            .add_systems(
                Update,
                (
                    systems::sync_clock_system,
                    systems::apply_target_requests_system,
                    systems::tick_odometer_system,
                    systems::apply_surface_ops_system,
                )
                    .chain(),
            );
    }
}
