use bevy::prelude::*;

use odometer_core::SurfaceOp;

use crate::components::{DigitGlyphs, OdometerSlot, SlotPosition};
use crate::resources::{MountedSlots, PendingSurfaceOps, SetOdometerTarget};
use crate::Odometer;

/// Mirror Bevy's elapsed time into the odometer clock before anything reads it.
pub fn sync_clock_system(mut odo: ResMut<Odometer>, time: Res<Time>) {
    odo.clock_mut().elapsed = time.elapsed();
}

/// Forward target requests to the core. Rejected values are logged and dropped.
pub fn apply_target_requests_system(
    mut odo: ResMut<Odometer>,
    mut requests: EventReader<SetOdometerTarget>,
) {
    for SetOdometerTarget(value) in requests.read() {
        if let Err(err) = odo.set_target(value.clone()) {
            warn!("ignoring odometer target {value:?}: {err}");
        }
    }
}

/// Step every animating wheel and stage the resulting surface operations.
pub fn tick_odometer_system(mut odo: ResMut<Odometer>, mut pending: ResMut<PendingSurfaceOps>) {
    odo.tick();
    let ops = odo.surface_mut().take_ops();
    pending.ops.extend(ops);
}

/// Apply staged surface operations to the ECS: mount/clear spawn and despawn
/// slot entities, draws update `DigitGlyphs`.
pub fn apply_surface_ops_system(
    mut commands: Commands,
    mut pending: ResMut<PendingSurfaceOps>,
    mut mounted: ResMut<MountedSlots>,
) {
    if pending.ops.is_empty() {
        return;
    }
    let mut reorder = false;

    for op in std::mem::take(&mut pending.ops) {
        match op {
            SurfaceOp::Mount { slot, position } => {
                let entity = commands.spawn(OdometerSlot(slot)).id();
                let position = position.min(mounted.entities.len());
                mounted.entities.insert(position, (slot, entity));
                reorder = true;
            }
            SurfaceOp::Clear => {
                for (_, entity) in mounted.entities.drain(..) {
                    commands.entity(entity).despawn();
                }
            }
            SurfaceOp::Draw { frame } => {
                if let Some(entity) = mounted.digit_entity(frame.wheel) {
                    commands.entity(entity).insert(DigitGlyphs {
                        current: frame.current_glyph,
                        next: frame.next_glyph,
                        offset: frame.offset as f32,
                    });
                }
            }
            // Bevy already runs Update every frame.
            SurfaceOp::RequestFrame => {}
        }
    }

    if reorder {
        for (index, (_, entity)) in mounted.entities.iter().enumerate() {
            commands.entity(*entity).insert(SlotPosition(index));
        }
    }
}
