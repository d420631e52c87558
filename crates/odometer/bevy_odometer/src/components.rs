use bevy::prelude::*;
use odometer_core::Slot;

/// One visual slot of the odometer: a digit wheel or a group separator.
#[derive(Component, Debug, Clone, Copy)]
pub struct OdometerSlot(pub Slot);

/// Position of the slot from the left edge, 0 = most significant.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPosition(pub usize);

/// Glyph pair currently scrolling through a digit slot. The outgoing glyph
/// sits `offset` slot-heights up, the incoming one directly below it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DigitGlyphs {
    pub current: char,
    pub next: char,
    pub offset: f32,
}
