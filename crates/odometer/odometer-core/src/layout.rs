//! Visual arrangement of digit slots and group separators.
//!
//! Slots are always mounted at the front (leftmost position) of the visual
//! sequence, so building wheels 0..n in order leaves the most significant
//! wheel on the left.

use serde::{Deserialize, Serialize};

use crate::ids::WheelId;

/// Visual index every new slot is mounted at.
pub const FRONT: usize = 0;

/// One visual element of the odometer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot {
    Digit { wheel: WheelId },
    /// Divider drawn between `before` and the next less significant wheel.
    Separator { before: WheelId },
}

/// Whether a separator precedes the wheel at `id`.
#[inline]
pub fn needs_separator(id: WheelId, group_size: u32) -> bool {
    group_size > 0 && id.0 > 0 && id.0 % group_size == 0
}

/// Separator markers for `wheel_count` wheels, least significant first.
pub fn separators_for(wheel_count: usize, group_size: u32) -> Vec<WheelId> {
    (0..wheel_count)
        .map(WheelId::from)
        .filter(|id| needs_separator(*id, group_size))
        .collect()
}

/// Full visual sequence, leftmost first.
pub fn visual_order(wheel_count: usize, group_size: u32) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(wheel_count + wheel_count / 3);
    for index in (0..wheel_count).rev() {
        let id = WheelId::from(index);
        slots.push(Slot::Digit { wheel: id });
        if needs_separator(id, group_size) {
            slots.push(Slot::Separator { before: id });
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert!(!needs_separator(WheelId(0), 3));
        assert!(!needs_separator(WheelId(2), 3));
        assert!(needs_separator(WheelId(3), 3));
        assert!(needs_separator(WheelId(6), 3));
        assert_eq!(separators_for(7, 3), vec![WheelId(3), WheelId(6)]);
        assert!(separators_for(3, 3).is_empty());
    }

    #[test]
    fn four_digits_have_one_separator_between_three_and_two() {
        let order = visual_order(4, 3);
        assert_eq!(
            order,
            vec![
                Slot::Digit { wheel: WheelId(3) },
                Slot::Separator { before: WheelId(3) },
                Slot::Digit { wheel: WheelId(2) },
                Slot::Digit { wheel: WheelId(1) },
                Slot::Digit { wheel: WheelId(0) },
            ]
        );
    }

    #[test]
    fn slot_json_shape() {
        let json = serde_json::to_value(Slot::Separator { before: WheelId(3) }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "separator", "before": 3 }));
    }
}
