//! A single digit wheel: one decimal place easing toward its target.
//!
//! `current` accumulates whole rotations rather than wrapping, so the wheel
//! for the tens place of 1234 sits at 123.0 once settled. The glyph shown is
//! `floor(current) mod 10`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::VelocityParams;
use crate::ids::WheelId;

/// Carries are reported as soon as the next digit starts scrolling in, not
/// when it has fully arrived.
const ROLLOVER_BIAS: f64 = 0.999;

/// Receives carries out of a wheel, synchronously during [`DigitWheel::advance`].
pub trait RolloverListener {
    fn on_rollover(&mut self, id: WheelId, amount: u64);
}

impl RolloverListener for Vec<(WheelId, u64)> {
    fn on_rollover(&mut self, id: WheelId, amount: u64) {
        self.push((id, amount));
    }
}

/// Outcome of [`DigitWheel::set_target`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Retarget {
    /// First target: the wheel jumped straight to it and should be drawn now.
    Seeded,
    /// Target lies below the wheel's position; it jumped there without animating.
    Rebased,
    /// The wheel has a gap to close and is subscribed to frames.
    Animating,
    /// Nothing to animate.
    Idle,
}

impl Retarget {
    #[inline]
    pub fn needs_draw(self) -> bool {
        matches!(self, Retarget::Seeded | Retarget::Rebased)
    }
}

/// Visual state of one wheel as handed to a render surface.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelFrame {
    pub wheel: WheelId,
    /// Glyph scrolling out; blank while the wheel sits below 1.
    pub current_glyph: char,
    /// Glyph scrolling in from below.
    pub next_glyph: char,
    /// Fractional progress toward `next_glyph`, in `[0, 1)`.
    pub offset: f64,
}

impl WheelFrame {
    /// Vertical offset of the outgoing glyph, in percent of the slot height.
    pub fn current_offset_percent(&self) -> f64 {
        self.offset * 100.0
    }

    /// Vertical offset of the incoming glyph, in percent of the slot height.
    pub fn next_offset_percent(&self) -> f64 {
        self.offset * 100.0 - 100.0
    }

    /// Whichever glyph covers most of the slot.
    pub fn dominant_glyph(&self) -> char {
        if self.offset >= 0.5 {
            self.next_glyph
        } else {
            self.current_glyph
        }
    }
}

#[inline]
pub(crate) fn digit_char(value: u64) -> char {
    (b'0' + (value % 10) as u8) as char
}

/// Number of multiples of ten crossed by the biased position moving from
/// `before` to `after`. Summing over consecutive steps telescopes exactly.
#[inline]
fn carries(before: f64, after: f64) -> u64 {
    let lo = ((before + ROLLOVER_BIAS) / 10.0).floor();
    let hi = ((after + ROLLOVER_BIAS) / 10.0).floor();
    if hi > lo {
        (hi - lo) as u64
    } else {
        0
    }
}

#[derive(Clone, Debug)]
pub struct DigitWheel {
    id: WheelId,
    current: f64,
    target: Option<u64>,
    velocity: VelocityParams,
    animating: bool,
    last_frame: Duration,
}

impl DigitWheel {
    pub fn new(id: WheelId, velocity: VelocityParams) -> Self {
        Self {
            id,
            current: 0.0,
            target: None,
            velocity,
            animating: false,
            last_frame: Duration::ZERO,
        }
    }

    #[inline]
    pub fn id(&self) -> WheelId {
        self.id
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> Option<u64> {
        self.target
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn velocity(&self) -> VelocityParams {
        self.velocity
    }

    /// Distance left to travel; zero when unset or settled.
    pub fn gap(&self) -> f64 {
        match self.target {
            Some(t) => (t as f64 - self.current).max(0.0),
            None => 0.0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.target.is_some() && self.gap() == 0.0
    }

    /// Point the wheel at `target`. `now` stamps the start of a new animation leg.
    pub fn set_target(&mut self, target: u64, now: Duration) -> Retarget {
        let first = self.target.is_none();
        self.target = Some(target);
        let target = target as f64;

        if first {
            self.current = target;
            return Retarget::Seeded;
        }
        if target < self.current {
            self.current = target;
            self.animating = false;
            return Retarget::Rebased;
        }
        if target == self.current {
            return if self.animating {
                Retarget::Animating
            } else {
                Retarget::Idle
            };
        }
        if !self.animating {
            self.animating = true;
            self.last_frame = now;
        }
        Retarget::Animating
    }

    /// Seconds since this wheel's previous frame; records `now` as the new previous frame.
    pub fn frame_dt(&mut self, now: Duration) -> f64 {
        let dt = now.saturating_sub(self.last_frame).as_secs_f64();
        self.last_frame = now;
        dt
    }

    /// Move toward the target by `dt` seconds, reporting any carries to `listener`.
    ///
    /// Returns the distance travelled. The wheel unsubscribes from frames once
    /// it reaches its target.
    pub fn advance(&mut self, dt: f64, listener: &mut dyn RolloverListener) -> f64 {
        let Some(target) = self.target else {
            return 0.0;
        };
        let target = target as f64;
        let gap = target - self.current;
        if gap <= 0.0 {
            self.animating = false;
            return 0.0;
        }

        let mut step = self.velocity.velocity(gap) * dt.max(0.0);
        let before = self.current;
        if step >= gap {
            step = gap;
            self.current = target;
        } else {
            self.current += step;
        }

        let rollovers = carries(before, self.current);
        if rollovers > 0 {
            listener.on_rollover(self.id, rollovers);
        }

        if self.current >= target {
            self.animating = false;
        }
        step
    }

    pub fn frame(&self) -> WheelFrame {
        let whole = self.current.floor();
        let int_value = whole as u64;
        WheelFrame {
            wheel: self.id,
            current_glyph: if int_value == 0 {
                ' '
            } else {
                digit_char(int_value)
            },
            next_glyph: digit_char(int_value + 1),
            offset: self.current - whole,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn wheel() -> DigitWheel {
        DigitWheel::new(WheelId(0), VelocityParams::default())
    }

    fn run_to_target(w: &mut DigitWheel, sink: &mut Vec<(WheelId, u64)>) -> usize {
        let mut frames = 0;
        while w.is_animating() {
            w.advance(FRAME, sink);
            frames += 1;
            assert!(frames < 100_000, "wheel never settled");
        }
        frames
    }

    #[test]
    fn first_target_seeds_without_animating() {
        let mut w = wheel();
        assert_eq!(w.set_target(37, Duration::ZERO), Retarget::Seeded);
        assert_eq!(w.current(), 37.0);
        assert!(!w.is_animating());
        assert!(w.is_settled());
    }

    #[test]
    fn unchanged_target_does_not_schedule() {
        let mut w = wheel();
        w.set_target(4, Duration::ZERO);
        assert_eq!(w.set_target(4, Duration::ZERO), Retarget::Idle);
        assert!(!w.is_animating());
    }

    #[test]
    fn retarget_stamps_frame_start() {
        let mut w = wheel();
        w.set_target(0, Duration::ZERO);
        assert_eq!(
            w.set_target(3, Duration::from_millis(100)),
            Retarget::Animating
        );
        assert!(w.is_animating());
        let dt = w.frame_dt(Duration::from_millis(116));
        assert!((dt - 0.016).abs() < 1e-9);
    }

    #[test]
    fn lower_target_rebases() {
        let mut w = wheel();
        w.set_target(8, Duration::ZERO);
        assert_eq!(w.set_target(2, Duration::ZERO), Retarget::Rebased);
        assert_eq!(w.current(), 2.0);
    }

    #[test]
    fn step_uses_clamped_velocity() {
        let mut w = wheel();
        let mut sink = Vec::new();
        w.set_target(0, Duration::ZERO);
        w.set_target(5, Duration::ZERO);
        // gap 5 * multiplier 8 = 40 units/s
        let moved = w.advance(0.01, &mut sink);
        assert!((moved - 0.4).abs() < 1e-12);
        assert!((w.current() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn min_velocity_floors_small_gaps() {
        let mut w = wheel();
        let mut sink = Vec::new();
        w.set_target(0, Duration::ZERO);
        w.set_target(1, Duration::ZERO);
        while w.gap() >= 0.1 {
            w.advance(0.01, &mut sink);
        }
        let gap = w.gap();
        assert!(gap > 0.05 && gap < 0.125);
        // 8 * gap < 1, so the floor of 1 unit/s applies
        let moved = w.advance(0.01, &mut sink);
        assert!((moved - 0.01).abs() < 1e-12);
    }

    #[test]
    fn snaps_without_overshoot() {
        let mut w = wheel();
        let mut sink = Vec::new();
        w.set_target(0, Duration::ZERO);
        w.set_target(2, Duration::ZERO);
        let moved = w.advance(10.0, &mut sink);
        assert_eq!(moved, 2.0);
        assert_eq!(w.current(), 2.0);
        assert!(!w.is_animating());
    }

    #[test]
    fn carry_fires_as_next_digit_scrolls_in() {
        let mut w = wheel();
        let mut sink = Vec::new();
        w.set_target(9, Duration::ZERO);
        w.set_target(10, Duration::ZERO);
        // 9.0 -> 9.08: biased position crosses 10
        w.advance(0.01, &mut sink);
        assert_eq!(sink, vec![(WheelId(0), 1)]);
        sink.clear();
        run_to_target(&mut w, &mut sink);
        assert!(sink.is_empty());
        assert_eq!(w.current(), 10.0);
    }

    #[test]
    fn carries_are_conserved_over_a_long_run() {
        let mut w = wheel();
        let mut sink = Vec::new();
        w.set_target(1234, Duration::ZERO);
        w.set_target(98_765, Duration::ZERO);
        let mut last = w.current();
        while w.is_animating() {
            w.advance(FRAME, &mut sink);
            assert!(w.current() >= last);
            assert!(w.current() <= 98_765.0);
            last = w.current();
        }
        let total: u64 = sink.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 98_765 / 10 - 1234 / 10);
    }

    #[test]
    fn frame_glyphs_and_offsets() {
        let mut w = wheel();
        w.set_target(0, Duration::ZERO);
        let f = w.frame();
        assert_eq!(f.current_glyph, ' ');
        assert_eq!(f.next_glyph, '1');

        w.set_target(20, Duration::ZERO);
        let mut sink = Vec::new();
        while w.current() < 19.25 {
            w.advance(0.001, &mut sink);
        }
        let f = w.frame();
        assert_eq!(f.current_glyph, '9');
        assert_eq!(f.next_glyph, '0');
        assert!(f.offset > 0.0 && f.offset < 1.0);
        assert!((f.next_offset_percent() - (f.current_offset_percent() - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn ten_renders_as_zero_not_blank() {
        let mut w = wheel();
        w.set_target(10, Duration::ZERO);
        let f = w.frame();
        assert_eq!(f.current_glyph, '0');
        assert_eq!(f.offset, 0.0);
        assert_eq!(f.dominant_glyph(), '0');
    }
}
