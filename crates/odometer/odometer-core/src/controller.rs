//! OdometerController: owns the wheels, grows them and routes carries.
//!
//! Only the ones wheel is ever retargeted directly after the first build.
//! Every higher wheel moves because the wheel below it carried into it, which
//! keeps in-flight animations on higher digits running smoothly when the
//! value changes again mid-spin.

use log::{debug, trace, warn};

use crate::clock::{FrameClock, SystemClock};
use crate::config::{Config, VelocityParams};
use crate::error::OdometerError;
use crate::ids::WheelId;
use crate::layout::{self, Slot, FRONT};
use crate::outputs::{OdometerEvent, Outputs};
use crate::surface::RenderSurface;
use crate::target::IntoTarget;
use crate::wheel::{digit_char, DigitWheel};

#[derive(Debug)]
pub struct OdometerController<S: RenderSurface, C: FrameClock = SystemClock> {
    cfg: Config,
    velocity: VelocityParams,
    surface: S,
    clock: C,

    /// Index = wheel id, 0 = ones.
    wheels: Vec<DigitWheel>,
    separators: Vec<WheelId>,
    last_target: Option<u64>,

    // Carries collected while one wheel advances, routed before the next one moves.
    carries: Vec<(WheelId, u64)>,
    outputs: Outputs,
}

impl<S: RenderSurface> OdometerController<S, SystemClock> {
    /// Controller paced by the wall clock.
    pub fn with_system_clock(surface: S, cfg: Config) -> Result<Self, OdometerError> {
        Self::new(surface, SystemClock::new(), cfg)
    }
}

impl<S: RenderSurface, C: FrameClock> OdometerController<S, C> {
    /// Create an empty controller. Nothing is mounted until the first `set_target`.
    pub fn new(surface: S, clock: C, cfg: Config) -> Result<Self, OdometerError> {
        cfg.validate()?;
        Ok(Self {
            velocity: cfg.velocity(),
            cfg,
            surface,
            clock,
            wheels: Vec::new(),
            separators: Vec::new(),
            last_target: None,
            carries: Vec::new(),
            outputs: Outputs::default(),
        })
    }

    /// Point the odometer at a new value.
    ///
    /// The first call, and any call with a value smaller than the previous
    /// one, rebuilds every wheel and seeds it without animation. Larger or
    /// equal values only retarget the ones wheel; higher wheels follow through
    /// carries on later ticks. Rejected input leaves the odometer untouched.
    pub fn set_target(&mut self, value: impl IntoTarget) -> Result<&Outputs, OdometerError> {
        let value = value.into_target()?;
        self.outputs.clear();

        match self.last_target {
            Some(last) if last <= value && !self.wheels.is_empty() => {
                self.retarget(0, value);
                self.outputs
                    .push_event(OdometerEvent::Retargeted { target: value });
            }
            _ => self.rebuild(value),
        }
        self.last_target = Some(value);

        if self.is_animating() {
            self.surface.request_frame();
        }
        Ok(&self.outputs)
    }

    /// Advance every animating wheel by the time elapsed since its own last
    /// frame, least significant first.
    ///
    /// Carries out of a wheel are applied before the next wheel moves. Wheels
    /// appended by a carry start moving on the following tick.
    pub fn tick(&mut self) -> &Outputs {
        self.outputs.clear();
        let now = self.clock.now();

        let count = self.wheels.len();
        for index in 0..count {
            let wheel = &mut self.wheels[index];
            if !wheel.is_animating() {
                continue;
            }
            let dt = wheel.frame_dt(now);
            wheel.advance(dt, &mut self.carries);
            let frame = wheel.frame();
            let settled = (!wheel.is_animating()).then(|| (wheel.id(), wheel.target()));

            while let Some((id, amount)) = self.carries.pop() {
                self.on_rollover(id, amount);
            }
            self.surface.draw(&frame);

            if let Some((id, Some(value))) = settled {
                trace!("{id} settled at {value}");
                self.outputs
                    .push_event(OdometerEvent::Settled { wheel: id, value });
            }
        }

        if self.is_animating() {
            self.surface.request_frame();
        }
        &self.outputs
    }

    /// Carry `amount` whole rotations out of wheel `id` into the next wheel,
    /// appending a new most significant wheel when there is none.
    pub fn on_rollover(&mut self, id: WheelId, amount: u64) {
        if amount == 0 {
            return;
        }
        trace!("{id} carried {amount}");
        self.outputs
            .push_event(OdometerEvent::Rollover { wheel: id, amount });

        let next = id.next();
        if let Some(wheel) = self.wheels.get(next.index()) {
            let target = wheel.target().unwrap_or(0).saturating_add(amount);
            self.retarget(next.index(), target);
        } else if next.index() == self.wheels.len() {
            self.grow(amount);
        } else {
            warn!(
                "dropping carry from {id}: only {} wheels exist",
                self.wheels.len()
            );
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn wheels(&self) -> &[DigitWheel] {
        &self.wheels
    }

    pub fn wheel(&self, id: WheelId) -> Option<&DigitWheel> {
        self.wheels.get(id.index())
    }

    /// Wheels preceded by a separator marker, least significant first.
    pub fn separators(&self) -> &[WheelId] {
        &self.separators
    }

    pub fn last_target(&self) -> Option<u64> {
        self.last_target
    }

    /// Whether any wheel still wants frames.
    pub fn is_animating(&self) -> bool {
        self.wheels.iter().any(DigitWheel::is_animating)
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// For hosts whose clock is a plain value they update each frame.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Digit in place on every wheel, most significant first (leading zeros kept).
    pub fn digits(&self) -> String {
        self.wheels
            .iter()
            .rev()
            .map(|w| digit_char(w.current().floor() as u64))
            .collect()
    }

    /// The odometer as it currently reads, with group separators. Each wheel
    /// shows whichever glyph covers most of its slot, the same rule
    /// [`TextSurface`](crate::surface::TextSurface) paints with.
    pub fn display(&self) -> String {
        layout::visual_order(self.wheels.len(), self.cfg.group_size)
            .into_iter()
            .map(|slot| match slot {
                Slot::Digit { wheel } => self
                    .wheel(wheel)
                    .map(|w| w.frame().dominant_glyph())
                    .unwrap_or(' '),
                Slot::Separator { .. } => self.cfg.separator,
            })
            .collect()
    }

    fn retarget(&mut self, index: usize, target: u64) {
        let now = self.clock.now();
        let wheel = &mut self.wheels[index];
        if wheel.set_target(target, now).needs_draw() {
            let frame = wheel.frame();
            self.surface.draw(&frame);
        }
    }

    fn rebuild(&mut self, target: u64) {
        self.surface.clear();
        self.wheels.clear();
        self.separators.clear();

        // Zero still gets two wheels.
        let extra = if target == 0 { 1 } else { target.ilog10() };
        for i in 0..=extra {
            self.mount_wheel(WheelId(i));
        }
        for index in 0..self.wheels.len() {
            let seed = target / WheelId::from(index).place_value();
            self.retarget(index, seed);
        }

        debug!("rebuilt odometer for {target} with {} wheels", self.wheels.len());
        self.outputs.push_event(OdometerEvent::Rebuilt {
            target,
            wheels: self.wheels.len() as u32,
        });
    }

    fn grow(&mut self, amount: u64) {
        let id = WheelId::from(self.wheels.len());
        self.mount_wheel(id);
        // Seed at zero, then spin up to the carried amount.
        self.retarget(id.index(), 0);
        self.retarget(id.index(), amount);

        debug!("grew odometer to {} wheels", self.wheels.len());
        self.outputs
            .push_event(OdometerEvent::WheelAdded { wheel: id });
    }

    fn mount_wheel(&mut self, id: WheelId) {
        if layout::needs_separator(id, self.cfg.group_size) {
            self.surface.mount(Slot::Separator { before: id }, FRONT);
            self.outputs
                .push_event(OdometerEvent::SeparatorAdded { before: id });
        }
        self.surface.mount(Slot::Digit { wheel: id }, FRONT);
        self.wheels.push(DigitWheel::new(id, self.velocity));
        self.separators = layout::separators_for(self.wheels.len(), self.cfg.group_size);
    }
}
