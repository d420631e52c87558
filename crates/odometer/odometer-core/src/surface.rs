//! Rendering collaborator contract and a few stock surfaces.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::ids::WheelId;
use crate::layout::Slot;
use crate::wheel::WheelFrame;

/// What the controller needs from whatever paints the odometer.
pub trait RenderSurface {
    /// Create a digit slot or separator marker and insert it at visual
    /// `position` (0 = leftmost).
    fn mount(&mut self, slot: Slot, position: usize);

    /// Remove every slot and marker.
    fn clear(&mut self);

    /// Paint one wheel's current/next glyph pair at its fractional offset.
    fn draw(&mut self, frame: &WheelFrame);

    /// Ask for another display refresh; the host answers with `tick()`.
    fn request_frame(&mut self) {}
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn mount(&mut self, slot: Slot, position: usize) {
        (**self).mount(slot, position)
    }
    fn clear(&mut self) {
        (**self).clear()
    }
    fn draw(&mut self, frame: &WheelFrame) {
        (**self).draw(frame)
    }
    fn request_frame(&mut self) {
        (**self).request_frame()
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn mount(&mut self, slot: Slot, position: usize) {
        (**self).mount(slot, position)
    }
    fn clear(&mut self) {
        (**self).clear()
    }
    fn draw(&mut self, frame: &WheelFrame) {
        (**self).draw(frame)
    }
    fn request_frame(&mut self) {
        (**self).request_frame()
    }
}

/// Surface that paints nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn mount(&mut self, _slot: Slot, _position: usize) {}
    fn clear(&mut self) {}
    fn draw(&mut self, _frame: &WheelFrame) {}
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    Mount { slot: Slot, position: usize },
    Clear,
    Draw { frame: WheelFrame },
    RequestFrame,
}

/// Buffers surface calls so a host can apply them later, e.g. across an FFI
/// boundary or in a separate ECS system.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Hand over everything recorded so far.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }
}

impl RenderSurface for RecordingSurface {
    fn mount(&mut self, slot: Slot, position: usize) {
        self.ops.push(SurfaceOp::Mount { slot, position });
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn draw(&mut self, frame: &WheelFrame) {
        self.ops.push(SurfaceOp::Draw { frame: *frame });
    }

    fn request_frame(&mut self) {
        if self.ops.last() != Some(&SurfaceOp::RequestFrame) {
            self.ops.push(SurfaceOp::RequestFrame);
        }
    }
}

/// Keeps the odometer as a single line of text, each wheel showing whichever
/// glyph covers most of its slot.
#[derive(Debug, Clone)]
pub struct TextSurface {
    separator: char,
    slots: Vec<Slot>,
    frames: HashMap<WheelId, WheelFrame>,
    frame_requests: u64,
}

impl TextSurface {
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            slots: Vec::new(),
            frames: HashMap::new(),
            frame_requests: 0,
        }
    }

    /// Uses the configured group separator.
    pub fn for_config(cfg: &Config) -> Self {
        Self::new(cfg.separator)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Frame requests received since creation.
    pub fn frame_requests(&self) -> u64 {
        self.frame_requests
    }

    pub fn line(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Digit { wheel } => self
                    .frames
                    .get(wheel)
                    .map(WheelFrame::dominant_glyph)
                    .unwrap_or(' '),
                Slot::Separator { .. } => self.separator,
            })
            .collect()
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new(',')
    }
}

impl RenderSurface for TextSurface {
    fn mount(&mut self, slot: Slot, position: usize) {
        let position = position.min(self.slots.len());
        self.slots.insert(position, slot);
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.frames.clear();
    }

    fn draw(&mut self, frame: &WheelFrame) {
        self.frames.insert(frame.wheel, *frame);
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }
}
