use js_sys::JSON;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use odometer_core::{
    Config, ManualClock, OdometerController, OdometerError, OdometerEvent, Outputs,
    RecordingSurface, SurfaceOp, TargetInput,
};

/// Everything the JS painter needs after one call: surface operations to
/// replay against the DOM, structural events, and whether to keep the
/// `requestAnimationFrame` loop alive.
#[derive(Debug, Serialize)]
pub struct FramePayload<'a> {
    pub ops: Vec<SurfaceOp>,
    pub events: &'a [OdometerEvent],
    pub animating: bool,
}

pub fn frame_payload(ops: Vec<SurfaceOp>, outputs: &Outputs, animating: bool) -> FramePayload<'_> {
    FramePayload {
        ops,
        events: &outputs.events,
        animating,
    }
}

#[wasm_bindgen]
pub struct WasmOdometer {
    core: OdometerController<RecordingSurface, ManualClock>,
    clock: ManualClock,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn target_from_js(value: JsValue) -> Result<TargetInput, JsError> {
    if let Some(n) = value.as_f64() {
        return Ok(TargetInput::Number(n));
    }
    if let Some(s) = value.as_string() {
        return Ok(TargetInput::Text(s));
    }
    let shown = JSON::stringify(&value)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| "<unprintable>".into());
    Err(JsError::new(&format!("Invalid target: {shown}")))
}

#[wasm_bindgen]
impl WasmOdometer {
    /// Create an odometer. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new WasmOdometer({ min_velocity: 2, separator: "." })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmOdometer, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        let clock = ManualClock::default();
        let core = OdometerController::new(RecordingSurface::new(), clock.clone(), cfg)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WasmOdometer { core, clock })
    }

    /// Point the odometer at a number or numeric string. `now_ms` is the host's
    /// `performance.now()`, the same timeline later passed to `tick`; a new
    /// animation leg starts from it.
    /// Returns `{ ops, events, animating }`.
    #[wasm_bindgen(js_name = set_target)]
    pub fn set_target(&mut self, value: JsValue, now_ms: f64) -> Result<JsValue, JsError> {
        let target = target_from_js(value)?;
        self.set_target_at(target, now_ms)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.payload()
    }

    /// Advance to the host frame time `now_ms`. Returns `{ ops, events, animating }`.
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: f64) -> Result<JsValue, JsError> {
        self.tick_at(now_ms);
        self.payload()
    }

    #[wasm_bindgen]
    pub fn digits(&self) -> String {
        self.core.digits()
    }

    #[wasm_bindgen]
    pub fn display(&self) -> String {
        self.core.display()
    }

    #[wasm_bindgen(js_name = is_animating)]
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }

    #[wasm_bindgen(js_name = wheel_count)]
    pub fn wheel_count(&self) -> u32 {
        self.core.wheels().len() as u32
    }
}

impl WasmOdometer {
    // The clock is brought up to the host time before retargeting, so a leg
    // started after an idle spell does not inherit the idle time as its first dt.
    fn set_target_at(&mut self, target: TargetInput, now_ms: f64) -> Result<(), OdometerError> {
        self.clock.set_millis(now_ms);
        self.core.set_target(target)?;
        Ok(())
    }

    fn tick_at(&mut self, now_ms: f64) {
        self.clock.set_millis(now_ms);
        self.core.tick();
    }

    fn payload(&mut self) -> Result<JsValue, JsError> {
        let ops = self.core.surface_mut().take_ops();
        let animating = self.core.is_animating();
        let payload = frame_payload(ops, self.core.outputs(), animating);
        payload
            .serialize(&swb::Serializer::json_compatible())
            .map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use odometer_core::{Slot, WheelId};

    fn odometer() -> WasmOdometer {
        let clock = ManualClock::default();
        let core =
            OdometerController::new(RecordingSurface::new(), clock.clone(), Config::default())
                .unwrap();
        WasmOdometer { core, clock }
    }

    #[test]
    fn retarget_after_idle_spell_scrolls_instead_of_jumping() {
        let mut odo = odometer();
        odo.set_target_at(TargetInput::Number(10.0), 0.0).unwrap();
        odo.tick_at(16.0);

        // JS loop sleeps while nothing animates, then retargets much later.
        odo.set_target_at(TargetInput::Number(90.0), 10_000.0).unwrap();
        odo.tick_at(10_016.0);

        let ones = odo.core.wheel(WheelId(0)).unwrap();
        assert!(ones.current() > 10.0 && ones.current() < 90.0);
        assert!(odo.core.is_animating());
    }

    #[test]
    fn payload_serializes_ops_and_events() {
        let clock = ManualClock::default();
        let mut core =
            OdometerController::new(RecordingSurface::new(), clock, Config::default()).unwrap();
        core.set_target(12u64).unwrap();
        let ops = core.surface_mut().take_ops();
        let payload = frame_payload(ops, core.outputs(), core.is_animating());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["animating"], false);
        assert_eq!(json["ops"][0]["op"], "clear");
        assert_eq!(json["ops"][1]["op"], "mount");
        assert_eq!(json["events"][0]["type"], "rebuilt");
        assert_eq!(json["events"][0]["wheels"], 2);
    }

    #[test]
    fn payload_ops_are_drained() {
        let mut core = OdometerController::new(
            RecordingSurface::new(),
            ManualClock::default(),
            Config::default(),
        )
        .unwrap();
        core.set_target(3u64).unwrap();
        assert!(!core.surface_mut().take_ops().is_empty());
        assert!(core.surface().ops().is_empty());

        let first_mount = SurfaceOp::Mount {
            slot: Slot::Digit { wheel: WheelId(0) },
            position: 0,
        };
        core.set_target(2u64).unwrap();
        assert_eq!(core.surface().ops()[1], first_mount);
    }
}
