use js_sys::{Function, Reflect};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use vizij_text_core::{
    CaretState, Config, CountUp, CounterConfig, ResponsiveStyle, ResponsiveTypewriter,
    ScrambleConfig, ScrambleFrame, Scheduler, Scrambler, TextSink, TimerAllocator, TimerHandle,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Host timer bridge. `schedule(delayMs, timerId)` must arrange a later call
/// to `fire(timerId)` on the owning object; `cancel(timerId)` must drop it.
struct JsScheduler {
    schedule_fn: Function,
    cancel_fn: Function,
    ids: TimerAllocator,
}

impl Scheduler for JsScheduler {
    fn schedule(&mut self, delay_ms: f64) -> TimerHandle {
        let handle = self.ids.alloc();
        let delay = JsValue::from_f64(delay_ms);
        let id = JsValue::from(handle.0);
        if let Err(e) = self.schedule_fn.call2(&JsValue::UNDEFINED, &delay, &id) {
            log::error!("host schedule({delay_ms}, {}) threw: {:?}", handle.0, e);
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let id = JsValue::from(handle.0);
        if let Err(e) = self.cancel_fn.call1(&JsValue::UNDEFINED, &id) {
            log::error!("host cancel({}) threw: {:?}", handle.0, e);
        }
    }
}

/// Text sink backed by a JS object with `setText(text)`, `setStyle(style)`
/// and `setCaret(active)` methods. Missing methods are skipped.
struct JsSink {
    target: JsValue,
}

impl JsSink {
    fn new(target: JsValue) -> Result<Self, JsError> {
        if !target.is_object() {
            return Err(JsError::new(
                "sink must be an object with setText/setStyle/setCaret methods",
            ));
        }
        Ok(Self { target })
    }

    fn call(&self, method: &str, arg: &JsValue) {
        match Reflect::get(&self.target, &JsValue::from_str(method)) {
            Ok(f) if f.is_function() => {
                let f: Function = f.unchecked_into();
                if let Err(e) = f.call1(&self.target, arg) {
                    log::error!("sink.{method}() threw: {:?}", e);
                }
            }
            _ => log::warn!("sink has no {method}() method"),
        }
    }
}

impl TextSink for JsSink {
    fn set_text(&mut self, text: &str) {
        self.call("setText", &JsValue::from_str(text));
    }

    fn set_style(&mut self, style: &ResponsiveStyle) {
        match swb::to_value(style) {
            Ok(v) => self.call("setStyle", &v),
            Err(e) => log::error!("style serialize error: {e}"),
        }
    }

    fn set_caret(&mut self, caret: CaretState) {
        self.call("setCaret", &JsValue::from_bool(caret.is_active()));
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    swb::to_value(value).map_err(|e| JsError::new(&format!("{what} serialize error: {e}")))
}

/// Responsive typewriter bound to a JS sink and JS timers.
#[wasm_bindgen]
pub struct VizijTypewriter {
    core: ResponsiveTypewriter,
    sink: JsSink,
    scheduler: JsScheduler,
}

#[wasm_bindgen]
impl VizijTypewriter {
    /// Start cycling `phrases` (array of strings). `config` is optional JSON
    /// shaped like `{ typewriter: {...}, responsive: {...} }` with camelCase
    /// keys; undefined/null selects defaults.
    /// Example:
    ///   new VizijTypewriter(["Hello", "World"], { typewriter: { holdFullMs: 1500 } },
    ///                       window.innerWidth, sink, schedule, cancel)
    #[wasm_bindgen(constructor)]
    pub fn new(
        phrases: JsValue,
        config: JsValue,
        width: f64,
        sink: JsValue,
        schedule: Function,
        cancel: Function,
    ) -> Result<VizijTypewriter, JsError> {
        console_error_panic_hook::set_once();

        let phrases: Vec<String> = swb::from_value(phrases)
            .map_err(|e| JsError::new(&format!("phrases parse error: {e}")))?;
        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let mut sink = JsSink::new(sink)?;
        let mut scheduler = JsScheduler {
            schedule_fn: schedule,
            cancel_fn: cancel,
            ids: TimerAllocator::new(),
        };
        let core = ResponsiveTypewriter::start(
            phrases,
            cfg.typewriter,
            cfg.responsive,
            width,
            &mut sink,
            &mut scheduler,
        )
        .map_err(|e| JsError::new(&format!("typewriter start error: {e}")))?;

        Ok(VizijTypewriter {
            core,
            sink,
            scheduler,
        })
    }

    /// Called by the host when a scheduled timer elapses. Returns a
    /// description of what ran, or null for a stale timer.
    #[wasm_bindgen]
    pub fn fire(&mut self, timer_id: u32) -> Result<JsValue, JsError> {
        match self
            .core
            .on_timer(TimerHandle(timer_id), &mut self.sink, &mut self.scheduler)
        {
            Some(outcome) => to_js(&outcome, "timer outcome"),
            None => Ok(JsValue::NULL),
        }
    }

    /// Feed a viewport resize; restyle/restart happens after the debounce.
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f64) {
        self.core.on_resize(width, &mut self.scheduler);
    }

    #[wasm_bindgen]
    pub fn restart(&mut self) -> Result<JsValue, JsError> {
        let step = self.core.restart(&mut self.sink, &mut self.scheduler);
        to_js(&step, "step")
    }

    /// Cancel all pending timers. Safe to call more than once.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.core.stop(&mut self.scheduler);
    }

    #[wasm_bindgen]
    pub fn cursor(&self) -> Result<JsValue, JsError> {
        to_js(&self.core.typewriter().cursor(), "cursor")
    }

    #[wasm_bindgen]
    pub fn style(&self) -> Result<JsValue, JsError> {
        to_js(self.core.style(), "style")
    }
}

// JS `free()` tears down host timers too.
impl Drop for VizijTypewriter {
    fn drop(&mut self) {
        self.core.stop(&mut self.scheduler);
    }
}

#[derive(Serialize)]
struct FrameSummary {
    frame: u32,
    text: String,
    complete: bool,
}

impl From<&ScrambleFrame> for FrameSummary {
    fn from(f: &ScrambleFrame) -> Self {
        Self {
            frame: f.frame,
            text: f.text(),
            complete: f.complete,
        }
    }
}

/// Scramble transition bound to a JS sink and JS timers.
#[wasm_bindgen]
pub struct VizijScramble {
    core: Scrambler,
    sink: JsSink,
    scheduler: JsScheduler,
    rng: SmallRng,
}

#[wasm_bindgen]
impl VizijScramble {
    /// `config` is optional camelCase JSON matching the scramble options.
    /// `seed` fixes the random sequence; omitted, one is drawn from Math.random.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        sink: JsValue,
        schedule: Function,
        cancel: Function,
        seed: Option<f64>,
    ) -> Result<VizijScramble, JsError> {
        console_error_panic_hook::set_once();

        let cfg: ScrambleConfig = if jsvalue_is_undefined_or_null(&config) {
            ScrambleConfig::default()
        } else {
            swb::from_value(config)
                .map_err(|e| JsError::new(&format!("scramble config error: {e}")))?
        };
        let seed = seed.unwrap_or_else(|| js_sys::Math::random() * u32::MAX as f64);
        Ok(VizijScramble {
            core: Scrambler::new(cfg),
            sink: JsSink::new(sink)?,
            scheduler: JsScheduler {
                schedule_fn: schedule,
                cancel_fn: cancel,
                ids: TimerAllocator::new(),
            },
            rng: SmallRng::seed_from_u64(seed as u64),
        })
    }

    /// Start scrambling from `old_text` to `new_text`; frame 0 renders now.
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, old_text: String, new_text: String) -> Result<JsValue, JsError> {
        let frame = self.core.set_text(
            &old_text,
            &new_text,
            &mut self.sink,
            &mut self.scheduler,
            &mut self.rng,
        );
        to_js(&FrameSummary::from(&frame), "frame")
    }

    #[wasm_bindgen]
    pub fn fire(&mut self, timer_id: u32) -> Result<JsValue, JsError> {
        match self.core.on_timer(
            TimerHandle(timer_id),
            &mut self.sink,
            &mut self.scheduler,
            &mut self.rng,
        ) {
            Some(frame) => to_js(&FrameSummary::from(&frame), "frame"),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.core.stop(&mut self.scheduler);
    }
}

impl Drop for VizijScramble {
    fn drop(&mut self) {
        self.core.stop(&mut self.scheduler);
    }
}

/// Count-up number label bound to a JS sink and JS timers.
#[wasm_bindgen]
pub struct VizijCountUp {
    core: CountUp,
    sink: JsSink,
    scheduler: JsScheduler,
}

#[wasm_bindgen]
impl VizijCountUp {
    /// `config` is optional camelCase JSON: `{ durationMs, frameIntervalMs }`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        sink: JsValue,
        schedule: Function,
        cancel: Function,
    ) -> Result<VizijCountUp, JsError> {
        console_error_panic_hook::set_once();

        let cfg: CounterConfig = if jsvalue_is_undefined_or_null(&config) {
            CounterConfig::default()
        } else {
            swb::from_value(config)
                .map_err(|e| JsError::new(&format!("counter config error: {e}")))?
        };
        Ok(VizijCountUp {
            core: CountUp::new(cfg),
            sink: JsSink::new(sink)?,
            scheduler: JsScheduler {
                schedule_fn: schedule,
                cancel_fn: cancel,
                ids: TimerAllocator::new(),
            },
        })
    }

    /// Count from 0 to `target`; the first frame renders now.
    #[wasm_bindgen(js_name = countTo)]
    pub fn count_to(&mut self, target: f64) -> Result<JsValue, JsError> {
        let frame = self
            .core
            .count_to(target, &mut self.sink, &mut self.scheduler)
            .map_err(|e| JsError::new(&format!("count-up error: {e}")))?;
        to_js(&frame, "frame")
    }

    #[wasm_bindgen]
    pub fn fire(&mut self, timer_id: u32) -> Result<JsValue, JsError> {
        match self
            .core
            .on_timer(TimerHandle(timer_id), &mut self.sink, &mut self.scheduler)
        {
            Some(frame) => to_js(&frame, "frame"),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.core.stop(&mut self.scheduler);
    }
}

impl Drop for VizijCountUp {
    fn drop(&mut self) {
        self.core.stop(&mut self.scheduler);
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
