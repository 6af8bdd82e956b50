//! wasm-bindgen surface for the Kinetype effect engine.
//!
//! The host page owns the frame loop (requestAnimationFrame) and the text
//! nodes; this adapter converts JsValue specs and inputs, steps the core,
//! and hands back Outputs as a plain JS object. Panic hook installation is
//! explicit one-time initialization in the constructor, not a module-load
//! side effect.

use js_sys::Function;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use kinetype_core::{
    Config, Engine, HandleId, Inputs, ScrambleSpec, TargetResolver, TypewriterSpec,
};

/// Bumped when the JS-visible surface changes shape.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

#[wasm_bindgen]
pub struct KinetypeEffects {
    core: Engine,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

struct JsResolver {
    f: Function,
}

impl TargetResolver for JsResolver {
    fn resolve(&mut self, path: &str) -> Option<String> {
        // Call JS resolver(path) - expect string key; allow number fallback -> string
        let arg = JsValue::from_str(path);
        match self.f.call1(&JsValue::UNDEFINED, &arg) {
            Ok(val) => {
                if val.is_undefined() || val.is_null() {
                    return None;
                }
                if let Some(s) = val.as_string() {
                    return Some(s);
                }
                if let Some(n) = val.as_f64() {
                    return Some(if n.fract() == 0.0 {
                        format!("{}", n as i64)
                    } else {
                        format!("{}", n)
                    });
                }
                swb::from_value::<String>(val).ok()
            }
            Err(_) => None,
        }
    }
}

#[wasm_bindgen]
impl KinetypeEffects {
    /// Create a new engine instance. Pass a JSON config object or
    /// undefined/null for defaults. Example:
    ///   new KinetypeEffects({ segment_pause: 0.3 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<KinetypeEffects, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(KinetypeEffects {
            core: Engine::new(cfg),
        })
    }

    /// Start a scramble reveal writing to `path`. `spec` is a JSON object
    /// matching ScrambleSpec. Returns a handle (u32).
    #[wasm_bindgen(js_name = start_scramble)]
    pub fn start_scramble(&mut self, path: String, spec: JsValue) -> Result<u32, JsError> {
        let spec: ScrambleSpec = swb::from_value(spec)
            .map_err(|e| JsError::new(&format!("scramble spec parse error: {e}")))?;
        let id = self
            .core
            .start_scramble(&path, spec)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(id.0)
    }

    /// Start a typewriter sequence writing to `path/seg{i}` sub-targets plus
    /// `path/caret`. `spec` is a JSON object matching TypewriterSpec.
    /// Returns a handle (u32).
    #[wasm_bindgen(js_name = start_typewriter)]
    pub fn start_typewriter(&mut self, path: String, spec: JsValue) -> Result<u32, JsError> {
        let spec: TypewriterSpec = swb::from_value(spec)
            .map_err(|e| JsError::new(&format!("typewriter spec parse error: {e}")))?;
        let id = self
            .core
            .start_typewriter(&path, spec)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(id.0)
    }

    /// Accessible label for a typewriter spec: the fully-typed segments
    /// joined by single spaces. Set it on the bound element before the first
    /// frame so assistive technology reads the true content.
    #[wasm_bindgen(js_name = accessible_text)]
    pub fn accessible_text(&self, spec: JsValue) -> Result<String, JsError> {
        let spec: TypewriterSpec = swb::from_value(spec)
            .map_err(|e| JsError::new(&format!("typewriter spec parse error: {e}")))?;
        Ok(spec.accessible_text())
    }

    /// Cancel an in-flight effect; the unmount path. Returns whether the
    /// handle was still live. No further writes occur afterwards.
    #[wasm_bindgen]
    pub fn cancel(&mut self, handle: u32) -> bool {
        self.core.cancel(HandleId(handle))
    }

    /// True while the handle still owns a live effect.
    #[wasm_bindgen(js_name = is_active)]
    pub fn is_active(&self, handle: u32) -> bool {
        self.core.is_active(HandleId(handle))
    }

    /// Resolve canonical key paths to opaque keys using a JS resolver
    /// callback, called as `resolver(path: string) -> string | number |
    /// null/undefined`. Resolved values are stored as strings.
    #[wasm_bindgen]
    pub fn prebind(&mut self, resolver: Function) {
        let mut js_resolver = JsResolver { f: resolver };
        self.core.prebind(&mut js_resolver);
    }

    /// Step the effects by dt (seconds) with inputs JSON. Returns Outputs
    /// JSON: `{ changes: [{handle, key, value}], events: [...] }`.
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json)
                .map_err(|e| JsError::new(&format!("inputs parse error: {e}")))?
        };
        let outputs = self.core.update(dt, inputs);
        swb::to_value(outputs).map_err(|e| JsError::new(&format!("outputs serialize error: {e}")))
    }
}
