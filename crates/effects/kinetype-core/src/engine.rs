//! Engine: effect ownership and the public stepping API.
//!
//! Methods:
//! - new, start_scramble, start_typewriter, cancel, prebind (resolver),
//!   update (apply cancels -> advance clocks -> sample -> emit)
//!
//! Hosts call `update(dt, inputs)` from their frame loop and apply the
//! returned changes. Each effect owns its output keys exclusively; starting
//! a new effect on a path supersedes the previous one, and cancellation is
//! synchronous: after it returns, the handle never writes again.

use log::debug;

use crate::binding::{BindingTable, TargetResolver};
use crate::config::Config;
use crate::error::EffectError;
use crate::ids::{HandleId, IdAllocator};
use crate::inputs::Inputs;
use crate::outputs::{Change, EffectEvent, Outputs};
use crate::scramble::{ScrambleSpec, ScrambleState};
use crate::typewriter::{Phase, TypewriterSpec, TypewriterState};
use crate::value::Value;

#[derive(Debug)]
enum EffectState {
    Scramble(ScrambleState),
    Typewriter(TypewriterState),
}

impl EffectState {
    fn delay(&self) -> f32 {
        match self {
            EffectState::Scramble(s) => s.delay(),
            EffectState::Typewriter(t) => t.delay(),
        }
    }
}

/// One live effect bound to an output path.
#[derive(Debug)]
struct EffectInstance {
    id: HandleId,
    path: String,
    /// Canonical emit keys: `[path]` for a scramble; `[path/seg{i}...,
    /// path/caret]` for a typewriter.
    keys: Vec<String>,
    /// Engine clock for this effect, includes the start delay.
    t: f32,
    started: bool,
    /// Typewriter: sub-targets cleared and caret shown.
    init_done: bool,
    /// Typewriter: per-segment full-reveal edge already emitted.
    typed: Vec<bool>,
    completed: bool,
    /// No further writes ever; swept after the tick.
    retired: bool,
    state: EffectState,
}

/// Engine (core) with string keys toward the host.
#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    ids: IdAllocator,
    effects: Vec<EffectInstance>,
    binds: BindingTable,
    outputs: Outputs,
}

impl Engine {
    /// Create a new engine with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            effects: Vec::new(),
            binds: BindingTable::new(),
            outputs: Outputs::default(),
        }
    }

    /// Start a scramble reveal writing to `path`. Validates synchronously;
    /// nothing is scheduled on error.
    pub fn start_scramble(
        &mut self,
        path: &str,
        spec: ScrambleSpec,
    ) -> Result<HandleId, EffectError> {
        let id = self.ids.alloc_handle();
        // Handle-derived fallback seed keeps concurrent effects decorrelated
        // while runs stay reproducible.
        let seed = (u64::from(id.0) + 1).wrapping_mul(0xD6E8_FEB8_6659_FD93);
        let state = ScrambleState::new(spec, &self.cfg, seed)?;
        self.supersede(path);
        debug!("start scramble {id:?} -> {path}");
        self.effects.push(EffectInstance {
            id,
            path: path.to_string(),
            keys: vec![path.to_string()],
            t: 0.0,
            started: false,
            init_done: true,
            typed: Vec::new(),
            completed: false,
            retired: false,
            state: EffectState::Scramble(state),
        });
        Ok(id)
    }

    /// Start a typewriter sequence writing to `path/seg{i}` sub-targets plus
    /// `path/caret`. Validates synchronously; nothing is scheduled on error.
    pub fn start_typewriter(
        &mut self,
        path: &str,
        spec: TypewriterSpec,
    ) -> Result<HandleId, EffectError> {
        let id = self.ids.alloc_handle();
        let state = TypewriterState::new(spec, &self.cfg)?;
        self.supersede(path);
        let n = state.segment_count();
        let mut keys: Vec<String> = (0..n).map(|i| format!("{path}/seg{i}")).collect();
        keys.push(format!("{path}/caret"));
        debug!("start typewriter {id:?} -> {path} ({n} segments)");
        self.effects.push(EffectInstance {
            id,
            path: path.to_string(),
            keys,
            t: 0.0,
            started: false,
            init_done: false,
            typed: vec![false; n],
            completed: false,
            retired: false,
            state: EffectState::Typewriter(state),
        });
        Ok(id)
    }

    /// Cancel an in-flight effect. Synchronous and immediate: after this
    /// returns no further writes occur for the handle. Does not force-write
    /// final text; partial state may remain visible on the host.
    pub fn cancel(&mut self, handle: HandleId) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.id != handle);
        let removed = self.effects.len() != before;
        if removed {
            debug!("cancel {handle:?}");
        }
        removed
    }

    /// True while the handle still owns a live effect.
    pub fn is_active(&self, handle: HandleId) -> bool {
        self.effects.iter().any(|e| e.id == handle)
    }

    /// One-time binding against a provided resolver: resolves each live
    /// effect's canonical keys into host handles. Unresolved keys fall back
    /// to the canonical path at emit time.
    pub fn prebind(&mut self, resolver: &mut dyn TargetResolver) {
        let Self { effects, binds, .. } = self;
        for eff in effects.iter() {
            for key in &eff.keys {
                if let Some(handle) = resolver.resolve(key) {
                    binds.upsert(key, handle);
                }
            }
        }
    }

    /// An existing effect on `path` is torn down before a new one may write
    /// there; two effects never share an output target.
    fn supersede(&mut self, path: &str) {
        let before = self.effects.len();
        self.effects.retain(|e| e.path != path);
        if self.effects.len() != before {
            debug!("superseded effect on {path}");
        }
    }

    /// Step all effects by dt with given inputs, producing outputs.
    pub fn update(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        self.outputs.clear();
        for handle in inputs.cancels {
            self.cancel(handle);
        }

        let Self {
            effects,
            binds,
            outputs,
            ..
        } = self;

        for eff in effects.iter_mut() {
            if eff.retired {
                continue;
            }
            eff.t += dt;
            let local = eff.t - eff.state.delay();
            if local < 0.0 {
                continue;
            }
            if !eff.started {
                outputs.push_event(EffectEvent::Started { handle: eff.id });
                eff.started = true;
            }
            match &mut eff.state {
                EffectState::Scramble(state) => {
                    let key = binds.key_for(&eff.keys[0]).to_string();
                    if state.is_complete(local) {
                        // Drift safety: the final write is the target text
                        // verbatim, never a residual scrambled frame.
                        outputs.push_change(Change {
                            handle: eff.id,
                            key,
                            value: Value::Text(state.final_text().to_string()),
                        });
                        outputs.push_event(EffectEvent::Completed { handle: eff.id });
                        debug!("scramble {:?} complete", eff.id);
                        eff.retired = true;
                    } else {
                        outputs.push_change(Change {
                            handle: eff.id,
                            key,
                            value: Value::Text(state.frame(local)),
                        });
                    }
                }
                EffectState::Typewriter(state) => {
                    let n = state.segment_count();
                    if !eff.init_done {
                        // Segments start empty; the caret is visible from the
                        // first active frame.
                        for i in 0..n {
                            outputs.push_change(Change {
                                handle: eff.id,
                                key: binds.key_for(&eff.keys[i]).to_string(),
                                value: Value::Text(String::new()),
                            });
                        }
                        if state.show_cursor() {
                            outputs.push_change(Change {
                                handle: eff.id,
                                key: binds.key_for(&eff.keys[n]).to_string(),
                                value: Value::Float(1.0),
                            });
                        }
                        eff.init_done = true;
                    }

                    // Full-reveal edges, in order. Drift safety per segment.
                    for i in 0..n {
                        if !eff.typed[i] && local >= state.window_end(i) {
                            outputs.push_change(Change {
                                handle: eff.id,
                                key: binds.key_for(&eff.keys[i]).to_string(),
                                value: Value::Text(state.segment_text(i).to_string()),
                            });
                            outputs.push_event(EffectEvent::SegmentTyped {
                                handle: eff.id,
                                index: i,
                            });
                            eff.typed[i] = true;
                        }
                    }

                    if let Phase::Typing { index, visible } = state.phase_at(local) {
                        if !eff.typed[index] {
                            outputs.push_change(Change {
                                handle: eff.id,
                                key: binds.key_for(&eff.keys[index]).to_string(),
                                value: Value::Text(state.prefix(index, visible)),
                            });
                        }
                    }

                    if !eff.completed && local >= state.done_at() {
                        outputs.push_event(EffectEvent::Completed { handle: eff.id });
                        debug!("typewriter {:?} complete", eff.id);
                        eff.completed = true;
                        if !state.show_cursor() {
                            eff.retired = true;
                        }
                    }

                    // The blink loop runs until cancelled.
                    if eff.completed && state.show_cursor() {
                        outputs.push_change(Change {
                            handle: eff.id,
                            key: binds.key_for(&eff.keys[n]).to_string(),
                            value: Value::Float(state.caret_opacity(local)),
                        });
                    }
                }
            }
        }

        self.effects.retain(|e| !e.retired);
        &self.outputs
    }
}
