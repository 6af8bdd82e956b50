//! Kinetype core (engine-agnostic)
//!
//! Time-driven text reveal effects: a scramble reveal that converges a field
//! of flickering characters onto a target string, and a typewriter sequencer
//! that types ordered segments one character at a time with an optional
//! blinking caret. The host drives the engine from its own frame loop via
//! `Engine::update(dt, inputs)` and applies the emitted key/value changes to
//! its render targets. No timers, no host types: the core is a function of
//! elapsed time plus the scramble flicker memory.

pub mod alphabet;
pub mod binding;
pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod outputs;
pub mod rng;
pub mod scramble;
pub mod typewriter;
pub mod value;

// Re-exports for consumers (adapters)
pub use alphabet::ScrambleAlphabet;
pub use binding::{BindingTable, TargetHandle, TargetResolver};
pub use config::Config;
pub use engine::Engine;
pub use error::EffectError;
pub use ids::{HandleId, IdAllocator};
pub use inputs::Inputs;
pub use outputs::{Change, EffectEvent, Outputs};
pub use scramble::ScrambleSpec;
pub use typewriter::TypewriterSpec;
pub use value::Value;
