//! Binding table and resolver trait.
//!
//! Effects emit changes keyed by canonical string paths (`hero/title`,
//! `hero/tagline/seg0`, ...). The host may resolve those paths to its own
//! opaque handles via `Engine::prebind()`; unresolved paths pass through
//! unchanged.

use hashbrown::HashMap;

/// Opaque target handle (small string key).
pub type TargetHandle = String;

/// Resolves canonical key paths to host handles. Adapters (web/WASM)
/// implement this and pass it into `Engine::prebind()`.
pub trait TargetResolver {
    fn resolve(&mut self, path: &str) -> Option<TargetHandle>;
}

/// Global path -> handle table shared across effects.
#[derive(Default, Debug)]
pub struct BindingTable {
    map: HashMap<String, TargetHandle>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&TargetHandle> {
        self.map.get(path)
    }

    /// Insert or update the binding for a path.
    pub fn upsert(&mut self, path: &str, handle: TargetHandle) {
        self.map.insert(path.to_string(), handle);
    }

    /// Emitted key for a path: the resolved handle, else the path itself.
    pub fn key_for<'a>(&'a self, path: &'a str) -> &'a str {
        self.map.get(path).map(|h| h.as_str()).unwrap_or(path)
    }
}
