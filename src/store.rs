//! Session-scoped persistence for the sidebar scroll offset

use std::collections::HashMap;

/// Default key the scroll offset is stored under
pub const DEFAULT_SCROLL_KEY: &str = "sidebar-scroll";

/// Keyed string storage that survives a single navigation.
///
/// Browsers provide this as `sessionStorage`; tests and the CLI use
/// [`MemoryStore`].
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
    fn remove_item(&mut self, key: &str);
}

/// In-process store backed by a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Remember the panel offset for the next page load (last write wins)
pub fn record_scroll<S: SessionStore + ?Sized>(store: &mut S, key: &str, offset: f64) {
    store.set_item(key, &offset.to_string());
}

/// Read the remembered offset and erase it.
///
/// The entry is removed even when it does not parse, so a bad value is
/// never seen twice.
pub fn take_scroll<S: SessionStore + ?Sized>(store: &mut S, key: &str) -> Option<f64> {
    let stored = store.get_item(key);
    store.remove_item(key);

    let stored = stored?;
    if stored.is_empty() {
        return None;
    }
    match stored.trim().parse::<f64>() {
        Ok(offset) if offset.is_finite() => Some(offset),
        _ => {
            log::warn!("Discarding unusable stored scroll offset '{}'", stored);
            None
        }
    }
}
