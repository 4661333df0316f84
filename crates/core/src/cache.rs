//! Tag-keyed cache of public read views.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Published menu view. Invalidated by a publish.
pub const MENU_TAG: &str = "menu";
/// Hero carousel view. Invalidated by any slide mutation.
pub const HERO_TAG: &str = "hero";
/// Site settings view. Invalidated by a settings save.
pub const SETTINGS_TAG: &str = "settings";

/// Cache-invalidation collaborator signalled after admin writes.
pub trait CacheInvalidator: Send + Sync {
    fn invalidate(&self, tag: &str);
}

/// In-process JSON snapshot per tag.
#[derive(Debug, Default)]
pub struct ViewCache {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: &str) -> Option<serde_json::Value> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tag)
            .cloned()
    }

    pub fn put(&self, tag: &str, value: serde_json::Value) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tag.to_string(), value);
    }
}

impl CacheInvalidator for ViewCache {
    fn invalidate(&self, tag: &str) {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(tag)
            .is_some();
        tracing::debug!(tag, removed, "View cache invalidated");
    }
}
