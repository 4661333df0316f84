//! Append-only change log written by the publisher.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// `entity` value for menu item entries.
pub const ENTITY_MENU_ITEM: &str = "MenuItem";

/// `action` value for entries produced by a publish.
pub const ACTION_PUBLISH: &str = "publish";

/// Default page size for the change-log reader.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest page the change-log reader will return.
pub const MAX_LIMIT: i64 = 500;

/// A persisted change-log row. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    pub id: DbId,
    pub entity: String,
    pub entity_id: String,
    pub action: String,
    /// Prior state, `None` when the entity did not exist.
    pub before: Option<serde_json::Value>,
    pub after: serde_json::Value,
    pub user_id: String,
    pub created_at: Timestamp,
}

/// A change-log row awaiting insertion. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChangeLogEntry {
    pub entity: String,
    pub entity_id: String,
    pub action: String,
    pub before: Option<serde_json::Value>,
    pub after: serde_json::Value,
    pub user_id: String,
}

/// Clamp a caller-supplied page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}
