//! Publish planning: turn a draft snapshot into published upserts and
//! change-log entries.
//!
//! Pure logic. Store implementations take the snapshot under their own
//! lock or transaction, call [`plan_publish`], then apply the plan: every
//! upsert first, change-log entries after.

use std::collections::HashMap;

use crate::change_log::{NewChangeLogEntry, ACTION_PUBLISH, ENTITY_MENU_ITEM};
use crate::menu::MenuItem;

/// The writes a publish will perform, in application order.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishPlan {
    /// Full rows to insert-or-overwrite in the published table.
    pub upserts: Vec<MenuItem>,
    /// One entry per upsert, in the same order.
    pub entries: Vec<NewChangeLogEntry>,
}

impl PublishPlan {
    pub fn len(&self) -> usize {
        self.upserts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty()
    }
}

/// Build the publish plan for `drafts` against the currently `published` rows.
///
/// `published` may contain rows with no draft; those are left untouched.
pub fn plan_publish(drafts: Vec<MenuItem>, published: &[MenuItem], user_id: &str) -> PublishPlan {
    let current: HashMap<&str, &MenuItem> =
        published.iter().map(|p| (p.id.as_str(), p)).collect();

    let entries = drafts
        .iter()
        .map(|draft| NewChangeLogEntry {
            entity: ENTITY_MENU_ITEM.to_string(),
            entity_id: draft.id.clone(),
            action: ACTION_PUBLISH.to_string(),
            before: current.get(draft.id.as_str()).map(|p| p.snapshot()),
            after: draft.snapshot(),
            user_id: user_id.to_string(),
        })
        .collect();

    PublishPlan {
        upserts: drafts,
        entries,
    }
}
