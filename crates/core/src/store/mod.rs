//! Persistence seam for site content.
//!
//! Every method is atomic with respect to other calls on the same store.
//! Multi-row writes either apply completely or not at all.

mod memory;

pub use memory::MemoryContentStore;

use async_trait::async_trait;

use crate::change_log::ChangeLogEntry;
use crate::error::StoreResult;
use crate::hero::{HeroSlide, NewHeroSlide};
use crate::menu::MenuItem;
use crate::settings::Settings;
use crate::types::DbId;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> StoreResult<()>;

    // -- drafts --------------------------------------------------------------

    /// All drafts, ordered by `id`.
    async fn list_drafts(&self) -> StoreResult<Vec<MenuItem>>;

    async fn find_draft(&self, id: &str) -> StoreResult<Option<MenuItem>>;

    /// Drafts whose ids appear in `ids`, in unspecified order.
    async fn find_drafts(&self, ids: &[String]) -> StoreResult<Vec<MenuItem>>;

    /// Insert or fully replace each draft, as one batch.
    ///
    /// When `items` repeats an id, the later entry wins.
    async fn upsert_drafts(&self, items: &[MenuItem]) -> StoreResult<()>;

    // -- published -----------------------------------------------------------

    /// Published items ordered by `id`, optionally only `is_active` ones.
    async fn list_published(&self, active_only: bool) -> StoreResult<Vec<MenuItem>>;

    async fn find_published(&self, id: &str) -> StoreResult<Option<MenuItem>>;

    /// Copy every draft onto the published table and append one change-log
    /// entry per draft, attributed to `user_id`.
    ///
    /// Concurrent publishes are serialised so their before/after reads never
    /// interleave. Returns the appended entries in draft-id order.
    async fn publish_drafts(&self, user_id: &str) -> StoreResult<Vec<ChangeLogEntry>>;

    // -- change log ----------------------------------------------------------

    /// Newest `limit` entries, by `created_at` then `id`, descending.
    async fn list_change_log(&self, limit: i64) -> StoreResult<Vec<ChangeLogEntry>>;

    // -- hero slides ---------------------------------------------------------

    /// Slides ordered by `position`, then `id`.
    async fn list_hero_slides(&self) -> StoreResult<Vec<HeroSlide>>;

    /// Append a slide after the current last position.
    async fn create_hero_slide(&self, slide: &NewHeroSlide) -> StoreResult<HeroSlide>;

    /// Returns `false` if no slide had that id.
    async fn delete_hero_slide(&self, id: DbId) -> StoreResult<bool>;

    /// Set each listed slide's position to its index in `ordered`.
    async fn reorder_hero_slides(&self, ordered: &[DbId]) -> StoreResult<Vec<HeroSlide>>;

    // -- settings ------------------------------------------------------------

    async fn find_settings(&self) -> StoreResult<Option<Settings>>;

    async fn save_settings(&self, settings: &Settings) -> StoreResult<Settings>;
}
