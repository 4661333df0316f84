//! Admin workflow: Draft Editor, CSV Bridge, Publisher, Change Log Reader,
//! plus carousel and settings management.
//!
//! Every operation starts with [`authorize`]. The rate-limited mutations
//! (draft upsert, CSV import, publish) consult the limiter next, before any
//! validation or store access. Validation always completes before the first
//! write, so a rejected call leaves the store untouched.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::cache::{CacheInvalidator, HERO_TAG, MENU_TAG, SETTINGS_TAG};
use crate::change_log::{clamp_limit, ChangeLogEntry};
use crate::csv::{build_menu_csv, parse_menu_csv};
use crate::error::CoreError;
use crate::hero::{check_reorder, HeroSlide, HeroSlideInput};
use crate::menu::{MenuItem, MenuItemInput};
use crate::rate_limit::{
    limiter_key, RateBudget, RateBudgets, RateLimiter, OP_IMPORT_CSV, OP_PUBLISH, OP_UPSERT_DRAFT,
};
use crate::session::{authorize, Actor};
use crate::settings::{Settings, SETTINGS_ID};
use crate::store::ContentStore;
use crate::types::DbId;

/// One row of an import preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftDiff {
    pub id: String,
    /// The draft as stored before the import, `None` if it did not exist.
    pub before: Option<MenuItem>,
    pub after: MenuItem,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub count: usize,
    pub diffs: Vec<DraftDiff>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub count: usize,
}

/// The admin service. Cheap to clone; all collaborators are shared.
#[derive(Clone)]
pub struct ContentAdmin {
    store: Arc<dyn ContentStore>,
    limiter: Arc<dyn RateLimiter>,
    cache: Arc<dyn CacheInvalidator>,
    budgets: RateBudgets,
}

impl ContentAdmin {
    pub fn new(
        store: Arc<dyn ContentStore>,
        limiter: Arc<dyn RateLimiter>,
        cache: Arc<dyn CacheInvalidator>,
        budgets: RateBudgets,
    ) -> Self {
        Self {
            store,
            limiter,
            cache,
            budgets,
        }
    }

    fn throttle(&self, operation: &str, actor: &Actor, budget: RateBudget) -> Result<(), CoreError> {
        let key = limiter_key(operation, &actor.email);
        if self.limiter.allow(&key, budget.limit, budget.window) {
            Ok(())
        } else {
            tracing::warn!(operation, user = %actor.email, "Rate limit exceeded");
            Err(CoreError::RateLimited(format!(
                "{operation}: at most {} calls per {}s",
                budget.limit,
                budget.window.as_secs()
            )))
        }
    }

    // -----------------------------------------------------------------------
    // Draft editor
    // -----------------------------------------------------------------------

    /// Validate `input` and insert or fully replace the draft with its id.
    pub async fn upsert_draft(
        &self,
        actor: Option<&Actor>,
        input: MenuItemInput,
    ) -> Result<MenuItem, CoreError> {
        let actor = authorize(actor)?;
        self.throttle(OP_UPSERT_DRAFT, actor, self.budgets.upsert_draft)?;
        let item = input.into_menu_item()?;

        self.store.upsert_drafts(std::slice::from_ref(&item)).await?;
        tracing::info!(id = %item.id, user = %actor.email, "Menu draft saved");
        Ok(item)
    }

    pub async fn get_draft(&self, actor: Option<&Actor>, id: &str) -> Result<MenuItem, CoreError> {
        authorize(actor)?;
        self.store
            .find_draft(id)
            .await?
            .ok_or_else(|| CoreError::not_found("MenuItemDraft", id))
    }

    pub async fn list_drafts(&self, actor: Option<&Actor>) -> Result<Vec<MenuItem>, CoreError> {
        authorize(actor)?;
        Ok(self.store.list_drafts().await?)
    }

    // -----------------------------------------------------------------------
    // CSV bridge
    // -----------------------------------------------------------------------

    /// Serialize the whole draft table, ordered by id.
    pub async fn export_csv(&self, actor: Option<&Actor>) -> Result<String, CoreError> {
        authorize(actor)?;
        let drafts = self.store.list_drafts().await?;
        Ok(build_menu_csv(&drafts))
    }

    /// Parse, validate and diff `text` against the draft table; when
    /// `dry_run` is false, also upsert every row in one batch.
    pub async fn import_csv(
        &self,
        actor: Option<&Actor>,
        text: &str,
        dry_run: bool,
    ) -> Result<ImportReport, CoreError> {
        let actor = authorize(actor)?;
        self.throttle(OP_IMPORT_CSV, actor, self.budgets.import_csv)?;
        let items = parse_menu_csv(text)?;

        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        let current: HashMap<String, MenuItem> = self
            .store
            .find_drafts(&ids)
            .await?
            .into_iter()
            .map(|d| (d.id.clone(), d))
            .collect();

        let diffs: Vec<DraftDiff> = items
            .iter()
            .map(|after| DraftDiff {
                id: after.id.clone(),
                before: current.get(&after.id).cloned(),
                after: after.clone(),
            })
            .collect();

        if !dry_run {
            self.store.upsert_drafts(&items).await?;
        }
        tracing::info!(
            count = items.len(),
            dry_run,
            user = %actor.email,
            "Menu CSV imported",
        );

        Ok(ImportReport {
            count: items.len(),
            diffs,
        })
    }

    // -----------------------------------------------------------------------
    // Publisher
    // -----------------------------------------------------------------------

    /// Copy every draft onto the published menu and log each change.
    pub async fn publish_drafts(&self, actor: Option<&Actor>) -> Result<PublishReport, CoreError> {
        let actor = authorize(actor)?;
        self.throttle(OP_PUBLISH, actor, self.budgets.publish)?;

        let entries = self.store.publish_drafts(&actor.email).await?;
        self.cache.invalidate(MENU_TAG);
        tracing::info!(count = entries.len(), user = %actor.email, "Menu drafts published");

        Ok(PublishReport {
            count: entries.len(),
        })
    }

    // -----------------------------------------------------------------------
    // Change log reader
    // -----------------------------------------------------------------------

    pub async fn list_change_log(
        &self,
        actor: Option<&Actor>,
        limit: Option<i64>,
    ) -> Result<Vec<ChangeLogEntry>, CoreError> {
        authorize(actor)?;
        Ok(self.store.list_change_log(clamp_limit(limit)).await?)
    }

    // -----------------------------------------------------------------------
    // Hero carousel
    // -----------------------------------------------------------------------

    pub async fn list_hero_slides(&self, actor: Option<&Actor>) -> Result<Vec<HeroSlide>, CoreError> {
        authorize(actor)?;
        Ok(self.store.list_hero_slides().await?)
    }

    pub async fn create_hero_slide(
        &self,
        actor: Option<&Actor>,
        input: HeroSlideInput,
    ) -> Result<HeroSlide, CoreError> {
        let actor = authorize(actor)?;
        let slide = input.into_new_slide()?;

        let created = self.store.create_hero_slide(&slide).await?;
        self.cache.invalidate(HERO_TAG);
        tracing::info!(id = created.id, position = created.position, user = %actor.email, "Hero slide created");
        Ok(created)
    }

    pub async fn delete_hero_slide(&self, actor: Option<&Actor>, id: DbId) -> Result<(), CoreError> {
        let actor = authorize(actor)?;
        if !self.store.delete_hero_slide(id).await? {
            return Err(CoreError::not_found("HeroSlide", id));
        }
        self.cache.invalidate(HERO_TAG);
        tracing::info!(id, user = %actor.email, "Hero slide deleted");
        Ok(())
    }

    /// Reassign positions `0..n` in the order given. `ordered` must name
    /// every existing slide exactly once.
    pub async fn reorder_hero_slides(
        &self,
        actor: Option<&Actor>,
        ordered: &[DbId],
    ) -> Result<Vec<HeroSlide>, CoreError> {
        let actor = authorize(actor)?;
        let current = self.store.list_hero_slides().await?;
        check_reorder(&current, ordered)?;

        let slides = self.store.reorder_hero_slides(ordered).await?;
        self.cache.invalidate(HERO_TAG);
        tracing::info!(count = slides.len(), user = %actor.email, "Hero slides reordered");
        Ok(slides)
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub async fn get_settings(&self, actor: Option<&Actor>) -> Result<Settings, CoreError> {
        authorize(actor)?;
        self.store
            .find_settings()
            .await?
            .ok_or_else(|| CoreError::not_found("Settings", SETTINGS_ID))
    }

    pub async fn save_settings(
        &self,
        actor: Option<&Actor>,
        settings: Settings,
    ) -> Result<Settings, CoreError> {
        let actor = authorize(actor)?;
        let settings = settings.validated()?;

        let saved = self.store.save_settings(&settings).await?;
        self.cache.invalidate(SETTINGS_TAG);
        tracing::info!(user = %actor.email, "Site settings saved");
        Ok(saved)
    }
}
