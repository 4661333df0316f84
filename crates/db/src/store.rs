//! [`ContentStore`] over PostgreSQL.

use async_trait::async_trait;
use tfe_core::change_log::ChangeLogEntry;
use tfe_core::error::{StoreError, StoreResult};
use tfe_core::hero::{HeroSlide, NewHeroSlide};
use tfe_core::menu::MenuItem;
use tfe_core::publish::plan_publish;
use tfe_core::settings::Settings;
use tfe_core::store::ContentStore;
use tfe_core::types::DbId;

use crate::models::menu_item::into_menu_items;
use crate::models::settings::encode_hours;
use crate::repositories::{ChangeLogRepo, HeroSlideRepo, MenuItemRepo, MenuTable, SettingsRepo};
use crate::DbPool;

/// Advisory lock key held for the duration of a publish transaction.
const PUBLISH_LOCK_KEY: i64 = 0x7466_655f_7075_62;

#[derive(Clone)]
pub struct PgContentStore {
    pool: DbPool,
}

impl PgContentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool)
            .await
            .map_err(StoreError::backend)
    }

    async fn list_drafts(&self) -> StoreResult<Vec<MenuItem>> {
        let rows = MenuItemRepo::list(&self.pool, MenuTable::Drafts, false)
            .await
            .map_err(StoreError::backend)?;
        into_menu_items(rows)
    }

    async fn find_draft(&self, id: &str) -> StoreResult<Option<MenuItem>> {
        MenuItemRepo::find_by_id(&self.pool, MenuTable::Drafts, id)
            .await
            .map_err(StoreError::backend)?
            .map(MenuItem::try_from)
            .transpose()
    }

    async fn find_drafts(&self, ids: &[String]) -> StoreResult<Vec<MenuItem>> {
        let rows = MenuItemRepo::find_by_ids(&self.pool, MenuTable::Drafts, ids)
            .await
            .map_err(StoreError::backend)?;
        into_menu_items(rows)
    }

    async fn upsert_drafts(&self, items: &[MenuItem]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;
        for item in items {
            MenuItemRepo::upsert(&mut *tx, MenuTable::Drafts, item)
                .await
                .map_err(StoreError::backend)?;
        }
        tx.commit().await.map_err(StoreError::backend)
    }

    async fn list_published(&self, active_only: bool) -> StoreResult<Vec<MenuItem>> {
        let rows = MenuItemRepo::list(&self.pool, MenuTable::Published, active_only)
            .await
            .map_err(StoreError::backend)?;
        into_menu_items(rows)
    }

    async fn find_published(&self, id: &str) -> StoreResult<Option<MenuItem>> {
        MenuItemRepo::find_by_id(&self.pool, MenuTable::Published, id)
            .await
            .map_err(StoreError::backend)?
            .map(MenuItem::try_from)
            .transpose()
    }

    async fn publish_drafts(&self, user_id: &str) -> StoreResult<Vec<ChangeLogEntry>> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(PUBLISH_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::backend)?;

        let drafts = into_menu_items(
            MenuItemRepo::list(&mut *tx, MenuTable::Drafts, false)
                .await
                .map_err(StoreError::backend)?,
        )?;
        let published = into_menu_items(
            MenuItemRepo::list(&mut *tx, MenuTable::Published, false)
                .await
                .map_err(StoreError::backend)?,
        )?;
        let plan = plan_publish(drafts, &published, user_id);

        for item in &plan.upserts {
            MenuItemRepo::upsert(&mut *tx, MenuTable::Published, item)
                .await
                .map_err(StoreError::backend)?;
        }

        let mut appended = Vec::with_capacity(plan.entries.len());
        for entry in &plan.entries {
            let row = ChangeLogRepo::insert(&mut *tx, entry)
                .await
                .map_err(StoreError::backend)?;
            appended.push(ChangeLogEntry::from(row));
        }

        tx.commit().await.map_err(StoreError::backend)?;
        tracing::debug!(count = appended.len(), "Publish transaction committed");
        Ok(appended)
    }

    async fn list_change_log(&self, limit: i64) -> StoreResult<Vec<ChangeLogEntry>> {
        let rows = ChangeLogRepo::list_recent(&self.pool, limit)
            .await
            .map_err(StoreError::backend)?;
        Ok(rows.into_iter().map(ChangeLogEntry::from).collect())
    }

    async fn list_hero_slides(&self) -> StoreResult<Vec<HeroSlide>> {
        let rows = HeroSlideRepo::list(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(rows.into_iter().map(HeroSlide::from).collect())
    }

    async fn create_hero_slide(&self, slide: &NewHeroSlide) -> StoreResult<HeroSlide> {
        HeroSlideRepo::create(&self.pool, slide)
            .await
            .map(HeroSlide::from)
            .map_err(StoreError::backend)
    }

    async fn delete_hero_slide(&self, id: DbId) -> StoreResult<bool> {
        HeroSlideRepo::delete(&self.pool, id)
            .await
            .map_err(StoreError::backend)
    }

    async fn reorder_hero_slides(&self, ordered: &[DbId]) -> StoreResult<Vec<HeroSlide>> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;
        for (position, id) in ordered.iter().enumerate() {
            let position = i32::try_from(position)
                .map_err(|_| StoreError::Corrupt(format!("position {position} out of range")))?;
            HeroSlideRepo::set_position(&mut *tx, *id, position)
                .await
                .map_err(StoreError::backend)?;
        }
        let rows = HeroSlideRepo::list(&mut *tx)
            .await
            .map_err(StoreError::backend)?;
        tx.commit().await.map_err(StoreError::backend)?;
        Ok(rows.into_iter().map(HeroSlide::from).collect())
    }

    async fn find_settings(&self) -> StoreResult<Option<Settings>> {
        SettingsRepo::find(&self.pool)
            .await
            .map_err(StoreError::backend)?
            .map(Settings::try_from)
            .transpose()
    }

    async fn save_settings(&self, settings: &Settings) -> StoreResult<Settings> {
        let hours = encode_hours(settings)?;
        let row = SettingsRepo::upsert(&self.pool, settings, &hours)
            .await
            .map_err(StoreError::backend)?;
        Settings::try_from(row)
    }
}
