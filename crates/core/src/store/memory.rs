use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::ContentStore;
use crate::change_log::ChangeLogEntry;
use crate::error::StoreResult;
use crate::hero::{HeroSlide, NewHeroSlide};
use crate::menu::MenuItem;
use crate::publish::plan_publish;
use crate::settings::Settings;
use crate::types::DbId;

#[derive(Debug, Default)]
struct Tables {
    drafts: BTreeMap<String, MenuItem>,
    published: BTreeMap<String, MenuItem>,
    change_log: Vec<ChangeLogEntry>,
    hero_slides: Vec<HeroSlide>,
    settings: Option<Settings>,
    next_change_id: DbId,
    next_slide_id: DbId,
}

/// [`ContentStore`] backed by process memory.
///
/// One mutex guards all tables, so every call observes and leaves a
/// consistent state. Used by tests and local demos.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    tables: Mutex<Tables>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_slides(slides: &[HeroSlide]) -> Vec<HeroSlide> {
    let mut out = slides.to_vec();
    out.sort_by_key(|s| (s.position, s.id));
    out
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_drafts(&self) -> StoreResult<Vec<MenuItem>> {
        Ok(self.tables.lock().await.drafts.values().cloned().collect())
    }

    async fn find_draft(&self, id: &str) -> StoreResult<Option<MenuItem>> {
        Ok(self.tables.lock().await.drafts.get(id).cloned())
    }

    async fn find_drafts(&self, ids: &[String]) -> StoreResult<Vec<MenuItem>> {
        let tables = self.tables.lock().await;
        let mut found: HashMap<&str, MenuItem> = HashMap::new();
        for id in ids {
            if let Some(item) = tables.drafts.get(id) {
                found.insert(id.as_str(), item.clone());
            }
        }
        Ok(found.into_values().collect())
    }

    async fn upsert_drafts(&self, items: &[MenuItem]) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        for item in items {
            tables.drafts.insert(item.id.clone(), item.clone());
        }
        Ok(())
    }

    async fn list_published(&self, active_only: bool) -> StoreResult<Vec<MenuItem>> {
        Ok(self
            .tables
            .lock()
            .await
            .published
            .values()
            .filter(|item| !active_only || item.is_active)
            .cloned()
            .collect())
    }

    async fn find_published(&self, id: &str) -> StoreResult<Option<MenuItem>> {
        Ok(self.tables.lock().await.published.get(id).cloned())
    }

    async fn publish_drafts(&self, user_id: &str) -> StoreResult<Vec<ChangeLogEntry>> {
        let mut tables = self.tables.lock().await;
        let drafts: Vec<MenuItem> = tables.drafts.values().cloned().collect();
        let published: Vec<MenuItem> = tables.published.values().cloned().collect();
        let plan = plan_publish(drafts, &published, user_id);

        for item in plan.upserts {
            tables.published.insert(item.id.clone(), item);
        }

        let created_at = Utc::now();
        let mut appended = Vec::with_capacity(plan.entries.len());
        for entry in plan.entries {
            tables.next_change_id += 1;
            let row = ChangeLogEntry {
                id: tables.next_change_id,
                entity: entry.entity,
                entity_id: entry.entity_id,
                action: entry.action,
                before: entry.before,
                after: entry.after,
                user_id: entry.user_id,
                created_at,
            };
            tables.change_log.push(row.clone());
            appended.push(row);
        }
        Ok(appended)
    }

    async fn list_change_log(&self, limit: i64) -> StoreResult<Vec<ChangeLogEntry>> {
        let tables = self.tables.lock().await;
        let mut entries = tables.change_log.clone();
        entries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        entries.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(entries)
    }

    async fn list_hero_slides(&self) -> StoreResult<Vec<HeroSlide>> {
        Ok(sorted_slides(&self.tables.lock().await.hero_slides))
    }

    async fn create_hero_slide(&self, slide: &NewHeroSlide) -> StoreResult<HeroSlide> {
        let mut tables = self.tables.lock().await;
        let position = tables
            .hero_slides
            .iter()
            .map(|s| s.position)
            .max()
            .map_or(0, |p| p + 1);
        tables.next_slide_id += 1;
        let created = HeroSlide {
            id: tables.next_slide_id,
            src: slide.src.clone(),
            alt: slide.alt.clone(),
            attribution: slide.attribution.clone(),
            position,
        };
        tables.hero_slides.push(created.clone());
        Ok(created)
    }

    async fn delete_hero_slide(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.hero_slides.len();
        tables.hero_slides.retain(|s| s.id != id);
        Ok(tables.hero_slides.len() != before)
    }

    async fn reorder_hero_slides(&self, ordered: &[DbId]) -> StoreResult<Vec<HeroSlide>> {
        let mut tables = self.tables.lock().await;
        for slide in tables.hero_slides.iter_mut() {
            if let Some(idx) = ordered.iter().position(|id| *id == slide.id) {
                slide.position = i32::try_from(idx).unwrap_or(i32::MAX);
            }
        }
        Ok(sorted_slides(&tables.hero_slides))
    }

    async fn find_settings(&self) -> StoreResult<Option<Settings>> {
        Ok(self.tables.lock().await.settings.clone())
    }

    async fn save_settings(&self, settings: &Settings) -> StoreResult<Settings> {
        self.tables.lock().await.settings = Some(settings.clone());
        Ok(settings.clone())
    }
}
