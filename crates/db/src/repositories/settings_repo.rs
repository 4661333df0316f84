//! Repository for the `site_settings` singleton.

use sqlx::PgExecutor;
use tfe_core::settings::{Settings, SETTINGS_ID};

use crate::models::settings::SettingsRow;

const COLUMNS: &str = "\
    id, address, phone, hours, doordash_base_url, grubhub_base_url, \
    doordash_cta, grubhub_cta, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    pub async fn find<'e, E: PgExecutor<'e>>(executor: E) -> Result<Option<SettingsRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings WHERE id = $1");
        sqlx::query_as::<_, SettingsRow>(&query)
            .bind(SETTINGS_ID)
            .fetch_optional(executor)
            .await
    }

    /// Insert or replace the singleton row.
    pub async fn upsert<'e, E: PgExecutor<'e>>(
        executor: E,
        settings: &Settings,
        hours: &serde_json::Value,
    ) -> Result<SettingsRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_settings \
                 (id, address, phone, hours, doordash_base_url, grubhub_base_url, \
                  doordash_cta, grubhub_cta) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
                 address = EXCLUDED.address, \
                 phone = EXCLUDED.phone, \
                 hours = EXCLUDED.hours, \
                 doordash_base_url = EXCLUDED.doordash_base_url, \
                 grubhub_base_url = EXCLUDED.grubhub_base_url, \
                 doordash_cta = EXCLUDED.doordash_cta, \
                 grubhub_cta = EXCLUDED.grubhub_cta, \
                 updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SettingsRow>(&query)
            .bind(SETTINGS_ID)
            .bind(&settings.address)
            .bind(&settings.phone)
            .bind(hours)
            .bind(&settings.platform_base_urls.doordash)
            .bind(&settings.platform_base_urls.grubhub)
            .bind(settings.cta_toggles.doordash)
            .bind(settings.cta_toggles.grubhub)
            .fetch_one(executor)
            .await
    }
}
