//! Row model for the `site_settings` singleton.
//!
//! `hours` is stored as JSONB and decoded through the same serde shape the
//! API accepts; anything that does not decode is reported as corrupt.

use sqlx::FromRow;
use tfe_core::error::StoreError;
use tfe_core::settings::{CtaToggles, PlatformUrls, Settings};
use tfe_core::types::Timestamp;

#[derive(Debug, Clone, FromRow)]
pub struct SettingsRow {
    pub id: i32,
    pub address: String,
    pub phone: String,
    pub hours: serde_json::Value,
    pub doordash_base_url: String,
    pub grubhub_base_url: String,
    pub doordash_cta: bool,
    pub grubhub_cta: bool,
    pub updated_at: Timestamp,
}

impl TryFrom<SettingsRow> for Settings {
    type Error = StoreError;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        let hours = serde_json::from_value(row.hours)
            .map_err(|e| StoreError::Corrupt(format!("site_settings.hours: {e}")))?;
        Ok(Settings {
            address: row.address,
            phone: row.phone,
            hours,
            platform_base_urls: PlatformUrls {
                doordash: row.doordash_base_url,
                grubhub: row.grubhub_base_url,
            },
            cta_toggles: CtaToggles {
                doordash: row.doordash_cta,
                grubhub: row.grubhub_cta,
            },
        })
    }
}

/// Encode `hours` for the JSONB column.
pub fn encode_hours(settings: &Settings) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(&settings.hours)
        .map_err(|e| StoreError::Corrupt(format!("site_settings.hours: {e}")))
}
