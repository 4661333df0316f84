//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for the change-log reader. Clamped by
/// [`tfe_core::change_log::clamp_limit`].
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?dry_run=` for CSV import. Absent means a dry run.
#[derive(Debug, Deserialize)]
pub struct DryRunParams {
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
}

fn default_dry_run() -> bool {
    true
}
