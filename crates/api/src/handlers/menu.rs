//! Admin handlers for menu drafts, the CSV bridge and publishing.
//!
//! Authorization and throttling happen inside [`ContentAdmin`]; handlers
//! only pass the [`Session`] through. JSON writes go through [`AdminJson`]
//! so the session is checked before the body is decoded.
//!
//! [`ContentAdmin`]: tfe_core::admin::ContentAdmin

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use tfe_core::menu::MenuItemInput;

use crate::error::AppResult;
use crate::middleware::auth::Session;
use crate::middleware::json::AdminJson;
use crate::query::DryRunParams;
use crate::response::DataResponse;
use crate::state::AppState;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_DISPOSITION: &str = "attachment; filename=\"menu-drafts.csv\"";

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/menu/drafts
pub async fn list_drafts(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let drafts = state.admin.list_drafts(session.actor()).await?;
    Ok(Json(DataResponse { data: drafts }))
}

/// GET /api/v1/admin/menu/drafts/{id}
pub async fn get_draft(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let draft = state.admin.get_draft(session.actor(), &id).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// PUT /api/v1/admin/menu/drafts
///
/// Insert or fully replace the draft named by `input.id`. The published
/// menu is untouched.
pub async fn upsert_draft(
    State(state): State<AppState>,
    AdminJson(session, input): AdminJson<MenuItemInput>,
) -> AppResult<impl IntoResponse> {
    let draft = state.admin.upsert_draft(session.actor(), input).await?;
    Ok(Json(DataResponse { data: draft }))
}

// ---------------------------------------------------------------------------
// CSV bridge
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/menu/csv
pub async fn export_csv(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let csv = state.admin.export_csv(session.actor()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
        ],
        csv,
    ))
}

/// POST /api/v1/admin/menu/csv?dry_run=bool
///
/// The request body is the raw CSV text. Without `dry_run=false` nothing is
/// written and only the diff is returned.
pub async fn import_csv(
    session: Session,
    State(state): State<AppState>,
    Query(params): Query<DryRunParams>,
    body: String,
) -> AppResult<impl IntoResponse> {
    let report = state
        .admin
        .import_csv(session.actor(), &body, params.dry_run)
        .await?;
    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/menu/publish
pub async fn publish(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let report = state.admin.publish_drafts(session.actor()).await?;
    Ok(Json(DataResponse { data: report }))
}
