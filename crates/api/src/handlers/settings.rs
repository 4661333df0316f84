use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use tfe_core::settings::Settings;

use crate::error::AppResult;
use crate::middleware::auth::Session;
use crate::middleware::json::AdminJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/settings
pub async fn get_settings(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = state.admin.get_settings(session.actor()).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/settings
///
/// Replaces the singleton settings record.
pub async fn save_settings(
    State(state): State<AppState>,
    AdminJson(session, input): AdminJson<Settings>,
) -> AppResult<impl IntoResponse> {
    let saved = state.admin.save_settings(session.actor(), input).await?;
    Ok(Json(DataResponse { data: saved }))
}
