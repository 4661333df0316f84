use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::Session;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/changes?limit=N
///
/// Newest change-log entries first. `limit` defaults to 50, capped at 500.
pub async fn list_changes(
    session: Session,
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let entries = state
        .admin
        .list_change_log(session.actor(), params.limit)
        .await?;
    Ok(Json(DataResponse { data: entries }))
}
