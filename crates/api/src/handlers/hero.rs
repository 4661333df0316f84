//! Admin handlers for the home-page hero carousel.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tfe_core::hero::HeroSlideInput;
use tfe_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::Session;
use crate::middleware::json::AdminJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `PUT /admin/hero/order`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<DbId>,
}

/// GET /api/v1/admin/hero
pub async fn list_slides(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let slides = state.admin.list_hero_slides(session.actor()).await?;
    Ok(Json(DataResponse { data: slides }))
}

/// POST /api/v1/admin/hero
///
/// Appends the slide after the current last position.
pub async fn create_slide(
    State(state): State<AppState>,
    AdminJson(session, input): AdminJson<HeroSlideInput>,
) -> AppResult<impl IntoResponse> {
    let slide = state.admin.create_hero_slide(session.actor(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
}

/// DELETE /api/v1/admin/hero/{id}
pub async fn delete_slide(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.admin.delete_hero_slide(session.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/hero/order
///
/// `ids` must list every slide exactly once.
pub async fn reorder_slides(
    State(state): State<AppState>,
    AdminJson(session, input): AdminJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let slides = state
        .admin
        .reorder_hero_slides(session.actor(), &input.ids)
        .await?;
    Ok(Json(DataResponse { data: slides }))
}
