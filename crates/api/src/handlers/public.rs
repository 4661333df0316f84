//! Read-only views for the public site.
//!
//! Each view is served from [`ViewCache`] when a snapshot exists and rebuilt
//! from the store otherwise. Admin mutations drop the snapshot by tag.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tfe_core::cache::{ViewCache, HERO_TAG, MENU_TAG, SETTINGS_TAG};
use tfe_core::error::CoreError;
use tfe_core::settings::SETTINGS_ID;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn remember<T: Serialize>(views: &ViewCache, tag: &str, value: &T) -> AppResult<Value> {
    let snapshot =
        serde_json::to_value(value).map_err(|e| AppError::InternalError(e.to_string()))?;
    views.put(tag, snapshot.clone());
    Ok(snapshot)
}

/// GET /api/v1/menu
///
/// Published items with `isActive = true`, ordered by id.
pub async fn get_menu(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    if let Some(data) = state.views.get(MENU_TAG) {
        return Ok(Json(DataResponse { data }));
    }

    let items = state
        .store
        .list_published(true)
        .await
        .map_err(CoreError::from)?;
    let data = remember(&state.views, MENU_TAG, &items)?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/hero
pub async fn get_hero(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    if let Some(data) = state.views.get(HERO_TAG) {
        return Ok(Json(DataResponse { data }));
    }

    let slides = state
        .store
        .list_hero_slides()
        .await
        .map_err(CoreError::from)?;
    let data = remember(&state.views, HERO_TAG, &slides)?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/settings
///
/// 404 until the admin saves settings for the first time.
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    if let Some(data) = state.views.get(SETTINGS_TAG) {
        return Ok(Json(DataResponse { data }));
    }

    let settings = state
        .store
        .find_settings()
        .await
        .map_err(CoreError::from)?
        .ok_or_else(|| CoreError::not_found("Settings", SETTINGS_ID))?;
    let data = remember(&state.views, SETTINGS_TAG, &settings)?;
    Ok(Json(DataResponse { data }))
}
