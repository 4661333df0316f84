//! Content admin routes mounted at `/admin`.
//!
//! Every handler behind these routes requires an admin session.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{changes, hero, menu, settings};
use crate::state::AppState;

/// ```text
/// GET    /menu/drafts           -> list_drafts
/// PUT    /menu/drafts           -> upsert_draft
/// GET    /menu/drafts/{id}      -> get_draft
/// GET    /menu/csv              -> export_csv
/// POST   /menu/csv              -> import_csv (?dry_run=)
/// POST   /menu/publish          -> publish
/// GET    /changes               -> list_changes (?limit=)
/// GET    /hero                  -> list_slides
/// POST   /hero                  -> create_slide
/// PUT    /hero/order            -> reorder_slides
/// DELETE /hero/{id}             -> delete_slide
/// GET    /settings              -> get_settings
/// PUT    /settings              -> save_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/menu/drafts",
            get(menu::list_drafts).put(menu::upsert_draft),
        )
        .route("/menu/drafts/{id}", get(menu::get_draft))
        .route("/menu/csv", get(menu::export_csv).post(menu::import_csv))
        .route("/menu/publish", post(menu::publish))
        .route("/changes", get(changes::list_changes))
        .route("/hero", get(hero::list_slides).post(hero::create_slide))
        .route("/hero/order", put(hero::reorder_slides))
        .route("/hero/{id}", delete(hero::delete_slide))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::save_settings),
        )
}
