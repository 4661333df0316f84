use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Public read views mounted at the API root.
///
/// ```text
/// GET    /menu              -> get_menu
/// GET    /hero              -> get_hero
/// GET    /settings          -> get_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(public::get_menu))
        .route("/hero", get(public::get_hero))
        .route("/settings", get(public::get_settings))
}
