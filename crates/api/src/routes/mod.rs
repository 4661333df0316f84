pub mod admin;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /menu                                            published menu (public)
/// /hero                                            hero slides (public)
/// /settings                                        site settings (public)
///
/// /admin
///     /menu/drafts                                 list, upsert
///     /menu/drafts/{id}                            get
///     /menu/csv                                    export, import
///     /menu/publish                                publish drafts
///     /changes                                     change log
///     /hero                                        list, create
///     /hero/order                                  reorder
///     /hero/{id}                                   delete
///     /settings                                    get, save
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public read views.
        .merge(public::router())
        // Content admin panel.
        .nest("/admin", admin::router())
}
