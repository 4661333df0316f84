//! HTTP tests for the cached public read views.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{admin_token, body_json, draft_json, get, send, send_json};
use tfe_api::state::AppState;
use tfe_core::menu::MenuItemInput;
use tfe_core::store::{ContentStore, MemoryContentStore};

#[tokio::test]
async fn menu_is_empty_before_first_publish() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/menu").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], serde_json::json!([]));
}

#[tokio::test]
async fn menu_hides_inactive_items() {
    let app = common::build_test_app();
    let token = admin_token();
    let mut hidden = draft_json("b1", "Seasonal Pumpkin");
    hidden["isActive"] = false.into();

    for body in [draft_json("a1", "Beef Empanada"), hidden] {
        send_json(app.clone(), Method::PUT, "/api/v1/admin/menu/drafts", &token, body).await;
    }
    send(
        app.clone(),
        Method::POST,
        "/api/v1/admin/menu/publish",
        Some(&token),
        None,
    )
    .await;

    let menu = body_json(get(app, "/api/v1/menu").await).await;
    let items = menu["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "a1");
}

#[tokio::test]
async fn menu_view_is_cached_until_publish_invalidates_it() {
    let store = Arc::new(MemoryContentStore::new());
    let state = AppState::new(store.clone(), common::test_config());
    let app = common::build_test_app_with_state(state);

    // Prime the cache with the empty menu.
    get(app.clone(), "/api/v1/menu").await;

    // A write that bypasses the admin service never invalidates.
    let item = MenuItemInput {
        id: "a1".into(),
        name: "Beef Empanada".into(),
        category: "Savory Empanadas".into(),
        prices: tfe_core::menu::PricesInput {
            doordash: Some(3.5),
            grubhub: None,
        },
        ..MenuItemInput::default()
    }
    .into_menu_item()
    .unwrap();
    store.upsert_drafts(&[item]).await.unwrap();
    store.publish_drafts("script").await.unwrap();

    let stale = body_json(get(app.clone(), "/api/v1/menu").await).await;
    assert_eq!(stale["data"], serde_json::json!([]));

    // Publishing through the API drops the snapshot.
    send(
        app.clone(),
        Method::POST,
        "/api/v1/admin/menu/publish",
        Some(&admin_token()),
        None,
    )
    .await;
    let fresh = body_json(get(app, "/api/v1/menu").await).await;
    assert_eq!(fresh["data"][0]["id"], "a1");
}

#[tokio::test]
async fn settings_view_is_404_until_saved() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/settings").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}
