//! HTTP tests for drafts, the CSV bridge, publishing and the change log.

mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use common::{
    admin_token, body_json, body_text, draft_json, get, get_as, post_csv, send, send_json,
    staff_token,
};

const DRAFTS: &str = "/api/v1/admin/menu/drafts";
const CSV: &str = "/api/v1/admin/menu/csv";
const PUBLISH: &str = "/api/v1/admin/menu/publish";
const CHANGES: &str = "/api/v1/admin/changes";

// ---------------------------------------------------------------------------
// Session handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_routes_require_a_session() {
    let app = common::build_test_app();
    let response = get(app, DRAFTS).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn non_admin_role_is_forbidden() {
    let app = common::build_test_app();
    let response = get_as(app, DRAFTS, &staff_token()).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = common::build_test_app();
    let mut token = admin_token();
    token.push('x');

    let response = get_as(app, DRAFTS, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let app = common::build_test_app();
    let request = axum::http::Request::builder()
        .uri(DRAFTS)
        .header("authorization", "Basic b3duZXI6cGFzcw==")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upserted_draft_reads_back_and_stays_unpublished() {
    let app = common::build_test_app();
    let token = admin_token();

    let response = send_json(
        app.clone(),
        Method::PUT,
        DRAFTS,
        &token,
        draft_json("a1", "Beef Empanada"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_as(app.clone(), &format!("{DRAFTS}/a1"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let draft = &body_json(response).await["data"];
    assert_eq!(draft["name"], "Beef Empanada");
    assert_eq!(draft["category"], "Savory Empanadas");
    assert_eq!(draft["prices"]["doordash"], 3.5);
    assert_eq!(draft["orderLinks"]["doordash"], "https://x/a");
    assert_eq!(draft["tags"], serde_json::json!(["Most-Loved"]));
    assert_eq!(draft["isActive"], true);

    let menu = body_json(get(app, "/api/v1/menu").await).await;
    assert_eq!(menu["data"], serde_json::json!([]));
}

#[tokio::test]
async fn invalid_draft_is_a_validation_error() {
    let app = common::build_test_app();
    let mut body = draft_json("a1", "Beef Empanada");
    body["category"] = "Pizza".into();

    let response = send_json(app.clone(), Method::PUT, DRAFTS, &admin_token(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let drafts = body_json(get_as(app, DRAFTS, &admin_token()).await).await;
    assert_eq!(drafts["data"], serde_json::json!([]));
}

#[tokio::test]
async fn draft_missing_a_field_is_a_json_validation_error() {
    let app = common::build_test_app();
    let mut body = draft_json("a1", "Beef Empanada");
    body.as_object_mut().unwrap().remove("category");

    let response = send_json(app, Method::PUT, DRAFTS, &admin_token(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[CONTENT_TYPE].to_str().unwrap(),
        "application/json"
    );
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("category"));
}

#[tokio::test]
async fn draft_without_content_type_is_a_bad_request() {
    let app = common::build_test_app();
    let response = send(app, Method::PUT, DRAFTS, Some(&admin_token()), None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn anonymous_write_is_unauthorized_before_the_body_is_read() {
    let app = common::build_test_app();
    let response = send(
        app,
        Method::PUT,
        DRAFTS,
        None,
        Some(("application/json", r#"{"id":1}"#.to_string())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn staff_write_is_forbidden_before_the_body_is_read() {
    let app = common::build_test_app();
    let response = send(
        app,
        Method::PUT,
        DRAFTS,
        Some(&staff_token()),
        Some(("application/json", "not json".to_string())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn draft_without_prices_is_accepted() {
    let app = common::build_test_app();
    let mut body = draft_json("c1", "Party Box");
    body["category"] = "Combos".into();
    body["prices"] = serde_json::json!({});

    let response = send_json(app, Method::PUT, DRAFTS, &admin_token(), body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let draft = &body_json(response).await["data"];
    assert_eq!(draft["id"], "c1");
    assert!(draft["prices"].get("doordash").map_or(true, |p| p.is_null()));
}

#[tokio::test]
async fn missing_draft_returns_404() {
    let app = common::build_test_app();
    let response = get_as(app, &format!("{DRAFTS}/nope"), &admin_token()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// CSV bridge
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_returns_csv_with_fixed_header() {
    let app = common::build_test_app();
    let token = admin_token();
    send_json(
        app.clone(),
        Method::PUT,
        DRAFTS,
        &token,
        draft_json("a1", "Beef Empanada"),
    )
    .await;

    let response = get_as(app, CSV, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let text = body_text(response).await;
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,name,description,category,prices.doordash,prices.grubhub,\
         orderLinks.doordash,orderLinks.grubhub,tags,image,isActive,lastChecked"
    );
    assert_eq!(
        lines.next().unwrap(),
        "a1,Beef Empanada,,Savory Empanadas,3.5,,https://x/a,,Most-Loved,,true,"
    );
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn import_defaults_to_dry_run() {
    let app = common::build_test_app();
    let token = admin_token();
    let csv = "id,name,category,prices.doordash\nn1,Chicken,Savory Empanadas,3.75";

    let response = post_csv(app.clone(), CSV, &token, csv).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["data"]["count"], 1);
    assert_eq!(report["data"]["diffs"][0]["id"], "n1");
    assert!(report["data"]["diffs"][0]["before"].is_null());
    assert_eq!(report["data"]["diffs"][0]["after"]["name"], "Chicken");

    let drafts = body_json(get_as(app, DRAFTS, &token).await).await;
    assert_eq!(drafts["data"], serde_json::json!([]));
}

#[tokio::test]
async fn import_accepts_spreadsheet_byte_order_mark() {
    let app = common::build_test_app();
    let csv = "\u{feff}id,name,category,prices.doordash\nn1,Chicken,Savory Empanadas,3.75";

    let response = post_csv(app, CSV, &admin_token(), csv).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["data"]["diffs"][0]["id"], "n1");
}

#[tokio::test]
async fn import_with_dry_run_false_writes_drafts() {
    let app = common::build_test_app();
    let token = admin_token();
    let csv = "id,name,category,prices.doordash\n\
               n1,Chicken,Savory Empanadas,3.75\n\
               n2,Guava & Cheese,Dessert Empanadas,3";

    let response = post_csv(app.clone(), &format!("{CSV}?dry_run=false"), &token, csv).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["count"], 2);

    let drafts = body_json(get_as(app, DRAFTS, &token).await).await;
    let names: Vec<&str> = drafts["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Chicken", "Guava & Cheese"]);
}

#[tokio::test]
async fn import_rejects_whole_file_on_invalid_row() {
    let app = common::build_test_app();
    let token = admin_token();
    let csv = "id,name,category,prices.doordash\n\
               n1,Chicken,Savory Empanadas,3.75\n\
               n2,Mystery,Pizza,3";

    let response = post_csv(app.clone(), &format!("{CSV}?dry_run=false"), &token, csv).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().starts_with("row 2:"));

    let drafts = body_json(get_as(app, DRAFTS, &token).await).await;
    assert_eq!(drafts["data"], serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Publisher and change log
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_promotes_drafts_and_logs_changes() {
    let app = common::build_test_app();
    let token = admin_token();
    send_json(
        app.clone(),
        Method::PUT,
        DRAFTS,
        &token,
        draft_json("a1", "Beef Empanada"),
    )
    .await;

    let response = send(app.clone(), Method::POST, PUBLISH, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["count"], 1);

    let menu = body_json(get(app.clone(), "/api/v1/menu").await).await;
    assert_eq!(menu["data"][0]["id"], "a1");

    let log = body_json(get_as(app, CHANGES, &token).await).await;
    let entry = &log["data"][0];
    assert_eq!(entry["entity"], "MenuItem");
    assert_eq!(entry["entityId"], "a1");
    assert_eq!(entry["action"], "publish");
    assert_eq!(entry["userId"], common::ADMIN_EMAIL);
    assert!(entry["before"].is_null());
    assert_eq!(entry["after"]["name"], "Beef Empanada");
}

#[tokio::test]
async fn republish_logs_identical_before_and_after() {
    let app = common::build_test_app();
    let token = admin_token();
    send_json(
        app.clone(),
        Method::PUT,
        DRAFTS,
        &token,
        draft_json("a1", "Beef Empanada"),
    )
    .await;
    send(app.clone(), Method::POST, PUBLISH, Some(&token), None).await;
    send(app.clone(), Method::POST, PUBLISH, Some(&token), None).await;

    let log = body_json(get_as(app, &format!("{CHANGES}?limit=1"), &token).await).await;
    let entries = log["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["before"], entries[0]["after"]);
}

#[tokio::test]
async fn third_publish_within_a_minute_is_rate_limited() {
    let app = common::build_test_app();
    let token = admin_token();

    for _ in 0..2 {
        let response = send(app.clone(), Method::POST, PUBLISH, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(app, Method::POST, PUBLISH, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(response).await["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn unauthenticated_publish_does_not_spend_budget() {
    let app = common::build_test_app();
    for _ in 0..3 {
        let response = send(app.clone(), Method::POST, PUBLISH, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = send(app, Method::POST, PUBLISH, Some(&admin_token()), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
