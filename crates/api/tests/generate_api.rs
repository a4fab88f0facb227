//! HTTP-level integration tests for validation, generation and artifact download.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, body_text, create_form, get, get_auth, post_auth, post_json_auth, put_json_auth,
    register, VALID_SOURCE,
};
use formbridge_api::app::build_router;
use formbridge_api::state::AppState;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

async fn set_secret_token(app: axum::Router, token: &str) {
    let response = put_json_auth(
        app,
        "/api/v1/auth/secret-token",
        token,
        json!({ "secret_token": "tok_0123456789" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

fn webinar_form(source_html: &str) -> serde_json::Value {
    json!({
        "name": "Spring Webinar!",
        "source_html": source_html,
        "widget_url": "https://app.example.com/widgets/0042/3/elements",
        "session_id": "sess-abc",
    })
}

// ---------------------------------------------------------------------------
// Validation endpoint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn validate_reports_fields_found(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());
    let token = register(app.clone(), "v@example.com").await;

    let body = json!({ "source_html": VALID_SOURCE });
    let response = post_json_auth(app, "/api/v1/generate/validate", &token, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_valid"], true);
    assert_eq!(json["data"]["errors"], json!([]));
    assert_eq!(json["data"]["warnings"], json!([]));
    assert_eq!(
        json["data"]["fields_found"],
        json!({ "email": true, "first_name": true, "last_name": true, "phone": true, "consent": true })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validate_without_form_omits_field_map(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());
    let token = register(app.clone(), "v@example.com").await;

    let body = json!({ "source_html": "<div>no form here</div>" });
    let response = post_json_auth(app, "/api/v1/generate/validate", &token, body).await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["is_valid"], false);
    assert_eq!(json["data"]["errors"], json!(["No form element found in HTML"]));
    assert!(json["data"].get("fields_found").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validate_rejects_empty_source(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());
    let token = register(app.clone(), "v@example.com").await;

    let response =
        post_json_auth(app.clone(), "/api/v1/generate/validate", &token, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "source_html": "   " });
    let response = post_json_auth(app, "/api/v1/generate/validate", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_writes_artifact_and_marks_form(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());
    let token = register(app.clone(), "gen@example.com").await;
    set_secret_token(app.clone(), &token).await;
    let form = create_form(app.clone(), &token, webinar_form(VALID_SOURCE)).await;
    let id = form["id"].as_str().unwrap();

    let response = post_auth(app.clone(), &format!("/api/v1/generate/form/{id}"), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let expected_name = format!("spring-webinar--{}.html", &id[..8]);
    assert_eq!(json["data"]["filename"], expected_name.as_str());
    assert_eq!(json["data"]["message"], "Form generated successfully");
    assert_eq!(
        json["data"]["download_url"],
        format!("/api/v1/generated/{expected_name}")
    );

    let html = json["data"]["html"].as_str().unwrap();
    assert!(html.contains(r#"data-wf-session-id="sess-abc""#));
    assert!(html.contains(r#"data-wf-widget-id="0042""#));
    assert!(html.contains(r#"data-wf-widget-version="3""#));
    assert!(html.contains(r#"data-wf-widget-name="Embed""#));
    assert!(html.contains(r#"data-wf-bearer-token="tok_0123456789""#));
    assert!(html.contains(r#"data-consent-id="inf_option_SMSconsent""#));
    assert!(!html.contains("{{FORM_HTML}}"));
    assert!(!html.contains("{{TIMESTAMP}}"));

    let on_disk = std::fs::read_to_string(tmp.path().join("generated").join(&expected_name))
        .expect("artifact should exist");
    assert_eq!(on_disk, html);

    let response = get_auth(app, &format!("/api/v1/forms/{id}"), &token).await;
    let stored = body_json(response).await;
    assert_eq!(stored["data"]["status_id"], 2);
    assert_eq!(stored["data"]["generated_filename"], expected_name.as_str());
    assert!(stored["data"]["generated_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_without_secret_token_is_rejected(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());
    let token = register(app.clone(), "notoken@example.com").await;
    let form = create_form(app.clone(), &token, webinar_form(VALID_SOURCE)).await;
    let id = form["id"].as_str().unwrap();

    let response = post_auth(app.clone(), &format!("/api/v1/generate/form/{id}"), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = get_auth(app, &format!("/api/v1/forms/{id}"), &token).await;
    assert_eq!(body_json(response).await["data"]["status_id"], 1);
    assert!(!tmp.path().join("generated").exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_invalid_form_returns_details(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());
    let token = register(app.clone(), "invalid@example.com").await;
    set_secret_token(app.clone(), &token).await;
    let source = r#"<form action="https://example.com/post"><input name="inf_field_Email"></form>"#;
    let form = create_form(app.clone(), &token, webinar_form(source)).await;
    let id = form["id"].as_str().unwrap();

    let response = post_auth(app, &format!("/api/v1/generate/form/{id}"), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORM_INVALID");
    assert_eq!(
        json["details"],
        json!([
            "Invalid or missing Infusionsoft action URL",
            "Missing required field: Form XID",
            "Missing required field: Form name",
        ])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_unknown_form_is_404(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());
    let token = register(app.clone(), "missing@example.com").await;

    let uri = format!("/api/v1/generate/form/{}", Uuid::new_v4());
    let response = post_auth(app, &uri, &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_with_missing_template_fails_without_marking(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = common::test_config(tmp.path());
    config.template_path = tmp.path().join("does-not-exist.html");
    let app = common::build_app_with(pool, config);
    let token = register(app.clone(), "notemplate@example.com").await;
    set_secret_token(app.clone(), &token).await;
    let form = create_form(app.clone(), &token, webinar_form(VALID_SOURCE)).await;
    let id = form["id"].as_str().unwrap();

    let response = post_auth(app.clone(), &format!("/api/v1/generate/form/{id}"), &token).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "An internal error occurred");
    let response = get_auth(app, &format!("/api/v1/forms/{id}"), &token).await;
    assert_eq!(body_json(response).await["data"]["status_id"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn form_gone_before_marking_is_404(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), tmp.path());
    let token = register(app.clone(), "vanish@example.com").await;
    set_secret_token(app.clone(), &token).await;
    let form = create_form(app.clone(), &token, webinar_form(VALID_SOURCE)).await;
    let id = form["id"].as_str().unwrap();

    // Every UPDATE on forms now touches no row, as if it was deleted mid-flight.
    sqlx::query("CREATE RULE forms_update_noop AS ON UPDATE TO forms DO INSTEAD NOTHING")
        .execute(&pool)
        .await
        .unwrap();

    let response = post_auth(app, &format!("/api/v1/generate/form/{id}"), &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generation_in_flight_conflicts(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let state = AppState::new(pool, common::test_config(tmp.path()));
    let app = build_router(state.clone());
    let token = register(app.clone(), "busy@example.com").await;
    set_secret_token(app.clone(), &token).await;
    let form = create_form(app.clone(), &token, webinar_form(VALID_SOURCE)).await;
    let id: Uuid = form["id"].as_str().unwrap().parse().unwrap();

    let guard = state.generation_locks.try_acquire(id).unwrap();
    let response = post_auth(app.clone(), &format!("/api/v1/generate/form/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    drop(guard);
    let response = post_auth(app, &format!("/api/v1/generate/form/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Artifact download
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn generated_page_is_served_publicly(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());
    let token = register(app.clone(), "dl@example.com").await;
    set_secret_token(app.clone(), &token).await;
    let form = create_form(app.clone(), &token, webinar_form(VALID_SOURCE)).await;
    let id = form["id"].as_str().unwrap();
    let response = post_auth(app.clone(), &format!("/api/v1/generate/form/{id}"), &token).await;
    let json = body_json(response).await;
    let url = json["data"]["download_url"].as_str().unwrap().to_string();

    let response = get(app, &url).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(body_text(response).await, json["data"]["html"].as_str().unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn download_rejects_missing_and_malformed_names(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());

    let response = get(app.clone(), "/api/v1/generated/nothing-12345678.html").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app.clone(), "/api/v1/generated/Upper.html").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/v1/generated/notes.txt").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
