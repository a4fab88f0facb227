#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use formbridge_api::app::build_router;
use formbridge_api::auth::jwt::JwtConfig;
use formbridge_api::config::ServerConfig;
use formbridge_api::state::AppState;

pub const TEMPLATE: &str = "<!DOCTYPE html>\n<!-- {{TIMESTAMP}} -->\n<main>{{FORM_HTML}}</main>\n";

pub const VALID_SOURCE: &str = r#"<form accept-charset="UTF-8" action="https://ab123.infusionsoft.com/app/form/process/x" method="POST">
<input name="inf_form_xid" type="hidden" value="abc">
<input name="inf_form_name" type="hidden" value="Webinar">
<input id="inf_field_FirstName" name="inf_field_FirstName" type="text">
<input id="inf_field_LastName" name="inf_field_LastName" type="text">
<input id="inf_field_Email" name="inf_field_Email" type="text">
<input id="inf_field_Phone1" name="inf_field_Phone1" type="text">
<input id="inf_option_SMSconsent" name="inf_option_SMSconsent" type="checkbox" value="1">
<button type="submit">Register</button>
</form>"#;

/// Build a test `ServerConfig` rooted at `dir`: the template is written to
/// `dir/template.html` and artifacts land in `dir/generated`.
pub fn test_config(dir: &Path) -> ServerConfig {
    let template_path = dir.join("template.html");
    std::fs::write(&template_path, TEMPLATE).unwrap();

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        template_path,
        generated_dir: dir.join("generated"),
        legacy_data_dir: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_hours: 24,
        },
    }
}

/// Build the full application router from an explicit config.
pub fn build_app_with(pool: PgPool, config: ServerConfig) -> Router {
    build_router(AppState::new(pool, config))
}

/// Build the full application router with the default test config in `dir`.
pub fn build_test_app(pool: PgPool, dir: &Path) -> Router {
    build_app_with(pool, test_config(dir))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user through the API and return its bearer token.
pub async fn register(app: Router, email: &str) -> String {
    let body = serde_json::json!({
        "email": email,
        "password": "password-123",
        "name": "Test User",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Create a form through the API and return its JSON representation.
pub async fn create_form(app: Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, "/api/v1/forms", token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
