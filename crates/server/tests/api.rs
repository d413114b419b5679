use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use serde_json::{Value, json};
use server::{ServerState, app};
use tower::ServiceExt;

async fn test_app() -> Router {
    let database = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    Migrator::up(&database, None).await.expect("migrations");
    let store = engine::Store::new(database);
    store.seed_default_categories().await.expect("seed");
    app(ServerState::new(store, "test-secret"))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn register_and_login(app: &Router, name: &str, email: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": email, "password": "hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().expect("token").to_string()
}

fn expense_payload(title: &str, amount: &str) -> Value {
    json!({
        "title": title,
        "amount": amount,
        "category": "Food",
        "date": "2024-02-10",
    })
}

#[tokio::test]
async fn health_reports_up() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
}

#[tokio::test]
async fn register_login_profile_round_trip() {
    let app = test_app().await;
    let token = register_and_login(&app, "Mario", "mario@example.com").await;

    let (status, body) = send(&app, "GET", "/api/users/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Mario");
    assert_eq!(body["data"]["email"], "mario@example.com");
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let app = test_app().await;
    register_and_login(&app, "Mario", "mario@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "name": "Impostor", "email": "mario@example.com", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let app = test_app().await;
    register_and_login(&app, "Mario", "mario@example.com").await;

    let wrong_password = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": "mario@example.com", "password": "nope" })),
    )
    .await;
    let unknown_email = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": "ghost@example.com", "password": "nope" })),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn missing_or_garbage_token_is_unauthorized() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/expenses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/api/expenses", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expense_crud_round_trip() {
    let app = test_app().await;
    let token = register_and_login(&app, "Mario", "mario@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(&token),
        Some(expense_payload("Lunch", "12.34")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Expense added successfully");
    let id = body["data"]["id"].as_i64().expect("id");

    let (status, body) = send(&app, "GET", "/api/expenses", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Lunch");
    assert_eq!(body["data"][0]["amount"], "12.34");
    assert_eq!(body["data"][0]["kind"], "expense");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/expenses/{id}"),
        Some(&token),
        Some(json!({
            "title": "Salary",
            "amount": "2500.00",
            "category": "Salary",
            "date": "2024-02-01",
            "kind": "income",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/expenses", Some(&token), None).await;
    assert_eq!(body["data"][0]["title"], "Salary");
    assert_eq!(body["data"][0]["kind"], "income");
    assert_eq!(body["data"][0]["amount"], "2500.00");

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/expenses/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Expense deleted successfully");

    let (_, body) = send(&app, "GET", "/api/expenses", Some(&token), None).await;
    assert_eq!(body["data"].as_array().expect("array").len(), 0);
}

#[tokio::test]
async fn records_are_isolated_between_users() {
    let app = test_app().await;
    let mario = register_and_login(&app, "Mario", "mario@example.com").await;
    let luigi = register_and_login(&app, "Luigi", "luigi@example.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(&mario),
        Some(expense_payload("Lunch", "12.34")),
    )
    .await;
    let id = body["data"]["id"].as_i64().expect("id");

    let (_, body) = send(&app, "GET", "/api/expenses", Some(&luigi), None).await;
    assert_eq!(body["data"].as_array().expect("array").len(), 0);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/expenses/{id}"),
        Some(&luigi),
        Some(expense_payload("Hijack", "0.01")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/expenses/{id}"),
        Some(&luigi),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/expenses", Some(&mario), None).await;
    assert_eq!(body["data"][0]["title"], "Lunch");
}

#[tokio::test]
async fn missing_required_field_gets_enveloped_400() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "email": "mario@example.com", "password": "hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());

    let token = register_and_login(&app, "Mario", "mario@example.com").await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(&token),
        Some(json!({ "title": "Lunch", "category": "Food", "date": "2024-02-10" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let app = test_app().await;
    let token = register_and_login(&app, "Mario", "mario@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(&token),
        Some(expense_payload("   ", "12.34")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn amount_with_three_decimals_is_rejected() {
    let app = test_app().await;
    let token = register_and_login(&app, "Mario", "mario@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(&token),
        Some(expense_payload("Lunch", "12.345")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn category_creation_is_idempotent() {
    let app = test_app().await;
    let token = register_and_login(&app, "Mario", "mario@example.com").await;

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/expenses/categories",
            Some(&token),
            Some(json!({ "name": "Books" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, "GET", "/api/expenses/categories", Some(&token), None).await;
    let rows = body["data"].as_array().expect("array");
    // 9 seeded globals plus the one private category
    assert_eq!(rows.len(), 10);
    let books: Vec<_> = rows.iter().filter(|row| row["name"] == "Books").collect();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["icon"], "tag");
    assert_eq!(books[0]["global"], false);
}

#[tokio::test]
async fn budget_upsert_keeps_one_row_with_latest_limit() {
    let app = test_app().await;
    let token = register_and_login(&app, "Mario", "mario@example.com").await;

    for limit in ["300.00", "450.00"] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/expenses/budgets",
            Some(&token),
            Some(json!({ "category": "Food", "limit_amount": limit })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, "GET", "/api/expenses/budgets", Some(&token), None).await;
    let rows = body["data"].as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["category"], "Food");
    assert_eq!(rows[0]["limit_amount"], "450.00");
}

#[tokio::test]
async fn unknown_route_gets_enveloped_404() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/definitely/not/here", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Resource not found");
}
