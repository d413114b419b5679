use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use chrono::Utc;
use engine::Store;

use std::sync::Arc;

use api_types::ApiResponse;

use crate::{auth, budgets, categories, expenses, users};

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<Store>,
    pub jwt_secret: Arc<str>,
}

impl ServerState {
    pub fn new(store: Store, jwt_secret: &str) -> Self {
        Self {
            store: Arc::new(store),
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn fallback() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Resource not found")),
    )
}

/// Builds the full application router.
///
/// Everything except health and the register/login pair sits behind the
/// bearer-token middleware.
pub fn app(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/api/users/profile", get(users::profile))
        .route(
            "/api/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/api/expenses/{id}",
            axum::routing::put(expenses::update).delete(expenses::remove),
        )
        .route(
            "/api/expenses/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/expenses/budgets",
            get(budgets::list).post(budgets::upsert),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/api/users/register", post(users::register))
        .route("/api/users/login", post(users::login))
        .merge(protected)
        .fallback(fallback)
        .with_state(state)
}

pub async fn run(state: ServerState) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(state, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
