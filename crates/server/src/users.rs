//! Registration, login and profile endpoints.

use api_types::{
    ApiResponse,
    user::{Login, LoginData, Profile, Register, Registered},
};
use axum::{Extension, extract::State, http::StatusCode};
use engine::EngineError;

use crate::{
    ServerError,
    auth::{self, AuthUser},
    extract::Json,
    server::ServerState,
};

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Register>,
) -> Result<(StatusCode, Json<ApiResponse<Registered>>), ServerError> {
    let name = payload.name.trim();
    let email = payload.email.trim();
    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(EngineError::Validation("missing required fields".to_string()).into());
    }

    let password_hash = auth::hash_password(&payload.password)?;
    let user_id = state
        .store
        .register_user(name, email, &password_hash)
        .await?;
    tracing::info!("registered user {user_id}");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "User registered successfully",
            Registered { user_id },
        )),
    ))
}

/// Unknown email and wrong password produce byte-identical responses.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<Json<ApiResponse<LoginData>>, ServerError> {
    let user = state
        .store
        .user_by_email(payload.email.trim())
        .await?
        .filter(|user| auth::verify_password(&payload.password, &user.password_hash))
        .ok_or_else(|| ServerError::Auth("invalid credentials".to_string()))?;

    let token = auth::sign_token(&state.jwt_secret, &user)?;

    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginData {
            token,
            user_id: user.id,
            name: user.name,
            email: user.email,
        },
    )))
}

pub async fn profile(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Profile>>, ServerError> {
    let user = state.store.user_by_id(user.id).await?;

    Ok(Json(ApiResponse::ok(
        "Profile fetched successfully",
        Profile {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        },
    )))
}
