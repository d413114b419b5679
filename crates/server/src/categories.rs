//! Category endpoints: the seeded globals plus the caller's private rows.

use api_types::{
    ApiResponse,
    category::{CategoryNew, CategoryView},
};
use axum::{Extension, extract::State};
use engine::{EntryKind, categories};

use crate::{ServerError, auth::AuthUser, extract::Json, server::ServerState};

fn kind_to_api(kind: EntryKind) -> api_types::EntryKind {
    match kind {
        EntryKind::Expense => api_types::EntryKind::Expense,
        EntryKind::Income => api_types::EntryKind::Income,
    }
}

fn view(row: categories::Model) -> CategoryView {
    let kind = kind_to_api(row.entry_kind());
    let global = row.is_global();
    CategoryView {
        id: row.id,
        name: row.name,
        icon: row.icon,
        color: row.color,
        kind,
        global,
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<CategoryView>>>, ServerError> {
    let rows = state.store.list_categories(user.id).await?;

    Ok(Json(ApiResponse::ok(
        "Categories fetched successfully",
        rows.into_iter().map(view).collect(),
    )))
}

/// Re-creating an existing (owner, name) pair is a silent success.
pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    let icon = payload.icon.as_deref().unwrap_or(categories::DEFAULT_ICON);
    let color = payload.color.as_deref().unwrap_or(categories::DEFAULT_COLOR);
    let kind = match payload.kind.unwrap_or_default() {
        api_types::EntryKind::Expense => EntryKind::Expense,
        api_types::EntryKind::Income => EntryKind::Income,
    };
    state
        .store
        .ensure_category(user.id, &payload.name, icon, color, kind)
        .await?;

    Ok(Json(ApiResponse::message("Category added successfully")))
}
