//! Per-category budget endpoints.

use api_types::{
    ApiResponse,
    budget::{BudgetUpsert, BudgetView},
};
use axum::{Extension, extract::State};
use engine::{MoneyCents, budgets};

use crate::{ServerError, auth::AuthUser, extract::Json, server::ServerState};

fn view(row: budgets::Model) -> BudgetView {
    let limit_amount = row.limit().to_string();
    BudgetView {
        category: row.category,
        limit_amount,
        updated_at: row.updated_at,
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<BudgetView>>>, ServerError> {
    let rows = state.store.list_budgets(user.id).await?;

    Ok(Json(ApiResponse::ok(
        "Budgets fetched successfully",
        rows.into_iter().map(view).collect(),
    )))
}

pub async fn upsert(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetUpsert>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    let limit: MoneyCents = payload.limit_amount.parse()?;
    state
        .store
        .upsert_budget(user.id, &payload.category, limit)
        .await?;

    Ok(Json(ApiResponse::message("Budget updated successfully")))
}
