//! Record CRUD endpoints.
//!
//! Amounts cross the wire as two-decimal strings and are parsed into integer
//! cents before they reach the store; the same drafting path serves create
//! and update so validation cannot diverge between the two.

use api_types::{
    ApiResponse,
    expense::{ExpenseCreated, ExpenseNew, ExpenseUpdate, ExpenseView},
};
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use engine::{EntryKind, ExpenseDraft, MoneyCents, expenses};

use crate::{ServerError, auth::AuthUser, extract::Json, server::ServerState};

fn kind_to_engine(kind: Option<api_types::EntryKind>) -> EntryKind {
    match kind.unwrap_or_default() {
        api_types::EntryKind::Expense => EntryKind::Expense,
        api_types::EntryKind::Income => EntryKind::Income,
    }
}

fn kind_to_api(kind: EntryKind) -> api_types::EntryKind {
    match kind {
        EntryKind::Expense => api_types::EntryKind::Expense,
        EntryKind::Income => api_types::EntryKind::Income,
    }
}

fn view(record: expenses::Model) -> ExpenseView {
    let amount = record.amount().to_string();
    let kind = kind_to_api(record.entry_kind());
    ExpenseView {
        id: record.id,
        title: record.title,
        amount,
        category: record.category,
        kind,
        date: record.date,
        description: record.description,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn draft(
    title: &str,
    amount: &str,
    category: &str,
    kind: Option<api_types::EntryKind>,
    date: NaiveDate,
    description: Option<&str>,
) -> Result<ExpenseDraft, ServerError> {
    let amount: MoneyCents = amount.parse()?;
    Ok(ExpenseDraft::new(
        title,
        amount,
        category,
        kind_to_engine(kind),
        date,
        description,
    )?)
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<ExpenseView>>>, ServerError> {
    let records = state.store.list_expenses(user.id).await?;

    Ok(Json(ApiResponse::ok(
        "Expenses fetched successfully",
        records.into_iter().map(view).collect(),
    )))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseCreated>>), ServerError> {
    let draft = draft(
        &payload.title,
        &payload.amount,
        &payload.category,
        payload.kind,
        payload.date,
        payload.description.as_deref(),
    )?;
    let message = match draft.kind {
        EntryKind::Income => "Income added successfully",
        EntryKind::Expense => "Expense added successfully",
    };
    let id = state.store.create_expense(user.id, draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(message, ExpenseCreated { id })),
    ))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    let draft = draft(
        &payload.title,
        &payload.amount,
        &payload.category,
        payload.kind,
        payload.date,
        payload.description.as_deref(),
    )?;
    state.store.update_expense(user.id, id, draft).await?;

    Ok(Json(ApiResponse::message("Updated successfully")))
}

pub async fn remove(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    state.store.delete_expense(user.id, id).await?;

    Ok(Json(ApiResponse::message("Expense deleted successfully")))
}
