//! Request handlers. Each one translates a request into a single ledger
//! operation and wraps the result in the `{"success": ...}` envelope.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use tally_ledger::{
    Amount, InMemoryLedger, LedgerReader, LedgerStats, LedgerWriter, PageRequest, TransactionKind,
};

use crate::endpoint::{HealthResponse, PageParams, RecordRequest};
use crate::error::{ServerError, ServerResult};

/// Ledger handle shared by every handler.
pub type SharedLedger = Arc<InMemoryLedger>;

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// GET /balance
pub async fn balance_handler(State(ledger): State<SharedLedger>) -> ServerResult<Json<Value>> {
    let balance = ledger.balance()?;
    tracing::debug!(balance = balance.balance, "balance read");
    Ok(Json(json!({
        "success": true,
        "balance": balance.balance,
        "currency": balance.currency,
    })))
}

/// GET /transactions?limit&offset
pub async fn list_transactions_handler(
    State(ledger): State<SharedLedger>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ServerResult<Json<Value>> {
    let Query(params) = params.map_err(|e| ServerError::InvalidQuery(e.body_text()))?;
    let request = PageRequest::from(params);
    tracing::debug!(limit = request.limit, offset = request.offset, "listing transactions");

    let page = ledger.list_transactions(request)?;
    Ok(Json(json!({
        "success": true,
        "transactions": page.transactions,
        "total": page.total,
        "limit": page.limit,
        "offset": page.offset,
    })))
}

/// GET /transactions/:id
pub async fn get_transaction_handler(
    State(ledger): State<SharedLedger>,
    path: Result<Path<String>, PathRejection>,
) -> ServerResult<Json<Value>> {
    let Path(id) = path.map_err(|e| ServerError::InvalidPath(e.body_text()))?;
    tracing::debug!(%id, "fetching transaction");
    let transaction = ledger.get_transaction(&id)?;
    Ok(Json(json!({
        "success": true,
        "transaction": transaction,
    })))
}

/// POST /deposit
pub async fn deposit_handler(
    State(ledger): State<SharedLedger>,
    body: Result<Json<RecordRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Value>)> {
    record(&ledger, TransactionKind::Deposit, body)
}

/// POST /withdraw
pub async fn withdraw_handler(
    State(ledger): State<SharedLedger>,
    body: Result<Json<RecordRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Value>)> {
    record(&ledger, TransactionKind::Withdrawal, body)
}

/// GET /stats
pub async fn stats_handler(State(ledger): State<SharedLedger>) -> ServerResult<Json<Value>> {
    let stats = LedgerStats::compute(ledger.as_ref())?;
    Ok(Json(json!({
        "success": true,
        "stats": stats,
    })))
}

/// Fallback for unknown routes and unsupported methods.
pub async fn not_found_handler() -> ServerError {
    ServerError::RouteNotFound
}

fn record(
    ledger: &InMemoryLedger,
    kind: TransactionKind,
    body: Result<Json<RecordRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Value>)> {
    let Json(request) = body.map_err(|e| ServerError::InvalidBody(e.body_text()))?;
    tracing::debug!(%kind, amount = ?request.amount, "recording transaction");

    let amount = Amount::from_json(request.amount.as_ref())?;
    let description = request.description.as_deref();
    let receipt = match kind {
        TransactionKind::Deposit => ledger.record_deposit(amount, description)?,
        TransactionKind::Withdrawal => ledger.record_withdrawal(amount, description)?,
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "transaction": receipt.transaction,
            "newBalance": receipt.new_balance,
        })),
    ))
}
