use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use tally_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("not found")]
    RouteNotFound,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Ledger(LedgerError::NotFound(_)) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Ledger(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::InvalidBody(_) | Self::InvalidQuery(_) | Self::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Ledger(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to callers. Server faults never expose details.
    pub fn public_message(&self) -> String {
        match self {
            Self::Ledger(LedgerError::InvalidAmount(_)) => {
                "Invalid amount: must be a positive number".into()
            }
            Self::Ledger(LedgerError::InsufficientFunds { .. }) => "Insufficient funds".into(),
            Self::Ledger(LedgerError::InvalidArgument(msg)) => format!("Invalid argument: {msg}"),
            Self::Ledger(LedgerError::NotFound(_)) => "Transaction not found".into(),
            Self::InvalidBody(_) => "Invalid request body".into(),
            Self::InvalidQuery(_) => "Invalid query parameters".into(),
            Self::InvalidPath(_) => "Invalid transaction id".into(),
            Self::RouteNotFound => "Not found".into(),
            _ => "Internal server error".into(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        let mut body = json!({
            "success": false,
            "error": self.public_message(),
        });
        if let Self::Ledger(LedgerError::InsufficientFunds { requested, available }) = &self {
            body["requested"] = json!(requested);
            body["balance"] = json!(available);
        }

        (status, Json(body)).into_response()
    }
}
