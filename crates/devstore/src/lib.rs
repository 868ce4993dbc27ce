//! Local stand-in for the remote document store.
//!
//! The production deployment talks to a hosted document store; development
//! and integration tests run this axum server instead. It exposes the same
//! narrow CRUD wire over an in-memory collection and makes no durability
//! promises.

use api_types::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use ledger::StoreError;

pub use server::{ServerState, run, run_with_listener, spawn_with_listener};

mod server;
mod transactions;

pub enum DevStoreError {
    Store(StoreError),
    Invalid(String),
}

fn status_for_store_error(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for DevStoreError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            DevStoreError::Store(err) => (status_for_store_error(&err), err.to_string()),
            DevStoreError::Invalid(err) => (StatusCode::UNPROCESSABLE_ENTITY, err),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<StoreError> for DevStoreError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
