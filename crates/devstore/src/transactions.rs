//! Transaction collection endpoints.

use api_types::transaction::{TransactionDoc, TransactionListQuery, TransactionListResponse};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use ledger::{Transaction, TransactionStore};

use crate::{DevStoreError, server::ServerState};

fn decode(doc: TransactionDoc) -> Result<Transaction, DevStoreError> {
    Transaction::try_from(doc).map_err(|err| DevStoreError::Invalid(err.to_string()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionDoc>,
) -> Result<(StatusCode, Json<TransactionDoc>), DevStoreError> {
    let mut tx = decode(payload)?;
    // The store assigns ids; any client-sent id is ignored.
    tx.id = String::new();

    let created = state.store.create(&tx).await?;
    Ok((StatusCode::CREATED, Json(TransactionDoc::from(&created))))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<TransactionListResponse>, DevStoreError> {
    let transactions = state
        .store
        .list_by_owner(&query.owner_id)
        .await?
        .iter()
        .map(TransactionDoc::from)
        .collect();

    Ok(Json(TransactionListResponse { transactions }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionDoc>,
) -> Result<StatusCode, DevStoreError> {
    let mut tx = decode(payload)?;
    // The path segment is authoritative for identity.
    tx.id = id;

    state.store.update(&tx).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, DevStoreError> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
