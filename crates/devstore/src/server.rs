use std::sync::Arc;

use axum::{Router, routing::get, routing::put};
use ledger::MemoryStore;

use crate::transactions;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<MemoryStore>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            put(transactions::update).delete(transactions::delete),
        )
        .with_state(state)
}

pub async fn run(store: Arc<MemoryStore>) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:8080").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind dev store listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(store, listener).await {
        tracing::error!("dev store failed: {err}");
    }
}

pub async fn run_with_listener(
    store: Arc<MemoryStore>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Dev store listening on {}", addr);

    let state = ServerState { store };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    store: Arc<MemoryStore>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(store, listener).await {
            tracing::error!("dev store failed: {err}");
        }
    });

    Ok(addr)
}
