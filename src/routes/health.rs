use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::config::StoreBackend;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let store = match state.config().store_backend {
        StoreBackend::Memory => "memory",
        StoreBackend::File => "file",
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "store": store
    }))
}
