//! Ledger outbox routes
//!
//! `GET /api/ledger/stats` 返回账本出队计数，用于对账。

use axum::{Router, extract::State, routing::get};

use crate::core::ServerState;
use crate::services::LedgerStats;
use crate::utils::ApiResponse;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/ledger/stats", get(stats))
}

pub async fn stats(State(state): State<ServerState>) -> ApiResponse<LedgerStats> {
    ApiResponse::success(state.ledger.stats())
}
