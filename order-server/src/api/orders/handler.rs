//! Order API Handlers
//!
//! The order engine is synchronous (one redb write transaction per command),
//! so every call runs on the blocking pool.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::Operator;
use crate::core::ServerState;
use crate::orders::{ManagerResult, OrdersManager};
use crate::utils::{ApiResponse, AppError, AppResult};
use shared::order::{
    CreateOrderRequest, DashboardMetrics, DeliverRequest, DeliveryResult, Invoice, ItemPatch,
    Order, OrderQuery, PaymentInput, UpdateStatusRequest,
};

/// Run an engine call on the blocking pool
async fn run_blocking<T, F>(state: &ServerState, f: F) -> AppResult<ApiResponse<T>>
where
    T: Send + 'static,
    F: FnOnce(&OrdersManager) -> ManagerResult<T> + Send + 'static,
{
    let orders = state.orders.clone();
    let result = tokio::task::spawn_blocking(move || f(&orders))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Order engine task failed");
            AppError::internal("Order engine task failed")
        })?;
    Ok(ApiResponse::success(result?))
}

/// Create an order
pub async fn create(
    State(state): State<ServerState>,
    operator: Operator,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<ApiResponse<Order>> {
    let meta = operator.metadata();
    run_blocking(&state, move |orders| orders.create_order(payload, &meta)).await
}

/// List orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> AppResult<ApiResponse<Vec<Order>>> {
    run_blocking(&state, move |orders| orders.list_orders(&query)).await
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Order>> {
    run_blocking(&state, move |orders| orders.get_order(&id)).await
}

pub async fn update_status(
    State(state): State<ServerState>,
    operator: Operator,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<ApiResponse<Order>> {
    let meta = operator.metadata();
    run_blocking(&state, move |orders| {
        orders.update_status(&id, payload.status, &meta)
    })
    .await
}

/// Record a payment against the balance
pub async fn add_payment(
    State(state): State<ServerState>,
    operator: Operator,
    Path(id): Path<String>,
    Json(payload): Json<PaymentInput>,
) -> AppResult<ApiResponse<Order>> {
    let meta = operator.metadata();
    run_blocking(&state, move |orders| orders.add_payment(&id, payload, &meta)).await
}

/// Deliver the order and produce its invoice
pub async fn deliver(
    State(state): State<ServerState>,
    operator: Operator,
    Path(id): Path<String>,
    Json(payload): Json<DeliverRequest>,
) -> AppResult<ApiResponse<DeliveryResult>> {
    let meta = operator.metadata();
    run_blocking(&state, move |orders| orders.deliver_order(&id, payload, &meta)).await
}

pub async fn get_invoice(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Invoice>> {
    run_blocking(&state, move |orders| orders.get_invoice(&id)).await
}

pub async fn update_item(
    State(state): State<ServerState>,
    operator: Operator,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<ItemPatch>,
) -> AppResult<ApiResponse<Order>> {
    let meta = operator.metadata();
    run_blocking(&state, move |orders| {
        orders.update_item(&id, &item_id, payload, &meta)
    })
    .await
}

pub async fn delete_item(
    State(state): State<ServerState>,
    operator: Operator,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Order>> {
    let meta = operator.metadata();
    run_blocking(&state, move |orders| orders.delete_item(&id, &item_id, &meta)).await
}

pub async fn dashboard(State(state): State<ServerState>) -> AppResult<ApiResponse<DashboardMetrics>> {
    run_blocking(&state, |orders| orders.dashboard()).await
}

/// Open orders due within the alert horizon or already overdue
pub async fn delivery_alerts(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Order>>> {
    run_blocking(&state, |orders| orders.delivery_alerts()).await
}
