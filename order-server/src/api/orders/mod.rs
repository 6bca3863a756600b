//! Order API Module
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | POST | 创建订单 |
//! | /api/orders | GET | 订单列表 (status, search, from, to) |
//! | /api/orders/dashboard | GET | 看板指标 |
//! | /api/orders/alerts | GET | 交付提醒 |
//! | /api/orders/{id} | GET | 订单详情 |
//! | /api/orders/{id}/status | PUT | 更新状态 |
//! | /api/orders/{id}/payments | POST | 追加付款 |
//! | /api/orders/{id}/deliver | POST | 交付并生成发票 |
//! | /api/orders/{id}/invoice | GET | 交付发票 |
//! | /api/orders/{id}/items/{item_id} | PATCH | 修改明细 |
//! | /api/orders/{id}/items/{item_id} | DELETE | 删除明细 |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        // Static segments before /{id}
        .route("/dashboard", get(handler::dashboard))
        .route("/alerts", get(handler::delivery_alerts))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/payments", post(handler::add_payment))
        .route("/{id}/deliver", post(handler::deliver))
        .route("/{id}/invoice", get(handler::get_invoice))
        .route(
            "/{id}/items/{item_id}",
            patch(handler::update_item).delete(handler::delete_item),
        )
}
