//! Reference rate routes
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/rates | GET | 当前参考金价 (未发布时为 null) |
//! | /api/rates | PUT | 发布新参考金价 |

use axum::{Json, Router, extract::State, routing::get};
use rust_decimal::Decimal;

use crate::core::ServerState;
use crate::orders::money::MAX_PRICE;
use crate::services::ReferenceRateLookup;
use crate::utils::time::now_millis;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::ReferenceRates;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/rates", get(current).put(publish))
}

pub async fn current(State(state): State<ServerState>) -> ApiResponse<Option<ReferenceRates>> {
    ApiResponse::success(state.rates.latest())
}

/// Publish a new rate table; `updated_at` defaults to now
///
/// Each rate must lie in `[0, MAX_PRICE]`.
pub async fn publish(
    State(state): State<ServerState>,
    Json(mut rates): Json<ReferenceRates>,
) -> AppResult<ApiResponse<ReferenceRates>> {
    for (label, value) in [
        ("rate_18k", rates.rate_18k),
        ("rate_22k", rates.rate_22k),
        ("rate_24k", rates.rate_24k),
    ] {
        if value < Decimal::ZERO || value > MAX_PRICE {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("{} must be between 0 and {}, got {}", label, MAX_PRICE, value),
            ));
        }
    }
    if rates.updated_at <= 0 {
        rates.updated_at = now_millis();
    }
    state.rates.publish(rates.clone());
    Ok(ApiResponse::success(rates))
}
