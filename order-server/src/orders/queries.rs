//! Read-side queries over stored orders

use crate::utils::time::{business_date, day_end_millis, day_start_millis, month_start_millis};
use chrono_tz::Tz;
use shared::order::{DashboardMetrics, Order, OrderQuery, OrderStatus};

const HOUR_MS: i64 = 60 * 60 * 1000;

fn matches_search(order: &Order, needle: &str) -> bool {
    let contains = |s: &str| s.to_lowercase().contains(needle);
    contains(&order.order_number)
        || contains(&order.customer.name)
        || contains(&order.customer.phone)
        || order.items.iter().any(|i| contains(i.name()))
}

/// Filter and sort newest first
pub fn filter_orders(orders: Vec<Order>, query: &OrderQuery) -> Vec<Order> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut result: Vec<Order> = orders
        .into_iter()
        .filter(|o| query.status.is_none_or(|s| o.status == s))
        .filter(|o| query.from.is_none_or(|from| o.created_at >= from))
        .filter(|o| query.to.is_none_or(|to| o.created_at <= to))
        .filter(|o| needle.as_deref().is_none_or(|n| matches_search(o, n)))
        .collect();

    result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    result
}

/// Open order whose expected date falls within `now + horizon`, including overdue ones
fn is_due_soon(order: &Order, now: i64, horizon_hours: i64) -> bool {
    order.is_open()
        && order
            .expected_delivery_date
            .is_some_and(|due| due <= now + horizon_hours * HOUR_MS)
}

/// Orders due within the horizon or overdue, soonest first
pub fn delivery_alerts(orders: Vec<Order>, now: i64, horizon_hours: i64) -> Vec<Order> {
    let mut alerts: Vec<Order> = orders
        .into_iter()
        .filter(|o| is_due_soon(o, now, horizon_hours))
        .collect();
    alerts.sort_by_key(|o| o.expected_delivery_date);
    alerts
}

pub fn dashboard_metrics(orders: &[Order], now: i64, tz: Tz, horizon_hours: i64) -> DashboardMetrics {
    let today = business_date(now, tz);
    let today_start = day_start_millis(today, tz);
    let today_end = day_end_millis(today, tz);
    let month_start = month_start_millis(today, tz);

    let mut metrics = DashboardMetrics::default();
    for status in OrderStatus::ALL {
        metrics.status_counts.insert(status.as_str().to_string(), 0);
    }

    for order in orders {
        if order.created_at >= today_start && order.created_at < today_end {
            metrics.orders_today += 1;
        }
        if order.created_at >= month_start && order.created_at < today_end {
            metrics.orders_this_month += 1;
        }
        if order.is_open() {
            metrics.total_advance_outstanding += order.advance_amount;
        }
        if order.status != OrderStatus::Cancelled {
            metrics.total_remaining_balance += order.remaining_amount;
        }
        if let Some(due) = order.expected_delivery_date.filter(|_| order.is_open()) {
            if due < now {
                metrics.overdue_count += 1;
            } else if due <= now + horizon_hours * HOUR_MS {
                metrics.near_delivery_count += 1;
            }
        }
        *metrics
            .status_counts
            .entry(order.status.as_str().to_string())
            .or_insert(0) += 1;
    }

    metrics
}
