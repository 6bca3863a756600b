//! 时间工具函数 - 业务时区转换
//!
//! Timestamps are Unix millis everywhere; calendar boundaries ("today",
//! "this month") are taken in the business timezone.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

/// Current Unix millis
#[inline]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Calendar date of a timestamp in the business timezone
pub fn business_date(millis: i64, tz: Tz) -> NaiveDate {
    chrono::DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&tz)
        .date_naive()
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (业务时区)
///
/// 调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}

/// First instant of the month containing `date`
pub fn month_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let first = date.with_day(1).unwrap_or(date);
    day_start_millis(first, tz)
}
