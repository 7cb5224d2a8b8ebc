//! Time-related utilities with clock abstraction for testability.
//!
//! Timestamps are Unix milliseconds in WIB (UTC+7), the application's locale.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in WIB (milliseconds)
    fn now_wib_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_wib_millis(&self) -> i64 {
        get_wib_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_wib_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in WIB (milliseconds)
pub fn get_wib_timestamp() -> i64 {
    let wib_offset = FixedOffset::east_opt(7 * 3600).unwrap(); // WIB is UTC+7
    let now_utc = Utc::now();
    let now_wib: DateTime<FixedOffset> = now_utc.with_timezone(&wib_offset);
    now_wib.timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to WIB RFC 3339 format
///
/// The input may come off the wire, so out-of-range values must not panic;
/// they render as a placeholder instead.
pub fn timestamp_to_wib_rfc3339(timestamp_millis: i64) -> String {
    let wib_offset = FixedOffset::east_opt(7 * 3600).unwrap(); // WIB is UTC+7
    wib_offset
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| format!("<invalid timestamp: {}>", timestamp_millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_non_zero_timestamp() {
        // テスト項目: SystemClock が 0 以外のタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp = clock.now_wib_millis();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // テスト項目: SystemClock が呼び出すたびに増加するタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp1 = clock.now_wib_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let timestamp2 = clock.now_wib_millis();

        // then (期待する結果):
        assert!(timestamp2 >= timestamp1);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_timestamp() {
        // テスト項目: FixedClock が固定されたタイムスタンプを返す
        // given (前提条件):
        let fixed_time = 1234567890123;
        let clock = FixedClock::new(fixed_time);

        // when (操作):
        let timestamp = clock.now_wib_millis();

        // then (期待する結果):
        assert_eq!(timestamp, fixed_time);
    }

    #[test]
    fn test_timestamp_to_wib_rfc3339_format() {
        // テスト項目: タイムスタンプが正しく RFC 3339 形式に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00 WIB in milliseconds
        let timestamp = 1672506000000;

        // when (操作):
        let result = timestamp_to_wib_rfc3339(timestamp);

        // then (期待する結果):
        assert!(result.starts_with("2023-01-01T00:00:00"));
        assert!(result.contains("+07:00"));
    }

    #[test]
    fn test_timestamp_to_wib_rfc3339_with_out_of_range_value_does_not_panic() {
        // テスト項目: 範囲外のタイムスタンプでもパニックせず
        //             プレースホルダ文字列が返る
        // given (前提条件):
        let timestamp = i64::MAX;

        // when (操作):
        let result = timestamp_to_wib_rfc3339(timestamp);

        // then (期待する結果):
        assert!(result.contains("invalid timestamp"));
    }

    #[test]
    fn test_get_wib_timestamp_returns_positive_value() {
        // テスト項目: get_wib_timestamp が正の値を返す
        // given (前提条件):

        // when (操作):
        let timestamp = get_wib_timestamp();

        // then (期待する結果):
        assert!(timestamp > 0);
    }
}
