use chrono::{DateTime, TimeZone, Utc};

/// ChatStorage.sqlite stores Core Data timestamps: seconds since
/// 2001-01-01T00:00:00Z, which sits this many seconds after the Unix epoch.
pub const COCOA_EPOCH_OFFSET_SECS: i64 = 978_307_200;

/// Convert a Core Data timestamp to UTC at millisecond precision.
/// Non-finite or out-of-range values yield `None`.
pub fn cocoa_to_utc(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let millis = (secs * 1000.0).round() as i64 + COCOA_EPOCH_OFFSET_SECS * 1000;
    Utc.timestamp_millis_opt(millis).single()
}
