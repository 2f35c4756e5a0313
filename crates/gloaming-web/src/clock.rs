use chrono::{DateTime, FixedOffset};
use gloaming_core::GloamingError;
use gloaming_ephemeris::time::local_from_unix_millis;

/// `Date.getTimezoneOffset()` counts minutes *behind* UTC; chrono wants seconds east.
pub fn offset_east_secs(timezone_offset_minutes: f64) -> i32 {
    (-timezone_offset_minutes * 60.0).round() as i32
}

/// Browser wall clock with the user's current UTC offset.
pub fn local_now() -> Result<DateTime<FixedOffset>, GloamingError> {
    let date = js_sys::Date::new_0();
    let unix_ms = date.get_time();
    let offset = offset_east_secs(date.get_timezone_offset());
    local_from_unix_millis(unix_ms as i64, offset)
        .ok_or_else(|| GloamingError::Dom(format!("clock out of range: {unix_ms} ms, offset {offset} s")))
}

/// Monotonic milliseconds, on the same timebase as rAF timestamps.
pub fn monotonic_ms(window: &web_sys::Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
