//! Wall-clock helpers that work on native and wasm32.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Format epoch milliseconds as `HH:MM:SS` (UTC).
pub fn format_clock(millis: u64) -> String {
    let secs = (millis / 1000) % 86_400;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock((13 * 3600 + 5 * 60 + 9) * 1000 + 999), "13:05:09");
        assert_eq!(format_clock(86_400_000 + 61_000), "00:01:01");
    }

    #[test]
    fn test_now_is_after_2020() {
        assert!(now_millis() > 1_577_836_800_000);
    }
}
