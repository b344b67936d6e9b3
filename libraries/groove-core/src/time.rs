//! Time formatting helpers for the playback bar and track lists.

/// Format milliseconds as `m:ss`.
///
/// Minutes are not padded and grow past 59 (`61:01` for an hour-long track).
pub fn format_time(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let remaining = seconds % 60;
    format!("{}:{:02}", minutes, remaining)
}

/// Parse an `m:ss` duration label into milliseconds.
///
/// Returns `None` for anything that is not two colon-separated integers,
/// whose seconds part is 60 or more, or that overflows `u64` milliseconds.
pub fn parse_duration_label(label: &str) -> Option<u64> {
    let (minutes, seconds) = label.trim().split_once(':')?;
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    minutes.checked_mul(60_000)?.checked_add(seconds * 1000)
}
