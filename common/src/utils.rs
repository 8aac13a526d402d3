use std::time::Duration;

/// Bounds (inclusive, seconds) of the random pause between two listing pages
pub const CRAWL_COOLDOWN_MIN_SECS: u64 = 6;
pub const CRAWL_COOLDOWN_MAX_SECS: u64 = 9;

/// Formats a run duration as `HH:MM:SS`, hours are not wrapped at 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();

    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        total % 3600 / 60,
        total % 60
    )
}

/// Flattens an error and its sources into one line for the log
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
