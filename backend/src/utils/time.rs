use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Rendered in place of a duration while a session is still open.
pub const IN_PROGRESS: &str = "Em andamento";

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Formats whole seconds as `HH:MM:SS`, each part zero-padded to two digits.
pub fn format_duration_hms(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Formats an optional session duration: `HH:MM:SS` when closed, the
/// in-progress literal while open.
pub fn format_session_duration(duration_seconds: Option<i64>) -> String {
    match duration_seconds {
        Some(seconds) => format_duration_hms(seconds),
        None => IN_PROGRESS.to_string(),
    }
}

/// Formats a timestamp for dashboard display (`dd/MM/yyyy HH:mm`) in the
/// given timezone.
pub fn format_dashboard_timestamp(ts: DateTime<Utc>, tz: &Tz) -> String {
    ts.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string()
}
