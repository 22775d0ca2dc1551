//! Human-readable sizes and durations.

use std::time::Duration;

const UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// Format a byte count with base-2 units and two decimals, e.g. `9.25 MiB`.
pub fn pretty_bytes(num: u64) -> String {
    let mut value = num as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.2} {}B", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} YiB", value)
}

/// Format a duration as `1h 02m 03s`, `2m 05s` or `4.2s`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m {:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}
