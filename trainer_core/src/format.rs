//! Human-readable durations.

/// Format a duration as `"1h 5m"`, `"3m 20s"` or `"45s"`
///
/// Hours drop the seconds component; whole minutes drop a zero seconds part.
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 && secs > 0 {
        format!("{}m {}s", minutes, secs)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", secs)
    }
}

/// Format a duration as a countdown clock, `"M:SS"`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(65), "1m 5s");
        assert_eq!(format_duration(120), "2m");
        assert_eq!(format_duration(3660), "1h 1m");
        assert_eq!(format_duration(3600), "1h 0m");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(600), "10:00");
    }
}
