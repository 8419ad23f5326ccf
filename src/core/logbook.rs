// License: MIT

/// One exported row of the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub application: String,
    pub time: String,
}

impl LogRow {
    pub fn new(application: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            application: application.into(),
            time: format_duration_ms(duration_ms),
        }
    }
}

/// Formats a duration as `H:MM:SS` with unbounded hours. Sub-second
/// remainders are truncated, never rounded.
pub fn format_duration_ms(duration_ms: u64) -> String {
    let total_seconds = duration_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_duration_ms(3725 * 1000), "1:02:05");
        assert_eq!(format_duration_ms(59 * 1000), "0:00:59");
        assert_eq!(format_duration_ms(0), "0:00:00");
    }

    #[test]
    fn truncates_sub_second_remainders() {
        assert_eq!(format_duration_ms(90_900), "0:01:30");
        assert_eq!(format_duration_ms(999), "0:00:00");
    }

    #[test]
    fn hours_field_is_unbounded() {
        assert_eq!(format_duration_ms(100 * 3600 * 1000), "100:00:00");
    }
}
