use chrono::{DateTime, Utc};

/// "Nov 14, 2023".
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}
