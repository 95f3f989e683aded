//! Date helper functions

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Placeholder shown when a timestamp cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Parse a timestamp as stored by the posts table.
///
/// Accepts RFC 3339, PostgreSQL style offsets (`+00`, `+0000`), naive
/// date-times (taken as UTC) and bare dates.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(date) = DateTime::<FixedOffset>::parse_from_str(value, format) {
            return Some(date.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMM D, YYYY") // -> "Jan 5, 2024"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Parse a stored timestamp and format it for display in `tz`
pub fn display_date<Tz: TimeZone>(value: &str, tz: &Tz, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(value) {
        Some(date) => format_date(&date.with_timezone(tz), format),
        None => INVALID_DATE.to_string(),
    }
}

/// Generate a <time> HTML element
pub fn time_tag<Tz: TimeZone>(value: &str, tz: &Tz, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(value) {
        Some(date) => {
            let local = date.with_timezone(tz);
            format!(
                r#"<time datetime="{}">{}</time>"#,
                local.format("%Y-%m-%dT%H:%M:%S%:z"),
                format_date(&local, format)
            )
        }
        None => format!("<time>{}</time>", INVALID_DATE),
    }
}

/// Convert Moment.js format to chrono format
///
/// Tokens are runs of the same letter; anything unrecognised is copied
/// through literally.
fn moment_to_chrono_format(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut result = String::with_capacity(format.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        let token: String = chars[i..i + run].iter().collect();
        let mapped = match token.as_str() {
            "YYYY" => Some("%Y"),
            "YY" => Some("%y"),
            "MMMM" => Some("%B"),
            "MMM" => Some("%b"),
            "MM" => Some("%m"),
            "M" => Some("%-m"),
            "DDDD" => Some("%j"),
            "DD" => Some("%d"),
            "D" => Some("%-d"),
            "dddd" => Some("%A"),
            "ddd" => Some("%a"),
            "HH" => Some("%H"),
            "H" => Some("%-H"),
            "hh" => Some("%I"),
            "h" => Some("%-I"),
            "mm" => Some("%M"),
            "ss" => Some("%S"),
            "SSS" => Some("%3f"),
            "A" => Some("%p"),
            "ZZ" => Some("%z"),
            _ => None,
        };

        match mapped {
            Some(directive) => result.push_str(directive),
            None => {
                for ch in token.chars() {
                    if ch == '%' {
                        result.push_str("%%");
                    } else {
                        result.push(ch);
                    }
                }
            }
        }

        i += run;
    }

    result
}
