//! Format - Cell Formatting Utilities
//!
//! Pure helpers that turn raw record fields into display text. Everything
//! takes `now` explicitly so relative times are testable.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use rust_i18n::t;

use crate::i18n::normalize_locale;

/// Placeholder for absent values
pub const EMPTY_CELL: &str = "-";

/// Color class of a status cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Default,
}

impl Severity {
    pub fn from_status(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "succeeded" => Severity::Success,
            "failed" | "error" => Severity::Error,
            _ => Severity::Default,
        }
    }
}

/// Text plus hover tooltip for one timestamp cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampCell {
    pub text: String,
    pub tooltip: Option<String>,
}

/// Parse RFC 3339 or a naive `YYYY-MM-DD HH:MM:SS` (read as UTC)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Format a UTC datetime for display in local time
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = dt.with_timezone(&Local);
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// "3 minutes ago" / "in 2 hours" relative to `now`, in `locale`
pub fn format_relative(dt: &DateTime<Utc>, now: &DateTime<Utc>, locale: &str) -> String {
    let locale = normalize_locale(locale);
    let seconds = now.signed_duration_since(*dt).num_seconds();
    let future = seconds < 0;
    let seconds = seconds.unsigned_abs();

    if seconds < 45 {
        let key = if future { "time.soon" } else { "time.just_now" };
        return t!(key, locale = locale).to_string();
    }

    let (amount, unit) = match seconds {
        s if s < 3_600 => ((s + 30) / 60, "minute"),
        s if s < 86_400 => ((s + 1_800) / 3_600, "hour"),
        s if s < 2_592_000 => ((s + 43_200) / 86_400, "day"),
        s if s < 31_536_000 => ((s + 1_296_000) / 2_592_000, "month"),
        s => ((s + 15_768_000) / 31_536_000, "year"),
    };
    let amount = amount.max(1);
    let form = if amount == 1 { "one" } else { "other" };
    let span = t!(format!("time.{unit}.{form}"), locale = locale, count = amount).to_string();

    let key = if future { "time.future" } else { "time.past" };
    t!(key, locale = locale, span = span).to_string()
}

/// Relative time with the absolute timestamp as tooltip.
///
/// Absent values show [`EMPTY_CELL`]; unparsable values show the raw text.
pub fn timestamp_cell(raw: Option<&str>, now: &DateTime<Utc>, locale: &str) -> TimestampCell {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return TimestampCell {
            text: EMPTY_CELL.to_string(),
            tooltip: None,
        };
    };

    match parse_timestamp(raw) {
        Some(dt) => TimestampCell {
            text: format_relative(&dt, now, locale),
            tooltip: Some(format_datetime(&dt)),
        },
        None => TimestampCell {
            text: raw.to_string(),
            tooltip: None,
        },
    }
}

/// Human name of a provider identifier, matched case-insensitively
pub fn provider_display_name(provider: &str) -> String {
    match provider.trim().to_ascii_lowercase().as_str() {
        "knowledge_mixer" => "KnowledgeMixer".to_string(),
        _ => provider.to_string(),
    }
}

/// Truncate to `max_chars` characters with an ellipsis, never splitting a char
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let cut: String = s.chars().take(max_chars - 1).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid date")
    }

    #[test]
    fn test_severity() {
        assert_eq!(Severity::from_status("succeeded"), Severity::Success);
        assert_eq!(Severity::from_status("failed"), Severity::Error);
        assert_eq!(Severity::from_status("ERROR"), Severity::Error);
        assert_eq!(Severity::from_status("running"), Severity::Default);
        assert_eq!(Severity::from_status(""), Severity::Default);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 11, 57, 0).single();
        assert_eq!(parse_timestamp("2024-05-01T11:57:00Z"), expected);
        assert_eq!(parse_timestamp("2024-05-01T20:57:00+09:00"), expected);
        assert_eq!(parse_timestamp("2024-05-01 11:57:00"), expected);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_format_relative() {
        let now = now();
        let ago = |d: Duration| format_relative(&(now - d), &now, "en");
        assert_eq!(ago(Duration::seconds(10)), "less than a minute ago");
        assert_eq!(ago(Duration::minutes(1)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(3)), "3 minutes ago");
        assert_eq!(ago(Duration::hours(5)), "5 hours ago");
        assert_eq!(ago(Duration::days(2)), "2 days ago");
        assert_eq!(format_relative(&(now + Duration::hours(2)), &now, "en"), "in 2 hours");
    }

    #[test]
    fn test_format_relative_japanese() {
        let now = now();
        let ago = |d: Duration| format_relative(&(now - d), &now, "ja-JP");
        assert_eq!(ago(Duration::seconds(10)), "1分未満前");
        assert_eq!(ago(Duration::minutes(3)), "3分前");
        assert_eq!(ago(Duration::hours(1)), "1時間前");
        assert_eq!(ago(Duration::days(2)), "2日前");
        assert_eq!(format_relative(&(now + Duration::hours(2)), &now, "ja"), "2時間後");

        let cell = timestamp_cell(Some("2024-05-01T11:57:00Z"), &now, "ja");
        assert_eq!(cell.text, "3分前");
        assert!(cell.tooltip.is_some());
    }

    #[test]
    fn test_timestamp_cell() {
        let now = now();
        let absent = timestamp_cell(None, &now, "en");
        assert_eq!(absent.text, EMPTY_CELL);
        assert_eq!(absent.tooltip, None);

        assert_eq!(timestamp_cell(Some("  "), &now, "en").text, EMPTY_CELL);

        let raw = timestamp_cell(Some("not a date"), &now, "en");
        assert_eq!(raw.text, "not a date");
        assert_eq!(raw.tooltip, None);

        let cell = timestamp_cell(Some("2024-05-01T11:57:00Z"), &now, "en");
        assert_eq!(cell.text, "3 minutes ago");
        assert!(cell.tooltip.is_some());
    }

    #[test]
    fn test_provider_display_name() {
        assert_eq!(provider_display_name("knowledge_mixer"), "KnowledgeMixer");
        assert_eq!(provider_display_name("KNOWLEDGE_MIXER"), "KnowledgeMixer");
        assert_eq!(provider_display_name("Knowledge_Mixer"), "KnowledgeMixer");
        assert_eq!(provider_display_name("slack"), "slack");
        assert_eq!(provider_display_name("Slack"), "Slack");
    }

    #[test]
    fn test_truncate_on_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("接続がタイムアウトしました", 4), "接続が…");
        assert_eq!(truncate("abc", 0), "");
    }
}
