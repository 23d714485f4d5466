use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc,
};
use regex::{Captures, Regex};
use tracing::debug;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
];

// Year is filled from the current date.
const MONTH_DAY_FORMATS: &[&str] = &["%B %d", "%d %B"];

const MONTH: &str = r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?";

const TRAILING_TIME: &str = r"(?:\s*(?:,|-|at|@)?\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s*(?P<offset>Z|UTC|GMT|[+-]\d{2}:?\d{2}))?)?";

pub fn normalize_date(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(iso) = parse_exact(trimmed) {
        return Some(iso);
    }

    if let Some(iso) = parse_embedded(trimmed) {
        return Some(iso);
    }

    if let Some(iso) = parse_loose(trimmed) {
        return Some(iso);
    }

    debug!(raw = trimmed, "date text not recognized; keeping raw value");
    Some(trimmed.to_string())
}

fn parse_exact(value: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(format_with_offset(dt));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(format_with_offset(dt));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(format_naive(dt));
        }
    }

    let date = parse_date_only(value)
        .or_else(|| parse_month_day(value))
        .or_else(|| parse_month_year(value))?;
    date.and_hms_opt(0, 0, 0).map(format_naive)
}

fn parse_date_only(value: &str) -> Option<NaiveDate> {
    let cleaned = clean_month_names(value);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
}

fn parse_month_day(value: &str) -> Option<NaiveDate> {
    let cleaned = clean_month_names(value);
    let with_year = format!("{} {}", cleaned.trim_end_matches(','), Local::now().year());
    MONTH_DAY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&with_year, &format!("{format} %Y")).ok())
}

fn parse_month_year(value: &str) -> Option<NaiveDate> {
    let cleaned = clean_month_names(value);
    NaiveDate::parse_from_str(&format!("1 {cleaned}"), "%d %B %Y").ok()
}

fn parse_embedded(text: &str) -> Option<String> {
    let patterns = [
        r"(?P<date>\d{4}-\d{2}-\d{2})(?:[T ](?P<time>\d{2}:\d{2}(?::\d{2})?)(?P<offset>Z|[+-]\d{2}:?\d{2})?)?"
            .to_string(),
        format!(r"(?P<date>\d{{4}}/\d{{2}}/\d{{2}})\b{TRAILING_TIME}"),
        format!(r"(?i)(?P<date>\b{MONTH}\s+\d{{1,2}},?\s+\d{{4}})\b{TRAILING_TIME}"),
        format!(r"(?i)(?P<date>\b\d{{1,2}}\s+{MONTH}\s+\d{{4}})\b{TRAILING_TIME}"),
        format!(r"(?P<date>\b\d{{1,2}}/\d{{1,2}}/\d{{4}})\b{TRAILING_TIME}"),
    ];

    for pat in &patterns {
        let regex = Regex::new(pat).ok()?;
        if let Some(caps) = regex.captures(text) {
            return combine_captures(&caps);
        }
    }

    None
}

fn combine_captures(caps: &Captures<'_>) -> Option<String> {
    let date = parse_date_only(caps.name("date")?.as_str())?;
    let Some(time) = caps.name("time") else {
        return date.and_hms_opt(0, 0, 0).map(format_naive);
    };

    let time = NaiveTime::parse_from_str(time.as_str(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.as_str(), "%H:%M"))
        .ok()?;
    let naive = date.and_time(time);

    match caps.name("offset").and_then(|m| parse_offset(m.as_str())) {
        Some(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(format_with_offset),
        None => Some(format_naive(naive)),
    }
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    if matches!(value.to_ascii_uppercase().as_str(), "Z" | "UTC" | "GMT") {
        return FixedOffset::east_opt(0);
    }

    let sign = if value.starts_with('-') { -1 } else { 1 };
    let digits: String = value[1..].chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 4 {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_loose(value: &str) -> Option<String> {
    // Bare digit runs are read as unix timestamps by dateparser.
    if value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let dt = dateparser::parse_with_timezone(value, &Utc).ok()?;
    let year = dt.year();
    if year < 1000 || !value.contains(&year.to_string()) {
        debug!(raw = value, year, "discarding implausible loose date parse");
        return None;
    }
    Some(format_naive(dt.naive_utc()))
}

fn clean_month_names(value: &str) -> String {
    let Ok(sept) = Regex::new(r"(?i)\bsept\b") else {
        return value.replace('.', "");
    };
    sept.replace_all(&value.replace('.', ""), "Sep").into_owned()
}

fn format_naive(dt: NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn format_with_offset(dt: DateTime<FixedOffset>) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
    }
}
