use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::settings::{DisplaySettings, TimeZoneSetting, DEFAULT_DATE_PATTERN};

/// Literal separator placed between generated SQL statements in a stored response
pub const RESPONSE_SEPARATOR: &str = "\n---\n";

/// A row of the `query_history` table as the persistence service returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHistoryRow {
    pub id: String,
    pub user_id: String,
    pub prompt: String,
    pub response: String,
    pub created_at: String, // ISO 8601
}

/// UI-ready record for one generation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub query_count: usize,
    pub response: String,
}

impl HistoryEntry {
    /// Shape a stored row for display. `date` is a plain prefix slice of the
    /// timestamp so it never depends on the display time zone.
    pub fn from_row(row: QueryHistoryRow, display: &DisplaySettings) -> Self {
        let date = date_prefix(&row.created_at);
        let time = format_time(&row.created_at, display);
        let query_count = count_queries(&row.response);

        HistoryEntry {
            id: row.id,
            description: row.prompt,
            date,
            time,
            query_count,
            response: row.response,
        }
    }
}

/// Number of statements in a response; a response without separators counts as one
pub fn count_queries(response: &str) -> usize {
    response.split(RESPONSE_SEPARATOR).count()
}

/// First ten characters of a timestamp (`YYYY-MM-DD` for ISO 8601 input)
pub fn date_prefix(created_at: &str) -> String {
    created_at.chars().take(10).collect()
}

/// Entries whose description contains `term`, ignoring case, in source order
pub fn filter_entries<'a>(entries: &'a [HistoryEntry], term: &str) -> Vec<&'a HistoryEntry> {
    if term.is_empty() {
        return entries.iter().collect();
    }

    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.description.to_lowercase().contains(&needle))
        .collect()
}

/// Parse the timestamp shapes the stores hand back (RFC 3339 from the API,
/// `YYYY-MM-DD HH:MM:SS` text from Postgres and SQLite)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Hour and minute of a timestamp in the configured clock style and zone.
/// Unparseable timestamps render as an empty string.
pub fn format_time(created_at: &str, display: &DisplaySettings) -> String {
    let Some(utc) = parse_timestamp(created_at) else {
        log::debug!("Unparseable history timestamp: {}", created_at);
        return String::new();
    };

    let pattern = display.clock.pattern();
    match display.time_zone {
        TimeZoneSetting::Local => utc.with_timezone(&Local).format(pattern).to_string(),
        TimeZoneSetting::FixedOffset { minutes } => match FixedOffset::east_opt(minutes * 60) {
            Some(offset) => utc.with_timezone(&offset).format(pattern).to_string(),
            None => {
                log::warn!("Ignoring out-of-range UTC offset: {} minutes", minutes);
                utc.format(pattern).to_string()
            }
        },
    }
}

/// Card label for an entry date, `Jan 2, 2024` with the default pattern.
/// A pattern chrono cannot render falls back to the default.
pub fn format_display_date(date: &str, pattern: &str) -> String {
    let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return "Invalid Date".to_string();
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        log::warn!("Invalid date pattern {:?}, using {:?}", pattern, DEFAULT_DATE_PATTERN);
        return day.format(DEFAULT_DATE_PATTERN).to_string();
    }
    day.format_with_items(items.into_iter()).to_string()
}
