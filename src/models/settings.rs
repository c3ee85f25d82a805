use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ClockStyle {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl ClockStyle {
    /// strftime pattern for a 2-digit hour and minute
    pub fn pattern(&self) -> &'static str {
        match self {
            ClockStyle::TwelveHour => "%I:%M %p",
            ClockStyle::TwentyFourHour => "%H:%M",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TimeZoneSetting {
    #[default]
    Local,
    FixedOffset { minutes: i32 },
}

pub const DEFAULT_DATE_PATTERN: &str = "%b %-d, %Y";

fn default_date_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    #[serde(default)]
    pub clock: ClockStyle,
    #[serde(default)]
    pub time_zone: TimeZoneSetting,
    /// strftime pattern for the card date, `Jan 2, 2024` by default
    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            clock: ClockStyle::default(),
            time_zone: TimeZoneSetting::default(),
            date_pattern: default_date_pattern(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CopySettings {
    /// How long the "copied" check mark stays visible
    pub feedback_ms: u64,
}

impl Default for CopySettings {
    fn default() -> Self {
        CopySettings { feedback_ms: 2000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    pub placeholder: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            placeholder: "Search your query history...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PageSettings {
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub copy: CopySettings,
    #[serde(default)]
    pub search: SearchSettings,
}
