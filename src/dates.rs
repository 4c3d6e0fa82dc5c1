use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

// Fixed floor for the allTime preset, old enough to precede any real data.
// This is an approximation, not a guarantee of true all-time coverage.
pub const ALL_TIME_FLOOR: &str = "2020-01-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateRangePreset {
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[serde(rename = "last90days")]
    Last90Days,
    #[serde(rename = "allTime")]
    AllTime,
    #[serde(rename = "custom")]
    Custom,
}

impl DateRangePreset {
    // Unknown preset names fall back to last30days; this is the default
    // policy, not an error.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "last7days" => Self::Last7Days,
            "last90days" => Self::Last90Days,
            "allTime" => Self::AllTime,
            "custom" => Self::Custom,
            _ => Self::Last30Days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
    pub preset: DateRangePreset,
}

impl DateRange {
    pub fn from_preset(preset: DateRangePreset, today: NaiveDate) -> Self {
        let end_date = today.to_string();
        let start_date = match preset {
            DateRangePreset::Last7Days => (today - Duration::days(7)).to_string(),
            DateRangePreset::Last90Days => (today - Duration::days(90)).to_string(),
            DateRangePreset::AllTime => ALL_TIME_FLOOR.to_string(),
            DateRangePreset::Last30Days | DateRangePreset::Custom => {
                (today - Duration::days(30)).to_string()
            }
        };

        Self {
            start_date,
            end_date,
            preset,
        }
    }

    // Caller-supplied bounds are echoed unchanged.
    pub fn custom(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            preset: DateRangePreset::Custom,
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// Strict YYYY-MM-DD: shape check first, then a real calendar date.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
