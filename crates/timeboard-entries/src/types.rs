use serde::{Deserialize, Deserializer, Serialize};

/// One logged interval, as exported line-by-line by the capture tool.
///
/// Missing fields and explicit `null`s decode to zero values; unknown
/// fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeEntry {
    #[serde(deserialize_with = "nullable")]
    pub source: String,
    #[serde(deserialize_with = "nullable")]
    pub file_path: String,
    /// `YYYY-MM-DD` in the user's local timezone at capture time.
    #[serde(deserialize_with = "nullable")]
    pub date: String,
    /// Case-sensitive project label.
    #[serde(deserialize_with = "nullable")]
    pub project: String,
    #[serde(deserialize_with = "nullable")]
    pub start: String,
    #[serde(deserialize_with = "nullable")]
    pub end: String,
    /// Authoritative duration; `start`/`end` are never re-derived into minutes.
    #[serde(deserialize_with = "nullable")]
    pub minutes: u64,
    #[serde(deserialize_with = "nullable")]
    pub note: String,
    #[serde(deserialize_with = "nullable")]
    pub line_number: i64,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Minutes per project over a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStat {
    pub project: String,
    pub minutes: u64,
    pub hours: f64,
}

/// Minutes for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStat {
    pub date: String,
    pub minutes: u64,
    pub hours: f64,
}

/// Minutes for a Sunday-starting week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStat {
    pub week_start: String,
    pub minutes: u64,
    pub hours: f64,
}
