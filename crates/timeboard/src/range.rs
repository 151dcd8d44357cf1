//! Query range resolution shared by the HTTP handlers and `report`.

use chrono::{Days, NaiveDate, Utc};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

use timeboard_entries::dates::{format_canonical, parse_canonical};

/// Days covered by the default range, ending today.
pub const DEFAULT_SPAN_DAYS: u64 = 30;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern");
}

/// Raw `from` / `to` query parameters.
#[derive(Debug, Default)]
pub struct RangeParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RangeParams {
    /// Collect bounds from decoded query pairs. The first value of a repeated
    /// key wins and unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "from" => &mut params.from,
                "to" => &mut params.to,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// A validated inclusive range of canonical dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    /// Fill in missing bounds relative to `today` and validate both.
    pub fn resolve(params: RangeParams, today: NaiveDate) -> Result<Self, String> {
        let default_from = today
            .checked_sub_days(Days::new(DEFAULT_SPAN_DAYS))
            .unwrap_or(today);

        let from = params
            .from
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format_canonical(default_from));
        let to = params
            .to
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format_canonical(today));

        if !is_canonical_date(&from) {
            return Err(format!("invalid from date {:?}: must be YYYY-MM-DD", from));
        }
        if !is_canonical_date(&to) {
            return Err(format!("invalid to date {:?}: must be YYYY-MM-DD", to));
        }
        if from > to {
            return Err(format!("from ({}) must not be after to ({})", from, to));
        }

        Ok(Self { from, to })
    }
}

/// `YYYY-MM-DD` naming a real calendar day.
pub fn is_canonical_date(s: &str) -> bool {
    ISO_DATE.is_match(s) && parse_canonical(s).is_some()
}

/// Today's date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}
