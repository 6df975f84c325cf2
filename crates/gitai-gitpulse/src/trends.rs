use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of the long trend window, in days.
pub const LONG_WINDOW_DAYS: i64 = 30;
/// Length of the short trend window, in days.
pub const SHORT_WINDOW_DAYS: i64 = 7;

/// Recent activity computed from per-day commit counts.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use gitai_gitpulse::trends::analyze_trends;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
/// let mut days = BTreeMap::new();
/// days.insert(NaiveDate::from_ymd_opt(2024, 5, 19).unwrap(), 3);
/// days.insert(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), 6);
///
/// let trends = analyze_trends(&days, now);
/// assert_eq!(trends.last_30_days, 9);
/// assert_eq!(trends.last_7_days, 3);
/// assert_eq!(trends.most_active_day, NaiveDate::from_ymd_opt(2024, 5, 1));
/// assert!((trends.average_per_day - 0.3).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    /// Commits dated after `now - 30 days`.
    pub last_30_days: usize,
    /// Commits dated after `now - 7 days`.
    pub last_7_days: usize,
    /// Day with the most commits; the earliest such day on a tie.
    pub most_active_day: Option<NaiveDate>,
    /// `last_30_days / 30.0`.
    pub average_per_day: f64,
}

/// Sum the rolling windows and find the busiest day.
///
/// A date falls inside a window when its midnight (UTC) is strictly after
/// `now` minus the window length.
pub fn analyze_trends(day_counts: &BTreeMap<NaiveDate, usize>, now: DateTime<Utc>) -> TrendAnalysis {
    let long_start = now - Duration::days(LONG_WINDOW_DAYS);
    let short_start = now - Duration::days(SHORT_WINDOW_DAYS);

    let mut trends = TrendAnalysis::default();
    let mut max_count = 0;

    for (&date, &count) in day_counts {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        if midnight > long_start {
            trends.last_30_days += count;
        }
        if midnight > short_start {
            trends.last_7_days += count;
        }
        if count > max_count {
            max_count = count;
            trends.most_active_day = Some(date);
        }
    }

    if trends.last_30_days > 0 {
        trends.average_per_day = trends.last_30_days as f64 / LONG_WINDOW_DAYS as f64;
    }
    trends
}
