//! Parsing of single commit log lines.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Field separator in `--pretty=format:%H|%an|%s|%b|%ad` output.
pub const FIELD_DELIMITER: char = '|';

/// Minimum number of fields a usable log line carries.
pub const MIN_FIELDS: usize = 5;

/// Timestamp layout produced by `--date=iso`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One parsed log entry.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::record::parse_record;
///
/// let record = parse_record("a1b2|alice|feat(auth): add login||2024-03-04 09:15:00 +0100").unwrap();
/// assert_eq!(record.author, "alice");
/// assert_eq!(record.subject, "feat(auth): add login");
/// assert_eq!(record.hour_key().as_deref(), Some("09:00"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit id.
    pub hash: String,
    /// Author name.
    pub author: String,
    /// First line of the message.
    pub subject: String,
    /// Remaining message text; may be empty.
    pub body: String,
    /// Author date in its own offset; `None` when it did not parse.
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl CommitRecord {
    /// Whether the body holds anything besides whitespace.
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// Hour bucket such as `"09:00"`, in the commit's own offset.
    pub fn hour_key(&self) -> Option<String> {
        self.timestamp.map(|ts| ts.format("%H:00").to_string())
    }

    /// Weekday in the commit's own offset.
    pub fn weekday(&self) -> Option<Weekday> {
        self.timestamp.map(|ts| ts.weekday())
    }

    /// Calendar date in the commit's own offset.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date_naive())
    }
}

/// Parse one `hash|author|subject|body|date` line.
///
/// Returns `None` for lines with fewer than [`MIN_FIELDS`] fields. The date
/// is always the last field, so a body containing the delimiter is kept
/// whole. An unparseable date leaves `timestamp` empty.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::record::parse_record;
///
/// assert!(parse_record("only|three|fields").is_none());
///
/// let record = parse_record("h|bob|fix: typo|see a|b|not a date").unwrap();
/// assert_eq!(record.body, "see a|b");
/// assert!(record.timestamp.is_none());
/// ```
pub fn parse_record(line: &str) -> Option<CommitRecord> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let last = fields.len() - 1;
    let date = fields[last].trim();
    Some(CommitRecord {
        hash: fields[0].to_string(),
        author: fields[1].to_string(),
        subject: fields[2].to_string(),
        body: fields[3..last].join("|"),
        timestamp: DateTime::parse_from_str(date, DATE_FORMAT).ok(),
    })
}

/// Full English weekday name, as used for the day distribution.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
