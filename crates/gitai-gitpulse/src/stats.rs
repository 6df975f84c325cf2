//! Aggregation of parsed commit records into distributions.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::language::detect_language;
use crate::record::{weekday_name, CommitRecord};
use crate::trends::{analyze_trends, TrendAnalysis};

struct SubjectPatterns {
    conventional: Regex,
    verb: Regex,
    ticket: Regex,
}

fn subject_patterns() -> &'static SubjectPatterns {
    static PATTERNS: OnceLock<SubjectPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SubjectPatterns {
        conventional: Regex::new(r"^([[:word:]]+)(\(([^)]+)\))?:\s*(.+)$").unwrap(),
        verb: Regex::new(r"^([[:word:]]+)(\(([^)]+)\))?:\s*([[:word:]]+)").unwrap(),
        ticket: Regex::new(r"\[([[:word:]-]+)\]|(?-u:\b)([A-Z]+-[0-9]+)(?-u:\b)").unwrap(),
    })
}

/// Type and optional scope of a `type(scope): message` subject.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::stats::commit_type_and_scope;
///
/// assert_eq!(commit_type_and_scope("feat(auth): add login"), Some(("feat", Some("auth"))));
/// assert_eq!(commit_type_and_scope("fix: typo"), Some(("fix", None)));
/// assert_eq!(commit_type_and_scope("Update README"), None);
/// ```
pub fn commit_type_and_scope(subject: &str) -> Option<(&str, Option<&str>)> {
    let caps = subject_patterns().conventional.captures(subject)?;
    let commit_type = caps.get(1)?.as_str();
    let scope = caps.get(3).map(|m| m.as_str());
    Some((commit_type, scope))
}

/// First word after the `type(scope):` prefix, lowercased.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::stats::leading_verb;
///
/// assert_eq!(leading_verb("feat(api): Add pagination").as_deref(), Some("add"));
/// assert_eq!(leading_verb("Add pagination"), None);
/// ```
pub fn leading_verb(subject: &str) -> Option<String> {
    let caps = subject_patterns().verb.captures(subject)?;
    caps.get(4).map(|m| m.as_str().to_lowercase())
}

/// Whether a subject references a ticket, either `[TOKEN]` or `ABC-123`.
pub fn mentions_ticket(subject: &str) -> bool {
    subject_patterns().ticket.is_match(subject)
}

/// Aggregate statistics over a batch of commits.
///
/// All distributions are ordered maps so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitStats {
    /// Parsed records in the batch.
    pub total_commits: usize,
    /// Commit type -> count, for conventional subjects.
    pub type_distribution: BTreeMap<String, usize>,
    /// Scope -> count.
    pub scope_distribution: BTreeMap<String, usize>,
    /// Author -> count.
    pub author_stats: BTreeMap<String, usize>,
    /// Lowercased leading verb -> count.
    pub common_verbs: BTreeMap<String, usize>,
    /// Language tag -> count.
    pub language_usage: BTreeMap<String, usize>,
    /// `"HH:00"` -> count, dated commits only.
    pub time_distribution: BTreeMap<String, usize>,
    /// Weekday name -> count, dated commits only.
    pub day_distribution: BTreeMap<String, usize>,
    /// Integer mean subject length in characters.
    pub average_subject_length: usize,
    /// Longest subject; the first one on a tie.
    pub longest_subject: String,
    /// Shortest subject; the first one on a tie.
    pub shortest_subject: String,
    /// Commits with a `(scope)` segment.
    pub with_scope: usize,
    /// Commits with a non-blank body.
    pub with_body: usize,
    /// Commits whose subject references a ticket.
    pub with_ticket: usize,
    /// Rolling activity; `None` when no commit date parsed.
    pub recent_trends: Option<TrendAnalysis>,
}

impl CommitStats {
    /// Share of `count` in the batch as a percentage, zero for an empty batch.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitai_gitpulse::CommitStats;
    ///
    /// let stats = CommitStats { total_commits: 8, with_scope: 2, ..Default::default() };
    /// assert_eq!(stats.percent_of_total(stats.with_scope), 25.0);
    /// assert_eq!(CommitStats::default().percent_of_total(3), 0.0);
    /// ```
    pub fn percent_of_total(&self, count: usize) -> f64 {
        if self.total_commits == 0 {
            0.0
        } else {
            count as f64 / self.total_commits as f64 * 100.0
        }
    }
}

/// Single-pass accumulator behind [`CommitStats`].
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use gitai_gitpulse::record::parse_record;
/// use gitai_gitpulse::stats::StatsAggregator;
///
/// let mut agg = StatsAggregator::default();
/// agg.add(&parse_record("h1|alice|feat(ui): add button||2024-01-01 10:00:00 +0000").unwrap());
/// let stats = agg.finish(Utc::now());
/// assert_eq!(stats.total_commits, 1);
/// assert_eq!(stats.scope_distribution["ui"], 1);
/// ```
#[derive(Debug, Default)]
pub struct StatsAggregator {
    stats: CommitStats,
    subject_chars: usize,
    shortest_chars: Option<usize>,
    longest_chars: usize,
    day_counts: BTreeMap<NaiveDate, usize>,
}

impl StatsAggregator {
    /// Fold one record into the running totals.
    pub fn add(&mut self, record: &CommitRecord) {
        let stats = &mut self.stats;
        stats.total_commits += 1;
        bump(&mut stats.author_stats, &record.author);

        let chars = record.subject.chars().count();
        self.subject_chars += chars;
        if chars > self.longest_chars {
            self.longest_chars = chars;
            stats.longest_subject = record.subject.clone();
        }
        if self.shortest_chars.map_or(true, |shortest| chars < shortest) {
            self.shortest_chars = Some(chars);
            stats.shortest_subject = record.subject.clone();
        }

        if let (Some(hour), Some(day), Some(date)) =
            (record.hour_key(), record.weekday(), record.date())
        {
            bump(&mut stats.time_distribution, &hour);
            bump(&mut stats.day_distribution, weekday_name(day));
            *self.day_counts.entry(date).or_default() += 1;
        } else {
            trace!(hash = %record.hash, "commit date did not parse");
        }

        if let Some((commit_type, scope)) = commit_type_and_scope(&record.subject) {
            bump(&mut stats.type_distribution, commit_type);
            if let Some(scope) = scope {
                bump(&mut stats.scope_distribution, scope);
                stats.with_scope += 1;
            }
        }

        if record.has_body() {
            stats.with_body += 1;
        }
        if mentions_ticket(&record.subject) {
            stats.with_ticket += 1;
        }
        if let Some(verb) = leading_verb(&record.subject) {
            bump(&mut stats.common_verbs, &verb);
        }
        bump(&mut stats.language_usage, detect_language(&record.subject));
    }

    /// Close the batch, computing averages and trends relative to `now`.
    pub fn finish(self, now: DateTime<Utc>) -> CommitStats {
        let mut stats = self.stats;
        if stats.total_commits > 0 {
            stats.average_subject_length = self.subject_chars / stats.total_commits;
        }
        if !self.day_counts.is_empty() {
            stats.recent_trends = Some(analyze_trends(&self.day_counts, now));
        }
        stats
    }
}

fn bump(map: &mut BTreeMap<String, usize>, key: &str) {
    *map.entry(key.to_string()).or_default() += 1;
}
