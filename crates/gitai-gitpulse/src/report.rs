//! Human-readable rendering of [`CommitStats`] and recommendations.

use std::fmt;

use serde::Serialize;

use crate::language::language_name;
use crate::patterns::ranked;
use crate::stats::CommitStats;

const RULE_WIDTH: usize = 50;
const SUBJECT_PREVIEW_CHARS: usize = 60;
const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Average subject length above which subjects are flagged as long.
pub const LONG_SUBJECT: usize = 72;
/// Average subject length below which subjects are flagged as brief.
pub const BRIEF_SUBJECT: usize = 30;

/// `[████░░░░]` bar of `width` cells, `percent` clamped to `0..=100`.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::report::bar;
///
/// assert_eq!(bar(50, 4), "[██░░]");
/// assert_eq!(bar(250, 4), "[████]");
/// assert_eq!(bar(-5, 2), "[░░]");
/// ```
pub fn bar(percent: i64, width: usize) -> String {
    let filled = (percent.clamp(0, 100) as usize * width) / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

fn preview(subject: &str) -> String {
    if subject.chars().count() <= SUBJECT_PREVIEW_CHARS {
        return subject.to_string();
    }
    let head: String = subject.chars().take(SUBJECT_PREVIEW_CHARS - 3).collect();
    format!("{head}...")
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Render the full text report.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::analyze_history;
/// use gitai_gitpulse::report::format_stats_report;
///
/// let stats = analyze_history(["h|alice|feat: add x||2024-01-01 10:00:00 +0000"]);
/// let report = format_stats_report(&stats);
/// assert!(report.contains("Total Commits: 1"));
/// assert!(report.contains("feat"));
/// ```
pub fn format_stats_report(stats: &CommitStats) -> String {
    let mut out = String::new();
    let total = stats.total_commits;

    out.push_str("Commit History Statistics\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    out.push_str("Overview\n");
    out.push_str(&format!("  Total Commits: {total}\n"));
    out.push_str(&format!(
        "  Average Subject Length: {} characters\n",
        stats.average_subject_length
    ));
    for (label, count) in [
        ("With Scope", stats.with_scope),
        ("With Body", stats.with_body),
        ("With Ticket", stats.with_ticket),
    ] {
        out.push_str(&format!(
            "  {label}: {count} ({:.1}%)\n",
            stats.percent_of_total(count)
        ));
    }
    out.push('\n');

    out.push_str("Commit Types\n");
    for (name, count) in ranked(&stats.type_distribution).into_iter().take(10) {
        let pct = stats.percent_of_total(count);
        out.push_str(&format!(
            "  {name:<12} {} {count:>3} ({pct:.1}%)\n",
            bar(pct as i64, 20)
        ));
    }
    out.push('\n');

    if !stats.scope_distribution.is_empty() {
        out.push_str("Top Scopes\n");
        for (name, count) in ranked(&stats.scope_distribution).into_iter().take(8) {
            let pct = percent(count, stats.with_scope);
            out.push_str(&format!("  {name:<15} {} {count:>3}\n", bar(pct as i64, 15)));
        }
        out.push('\n');
    }

    if !stats.common_verbs.is_empty() {
        out.push_str("Common Action Verbs\n");
        for (verb, count) in ranked(&stats.common_verbs).into_iter().take(8) {
            out.push_str(&format!("  {verb:<12} {count:>3}\n"));
        }
        out.push('\n');
    }

    if stats.language_usage.len() > 1 {
        out.push_str("Language Usage\n");
        for (tag, count) in ranked(&stats.language_usage) {
            let pct = stats.percent_of_total(count);
            out.push_str(&format!(
                "  {:<10} {} {pct:.1}%\n",
                language_name(tag),
                bar(pct as i64, 20)
            ));
        }
        out.push('\n');
    }

    if !stats.time_distribution.is_empty() {
        out.push_str("Commit Time Distribution\n");
        for (hour, count) in ranked(&stats.time_distribution).into_iter().take(5) {
            out.push_str(&format!("  {hour}  {} {count}\n", bar(count as i64 * 2, 15)));
        }
        out.push('\n');
    }

    if !stats.day_distribution.is_empty() {
        out.push_str("Commit Day Distribution\n");
        let busiest = stats.day_distribution.values().copied().max().unwrap_or(0);
        for day in WEEKDAYS {
            if let Some(&count) = stats.day_distribution.get(day) {
                let pct = percent(count, busiest);
                out.push_str(&format!("  {day:<10} {} {count:>3}\n", bar(pct as i64, 20)));
            }
        }
        out.push('\n');
    }

    if let Some(trends) = &stats.recent_trends {
        out.push_str("Recent Activity\n");
        out.push_str(&format!(
            "  Last 30 days: {} commits ({:.1}/day avg)\n",
            trends.last_30_days, trends.average_per_day
        ));
        out.push_str(&format!("  Last 7 days:  {} commits\n", trends.last_7_days));
        if let Some(day) = trends.most_active_day {
            out.push_str(&format!("  Most active:  {day}\n"));
        }
        out.push('\n');
    }

    if !stats.author_stats.is_empty() {
        out.push_str("Top Contributors\n");
        for (author, count) in ranked(&stats.author_stats).into_iter().take(5) {
            let pct = stats.percent_of_total(count);
            out.push_str(&format!(
                "  {author:<25} {} {pct:.1}%\n",
                bar(pct as i64, 15)
            ));
        }
        out.push('\n');
    }

    out.push_str("Extremes\n");
    out.push_str(&format!("  Longest:  {}\n", preview(&stats.longest_subject)));
    out.push_str(&format!("  Shortest: {}\n", preview(&stats.shortest_subject)));
    out
}

/// What an [`Insight`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    /// Average subject over 72 characters.
    LongSubjects,
    /// Average subject under 30 characters.
    BriefSubjects,
    /// Scopes on under 20% of commits.
    RareScopes,
    /// Bodies on under 10% of commits.
    RareBodies,
    /// More than 10 commits a day over the last 30 days.
    HighFrequency,
    /// Fewer than 1 commit a day over the last 30 days.
    LowFrequency,
    /// Fewer than three distinct commit types.
    FewTypes,
}

/// One observation about commit habits, with a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    /// Category.
    pub kind: InsightKind,
    /// The observation.
    pub message: &'static str,
    /// Suggested follow-up.
    pub hint: &'static str,
}

impl Insight {
    fn new(kind: InsightKind) -> Self {
        let (message, hint) = match kind {
            InsightKind::LongSubjects => (
                "Your average subject line is quite long (>72 chars)",
                "Consider using shorter, more concise subjects",
            ),
            InsightKind::BriefSubjects => (
                "Your subject lines are very brief (<30 chars)",
                "Consider adding more context when helpful",
            ),
            InsightKind::RareScopes => (
                "You rarely use scopes in commits (<20%)",
                "Scopes help organize changes by component or module",
            ),
            InsightKind::RareBodies => (
                "Most commits have no body (<10%)",
                "Consider adding details for non-trivial changes",
            ),
            InsightKind::HighFrequency => (
                "Very high commit frequency (>10/day avg)",
                "Consider squashing related commits",
            ),
            InsightKind::LowFrequency => (
                "Low commit frequency (<1/day avg)",
                "Consider committing more frequently",
            ),
            InsightKind::FewTypes => (
                "Limited commit type variety",
                "Explore other types: docs, test, refactor, perf",
            ),
        };
        Self {
            kind,
            message,
            hint,
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n   {}", self.message, self.hint)
    }
}

/// Recommendations for a batch; empty when the batch is empty.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::CommitStats;
/// use gitai_gitpulse::report::{insights, InsightKind};
///
/// assert!(insights(&CommitStats::default()).is_empty());
///
/// let stats = CommitStats { total_commits: 10, average_subject_length: 80, ..Default::default() };
/// assert_eq!(insights(&stats)[0].kind, InsightKind::LongSubjects);
/// ```
pub fn insights(stats: &CommitStats) -> Vec<Insight> {
    let mut found = Vec::new();
    if stats.total_commits == 0 {
        return found;
    }

    if stats.average_subject_length > LONG_SUBJECT {
        found.push(Insight::new(InsightKind::LongSubjects));
    } else if stats.average_subject_length < BRIEF_SUBJECT {
        found.push(Insight::new(InsightKind::BriefSubjects));
    }

    if stats.percent_of_total(stats.with_scope) < 20.0 {
        found.push(Insight::new(InsightKind::RareScopes));
    }
    if stats.percent_of_total(stats.with_body) < 10.0 {
        found.push(Insight::new(InsightKind::RareBodies));
    }

    if let Some(trends) = &stats.recent_trends {
        if trends.average_per_day > 10.0 {
            found.push(Insight::new(InsightKind::HighFrequency));
        } else if trends.average_per_day < 1.0 {
            found.push(Insight::new(InsightKind::LowFrequency));
        }
    }

    if stats.type_distribution.len() < 3 {
        found.push(Insight::new(InsightKind::FewTypes));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::TrendAnalysis;
    use std::collections::BTreeMap;

    fn counts(entries: &[(&str, usize)]) -> BTreeMap<String, usize> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn sample() -> CommitStats {
        CommitStats {
            total_commits: 10,
            type_distribution: counts(&[("feat", 5), ("fix", 3), ("docs", 2)]),
            scope_distribution: counts(&[("auth", 3), ("api", 2)]),
            author_stats: counts(&[("alice", 6), ("bob", 4)]),
            common_verbs: counts(&[("add", 4), ("fix", 3)]),
            language_usage: counts(&[("en", 8), ("zh", 2)]),
            time_distribution: counts(&[("10:00", 4), ("14:00", 6)]),
            day_distribution: counts(&[("Friday", 2), ("Monday", 8)]),
            average_subject_length: 45,
            longest_subject: "feat(auth): add a very long subject line for testing purposes here".into(),
            shortest_subject: "fix: typo".into(),
            with_scope: 5,
            with_body: 3,
            with_ticket: 1,
            recent_trends: Some(TrendAnalysis {
                last_30_days: 45,
                last_7_days: 12,
                most_active_day: chrono::NaiveDate::from_ymd_opt(2024, 1, 15),
                average_per_day: 1.5,
            }),
        }
    }

    #[test]
    fn bar_widths() {
        assert_eq!(bar(0, 10), "[░░░░░░░░░░]");
        assert_eq!(bar(100, 10), "[██████████]");
        assert_eq!(bar(55, 20).chars().filter(|&c| c == '█').count(), 11);
        assert_eq!(bar(33, 15).chars().count(), 17);
    }

    #[test]
    fn report_sections() {
        let report = format_stats_report(&sample());
        assert!(report.starts_with("Commit History Statistics\n"));
        assert!(report.contains("  Total Commits: 10\n"));
        assert!(report.contains("  With Scope: 5 (50.0%)\n"));
        assert!(report.contains("  feat         [██████████░░░░░░░░░░]   5 (50.0%)\n"));
        assert!(report.contains("Top Scopes\n  auth"));
        assert!(report.contains("Common Action Verbs\n  add            4\n"));
        assert!(report.contains("中文"));
        assert!(report.contains("Commit Time Distribution\n  14:00"));
        assert!(report.contains("Last 30 days: 45 commits (1.5/day avg)"));
        assert!(report.contains("Most active:  2024-01-15"));
        assert!(report.contains("Top Contributors\n  alice"));
        assert!(report.contains("Shortest: fix: typo\n"));
    }

    #[test]
    fn days_follow_calendar_order() {
        let report = format_stats_report(&sample());
        let monday = report.find("  Monday").unwrap();
        let friday = report.find("  Friday").unwrap();
        assert!(monday < friday);
    }

    #[test]
    fn long_subjects_are_truncated() {
        let report = format_stats_report(&sample());
        let line = report
            .lines()
            .find(|l| l.starts_with("  Longest:"))
            .unwrap();
        assert!(line.ends_with("..."));
        assert_eq!(line.trim_start_matches("  Longest:  ").chars().count(), 60);
    }

    #[test]
    fn single_language_hides_language_section() {
        let mut stats = sample();
        stats.language_usage = counts(&[("en", 10)]);
        assert!(!format_stats_report(&stats).contains("Language Usage"));
    }

    #[test]
    fn empty_batch_report_has_no_nan() {
        let report = format_stats_report(&CommitStats::default());
        assert!(report.contains("With Scope: 0 (0.0%)"));
        assert!(!report.contains("NaN"));
    }

    #[test]
    fn healthy_batch_has_no_insights() {
        assert!(insights(&sample()).is_empty());
    }

    #[test]
    fn each_insight_threshold() {
        let mut stats = sample();
        stats.average_subject_length = 20;
        stats.with_scope = 1;
        stats.with_body = 0;
        stats.type_distribution = counts(&[("feat", 10)]);
        if let Some(trends) = stats.recent_trends.as_mut() {
            trends.average_per_day = 0.5;
        }
        let kinds: Vec<InsightKind> = insights(&stats).into_iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::BriefSubjects,
                InsightKind::RareScopes,
                InsightKind::RareBodies,
                InsightKind::LowFrequency,
                InsightKind::FewTypes,
            ]
        );
    }

    #[test]
    fn frequency_insight_needs_trends() {
        let mut stats = sample();
        stats.recent_trends = None;
        assert!(insights(&stats).is_empty());

        stats.recent_trends = Some(TrendAnalysis {
            average_per_day: 12.0,
            ..Default::default()
        });
        assert_eq!(insights(&stats)[0].kind, InsightKind::HighFrequency);
    }

    #[test]
    fn insight_display_has_hint() {
        let text = Insight::new(InsightKind::FewTypes).to_string();
        assert!(text.starts_with("Limited commit type variety\n   "));
    }
}
