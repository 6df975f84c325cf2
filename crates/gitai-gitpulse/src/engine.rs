use chrono::{DateTime, Utc};
use gitai_core::StatsConfig;
use tracing::{debug, trace};

use crate::patterns::{top_patterns, CommitPattern};
use crate::record::parse_record;
use crate::stats::{CommitStats, StatsAggregator};

/// Runs the commit history pipeline against a fixed reference time.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use gitai_core::StatsConfig;
/// use gitai_gitpulse::HistoryAnalyzer;
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
/// let analyzer = HistoryAnalyzer::from_config(&StatsConfig::default(), now);
/// let stats = analyzer.analyze(["h1|alice|feat: add x||2024-01-01 10:00:00 +0000"]);
///
/// assert_eq!(stats.total_commits, 1);
/// assert_eq!(stats.recent_trends.as_ref().unwrap().last_7_days, 1);
/// assert_eq!(analyzer.patterns(&stats)[0].commit_type, "feat");
/// ```
#[derive(Debug, Clone)]
pub struct HistoryAnalyzer {
    now: DateTime<Utc>,
    limit: Option<usize>,
    top_patterns: usize,
}

impl HistoryAnalyzer {
    /// Analyzer with no commit limit and three ranked patterns.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            limit: None,
            top_patterns: StatsConfig::default().top_patterns,
        }
    }

    /// Analyzer using `[stats] limit` and `top_patterns`.
    pub fn from_config(config: &StatsConfig, now: DateTime<Utc>) -> Self {
        Self {
            now,
            limit: Some(config.limit),
            top_patterns: config.top_patterns,
        }
    }

    /// Stop after this many parsed commits.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of patterns [`HistoryAnalyzer::patterns`] returns.
    pub fn with_top_patterns(mut self, n: usize) -> Self {
        self.top_patterns = n;
        self
    }

    /// Parse and aggregate log lines. Lines with too few fields are skipped
    /// and do not count as commits.
    pub fn analyze<I>(&self, lines: I) -> CommitStats
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let limit = self.limit.unwrap_or(usize::MAX);
        let mut aggregator = StatsAggregator::default();
        let mut parsed = 0;
        let mut skipped = 0;

        for line in lines {
            if parsed >= limit {
                break;
            }
            let line = line.as_ref();
            match parse_record(line) {
                Some(record) => {
                    aggregator.add(&record);
                    parsed += 1;
                }
                None => {
                    if !line.trim().is_empty() {
                        trace!(line, "skipping log line with too few fields");
                    }
                    skipped += 1;
                }
            }
        }

        let stats = aggregator.finish(self.now);
        debug!(
            commits = stats.total_commits,
            skipped,
            types = stats.type_distribution.len(),
            dated = stats.recent_trends.is_some(),
            "analyzed commit history"
        );
        stats
    }

    /// The configured number of top commit patterns.
    pub fn patterns(&self, stats: &CommitStats) -> Vec<CommitPattern> {
        top_patterns(stats, self.top_patterns)
    }
}

/// Aggregate log lines with trends measured from the current time.
pub fn analyze_history<I>(lines: I) -> CommitStats
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    HistoryAnalyzer::new(Utc::now()).analyze(lines)
}
