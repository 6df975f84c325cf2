use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stats::CommitStats;

/// A frequently used commit type, with the most common scope overall.
///
/// The scope is not correlated with the type: every pattern carries the same
/// best-known scope from the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitPattern {
    /// Commit type such as `feat`.
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Most frequent scope in the batch, if any commit had one.
    pub scope: Option<String>,
    /// Commits of this type.
    pub frequency: usize,
}

impl fmt::Display for CommitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.commit_type)?;
        if let Some(scope) = &self.scope {
            write!(f, "({scope})")?;
        }
        write!(f, " - used {} times", self.frequency)
    }
}

/// Entries of a distribution sorted by count descending, key ascending.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use gitai_gitpulse::patterns::ranked;
///
/// let map = BTreeMap::from([("b".to_string(), 2), ("a".to_string(), 2), ("c".to_string(), 5)]);
/// let keys: Vec<&str> = ranked(&map).into_iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, ["c", "a", "b"]);
/// ```
pub fn ranked(map: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = map.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

/// The `n` most frequent commit types.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::analyze_history;
/// use gitai_gitpulse::patterns::top_patterns;
///
/// let lines = [
///     "1|a|feat(api): add list||2024-01-01 10:00:00 +0000",
///     "2|a|feat: add get||2024-01-01 11:00:00 +0000",
///     "3|a|fix(api): off by one||2024-01-02 10:00:00 +0000",
/// ];
/// let stats = analyze_history(lines);
/// let top = top_patterns(&stats, 1);
/// assert_eq!(top[0].to_string(), "feat(api) - used 2 times");
/// ```
pub fn top_patterns(stats: &CommitStats, n: usize) -> Vec<CommitPattern> {
    let scope = ranked(&stats.scope_distribution)
        .first()
        .map(|(name, _)| name.to_string());

    ranked(&stats.type_distribution)
        .into_iter()
        .take(n)
        .map(|(commit_type, frequency)| CommitPattern {
            commit_type: commit_type.to_string(),
            scope: scope.clone(),
            frequency,
        })
        .collect()
}
