use std::fmt;

use gitai_core::DiffConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::{analyze_file, FileSummary};
use crate::budget::render_smart_diff;
use crate::complexity::{is_large_change, Complexity};
use crate::extract::extract_import_changes;
use crate::split::split_by_file;

/// Aggregate result of analysing one diff.
///
/// `file_summaries` keep the order files appear in the diff. `key_changes`
/// and `import_changes` are concatenated across files without further
/// deduplication.
///
/// # Examples
///
/// ```
/// use gitai_difflens::{analyze_diff, Complexity};
///
/// let analysis = analyze_diff("", 4000);
/// assert_eq!(analysis.modified_files, 0);
/// assert_eq!(analysis.complexity, Complexity::Simple);
/// assert!(analysis.smart_diff.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffAnalysis {
    /// One summary per file block.
    pub file_summaries: Vec<FileSummary>,
    /// Budgeted rendering; the diff itself when it fits.
    pub smart_diff: String,
    /// Sum of per-file additions.
    pub total_additions: usize,
    /// Sum of per-file deletions.
    pub total_deletions: usize,
    /// Number of file summaries.
    pub modified_files: usize,
    /// Key changes from every file, in file order.
    pub key_changes: Vec<String>,
    /// Import lines from every file, in file order.
    pub import_changes: Vec<String>,
    /// Overall rating.
    pub complexity: Complexity,
    /// More than 500 changed lines.
    pub is_large_change: bool,
}

impl DiffAnalysis {
    /// Added plus removed lines across the diff.
    pub fn changed_lines(&self) -> usize {
        self.total_additions + self.total_deletions
    }

    /// Render the analysis as a markdown string.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitai_difflens::analyze_diff;
    ///
    /// let md = analyze_diff("diff --git a/a.rs b/a.rs\n+x\n", 4000).to_markdown();
    /// assert!(md.contains("# Diff Analysis"));
    /// assert!(md.contains("| a.rs |"));
    /// ```
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Diff Analysis\n\n");
        out.push_str(&format!(
            "**Complexity:** {}{}\n\n",
            self.complexity,
            if self.is_large_change {
                " (large change)"
            } else {
                ""
            }
        ));

        if !self.file_summaries.is_empty() {
            out.push_str("| File | Status | Type | +/- | Key changes |\n");
            out.push_str("|------|--------|------|-----|-------------|\n");
            for fs in &self.file_summaries {
                out.push_str(&format!(
                    "| {} | {} | {} | +{}/-{} | {} |\n",
                    fs.path,
                    fs.status.map_or("unknown", |s| s.as_str()),
                    fs.file_type,
                    fs.additions,
                    fs.deletions,
                    fs.key_changes.join(", "),
                ));
            }
            out.push('\n');
        }

        if !self.import_changes.is_empty() {
            out.push_str("## Import changes\n\n");
            for import in &self.import_changes {
                out.push_str(&format!("- `{import}`\n"));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "**Summary:** {} files, +{} additions, -{} deletions\n",
            self.modified_files, self.total_additions, self.total_deletions
        ));
        out
    }
}

impl fmt::Display for DiffAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Diff Analysis")?;
        writeln!(f, "=============")?;
        write!(f, "Complexity: {}", self.complexity)?;
        if self.is_large_change {
            write!(f, " (large change)")?;
        }
        writeln!(f, "\n")?;

        if !self.file_summaries.is_empty() {
            writeln!(
                f,
                "{:<40} {:>9} {:>12} {:>10}",
                "File", "Status", "Type", "+/-"
            )?;
            writeln!(f, "{}", "-".repeat(74))?;
            for fs in &self.file_summaries {
                writeln!(
                    f,
                    "{:<40} {:>9} {:>12} {:>+5}/{:<-4}",
                    fs.path,
                    fs.status.map_or("unknown", |s| s.as_str()),
                    fs.file_type,
                    fs.additions,
                    fs.deletions,
                )?;
                for change in &fs.key_changes {
                    writeln!(f, "    {change}")?;
                }
            }
        }

        if !self.import_changes.is_empty() {
            writeln!(f, "\nImport changes:")?;
            for import in &self.import_changes {
                writeln!(f, "    {import}")?;
            }
        }

        writeln!(
            f,
            "\nSummary: {} files, +{} additions, -{} deletions",
            self.modified_files, self.total_additions, self.total_deletions
        )
    }
}

/// Runs the full diff pipeline with a fixed byte budget.
///
/// # Examples
///
/// ```
/// use gitai_core::DiffConfig;
/// use gitai_difflens::DiffAnalyzer;
///
/// let analyzer = DiffAnalyzer::from_config(&DiffConfig::default());
/// assert_eq!(analyzer.max_length(), 4000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffAnalyzer {
    max_length: usize,
}

impl DiffAnalyzer {
    /// Analyzer with an explicit budget in bytes. Zero is allowed.
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Analyzer using `[diff] max_length`.
    pub fn from_config(config: &DiffConfig) -> Self {
        Self::new(config.max_length)
    }

    /// Byte budget for the smart diff.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Split, summarise, rate and render `diff`.
    pub fn analyze(&self, diff: &str) -> DiffAnalysis {
        if diff.is_empty() {
            return DiffAnalysis::default();
        }

        let blocks = split_by_file(diff);
        let mut file_summaries = Vec::with_capacity(blocks.len());
        let mut key_changes = Vec::new();
        let mut import_changes = Vec::new();
        let mut total_additions = 0;
        let mut total_deletions = 0;

        for block in &blocks {
            let summary = analyze_file(block);
            total_additions += summary.additions;
            total_deletions += summary.deletions;
            key_changes.extend(summary.key_changes.iter().cloned());
            import_changes.extend(extract_import_changes(block));
            file_summaries.push(summary);
        }

        let modified_files = file_summaries.len();
        let changed = total_additions + total_deletions;
        let complexity = Complexity::classify(changed, modified_files);
        let smart_diff = render_smart_diff(
            diff,
            &blocks,
            &file_summaries,
            &import_changes,
            self.max_length,
        );

        debug!(
            files = modified_files,
            additions = total_additions,
            deletions = total_deletions,
            %complexity,
            truncated = smart_diff != diff,
            "analyzed diff"
        );

        DiffAnalysis {
            file_summaries,
            smart_diff,
            total_additions,
            total_deletions,
            modified_files,
            key_changes,
            import_changes,
            complexity,
            is_large_change: is_large_change(changed),
        }
    }
}

/// Analyse `diff` with a smart-diff budget of `max_length` bytes.
///
/// # Examples
///
/// ```
/// use gitai_difflens::{analyze_diff, Complexity};
///
/// let diff = "diff --git a/main.go b/main.go\n\
///             --- a/main.go\n\
///             +++ b/main.go\n\
///             @@ -1,2 +1,3 @@\n\
///             +a\n\
///             +b\n\
///             -c\n";
/// let analysis = analyze_diff(diff, 4000);
/// assert_eq!(analysis.modified_files, 1);
/// assert_eq!((analysis.total_additions, analysis.total_deletions), (2, 1));
/// assert_eq!(analysis.complexity, Complexity::Simple);
/// assert_eq!(analysis.smart_diff, diff);
/// ```
pub fn analyze_diff(diff: &str, max_length: usize) -> DiffAnalysis {
    DiffAnalyzer::new(max_length).analyze(diff)
}
