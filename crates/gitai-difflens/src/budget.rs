//! Byte-budgeted rendering of diffs that are too large to pass through whole.
//!
//! The budget is soft: each file is offered a share of what is left, but a
//! hunk that starts inside its share is finished even if it overruns. The
//! header and per-file summary lines are always emitted.

use std::cmp::Reverse;

use tracing::debug;

use crate::analyzer::FileSummary;
use crate::classify::{is_context, is_hunk_header};

/// The walk over files stops once less than this many bytes remain.
pub const MIN_REMAINING: i64 = 500;

/// Consecutive unchanged lines kept per run inside a hunk.
const MAX_CONTEXT_RUN: usize = 3;

/// Header lines are only looked for this far into a file block.
const HEADER_SCAN_LINES: usize = 10;

const RULE_WIDTH: usize = 60;

/// Render `full_diff` within roughly `max_length` bytes.
///
/// `blocks` and `summaries` must be parallel: `summaries[i]` describes
/// `blocks[i]`. Returns the diff unchanged when it already fits.
///
/// # Examples
///
/// ```
/// use gitai_difflens::analyzer::analyze_file;
/// use gitai_difflens::budget::render_smart_diff;
/// use gitai_difflens::split::split_by_file;
///
/// let diff = "diff --git a/a.go b/a.go\n--- a/a.go\n+++ b/a.go\n@@ -1 +1 @@\n-x\n+y\n";
/// let blocks = split_by_file(diff);
/// let summaries: Vec<_> = blocks.iter().map(|b| analyze_file(b)).collect();
///
/// assert_eq!(render_smart_diff(diff, &blocks, &summaries, &[], 10_000), diff);
///
/// let smart = render_smart_diff(diff, &blocks, &summaries, &[], 10);
/// assert!(smart.starts_with("DIFF SUMMARY (1 files, +1/-1 lines)"));
/// ```
pub fn render_smart_diff(
    full_diff: &str,
    blocks: &[&str],
    summaries: &[FileSummary],
    import_changes: &[String],
    max_length: usize,
) -> String {
    if full_diff.len() <= max_length {
        return full_diff.to_string();
    }

    let total_additions: usize = summaries.iter().map(|s| s.additions).sum();
    let total_deletions: usize = summaries.iter().map(|s| s.deletions).sum();

    let mut out = String::new();
    out.push_str(&format!(
        "DIFF SUMMARY ({} files, +{}/-{} lines)\n",
        summaries.len(),
        total_additions,
        total_deletions
    ));
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    for summary in summaries {
        out.push_str(&format!(
            "* {} [{}] +{}/-{}\n",
            summary.path,
            summary.status.map_or("unknown", |s| s.as_str()),
            summary.additions,
            summary.deletions
        ));
        if !summary.key_changes.is_empty() {
            out.push_str(&format!(
                "   Key changes: {}\n",
                summary.key_changes.join(", ")
            ));
        }
    }
    out.push('\n');

    if !import_changes.is_empty() {
        out.push_str("Import changes:\n");
        for import in import_changes {
            out.push_str(&format!("   {import}\n"));
        }
        out.push('\n');
    }

    let mut remaining = max_length as i64 - out.len() as i64;
    out.push_str("SELECTED DIFF CHUNKS:\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    let order = priority_order(summaries);
    let file_count = order.len();
    let mut included = 0;
    for (visited, &idx) in order.iter().enumerate() {
        let Some(block) = blocks.get(idx) else {
            continue;
        };
        let share = remaining / (file_count - visited).max(1) as i64;
        let chunk = extract_important_chunks(block, share);
        if !chunk.is_empty() {
            out.push_str(&chunk);
            out.push('\n');
            remaining -= chunk.len() as i64;
            included += 1;
        }
        if remaining < MIN_REMAINING {
            break;
        }
    }

    debug!(
        full_len = full_diff.len(),
        max_length,
        files = file_count,
        included,
        "rendered smart diff"
    );

    out.push_str(&format!(
        "\n... (diff truncated: {}/{} chars shown)\n",
        out.len(),
        full_diff.len()
    ));
    out
}

/// Indices of `summaries` in visiting order: source before tests, code
/// before config, then larger changes first. Ties keep diff order.
///
/// # Examples
///
/// ```
/// use gitai_difflens::analyzer::analyze_file;
/// use gitai_difflens::budget::priority_order;
///
/// let summaries = vec![
///     analyze_file("diff --git a/a_test.go b/a_test.go\n+x\n"),
///     analyze_file("diff --git a/go.mod b/go.mod\n+x\n"),
///     analyze_file("diff --git a/a.go b/a.go\n+x\n"),
/// ];
/// assert_eq!(priority_order(&summaries), vec![2, 1, 0]);
/// ```
pub fn priority_order(summaries: &[FileSummary]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..summaries.len()).collect();
    order.sort_by_key(|&i| {
        let s = &summaries[i];
        (s.is_test_file, s.is_config_file, Reverse(s.changed_lines()))
    });
    order
}

/// File header lines plus hunks with long unchanged runs dropped, stopping
/// once the output passes `max_chunk_length`.
///
/// # Examples
///
/// ```
/// use gitai_difflens::budget::extract_important_chunks;
///
/// let block = "diff --git a/a.rs b/a.rs\n--- a/a.rs\n+++ b/a.rs\n@@ -1,6 +1,6 @@\n 1\n 2\n 3\n 4\n 5\n-x\n+y\n";
/// let chunk = extract_important_chunks(block, 1_000);
/// assert!(chunk.contains(" 3\n-x"));
/// assert!(!chunk.contains(" 4"));
/// ```
pub fn extract_important_chunks(file_diff: &str, max_chunk_length: i64) -> String {
    let lines: Vec<&str> = file_diff.lines().collect();
    let mut out = String::new();

    for line in lines.iter().take(HEADER_SCAN_LINES) {
        if is_block_header(line) {
            out.push_str(line);
            out.push('\n');
        }
    }

    let mut hunk: Vec<&str> = Vec::new();
    let mut hunk_len = 0;
    let mut in_hunk = false;
    let mut context_run = 0;

    for &line in &lines {
        if is_hunk_header(line) {
            flush_hunk(&mut out, &mut hunk, &mut hunk_len);
            hunk.push(line);
            hunk_len = line.len();
            in_hunk = true;
            context_run = 0;
            continue;
        }

        if !in_hunk {
            continue;
        }

        if is_context(line) {
            context_run += 1;
            if context_run > MAX_CONTEXT_RUN {
                continue;
            }
        } else {
            context_run = 0;
        }

        hunk_len += line.len() + 1;
        hunk.push(line);

        if (out.len() + hunk_len) as i64 > max_chunk_length {
            break;
        }
    }

    if !hunk.is_empty() && (out.len() as i64) < max_chunk_length {
        flush_hunk(&mut out, &mut hunk, &mut hunk_len);
    }

    out
}

fn is_block_header(line: &str) -> bool {
    line.starts_with("diff ")
        || line.starts_with("index ")
        || line.starts_with("---")
        || line.starts_with("+++")
}

fn flush_hunk(out: &mut String, hunk: &mut Vec<&str>, hunk_len: &mut usize) {
    if hunk.is_empty() {
        return;
    }
    out.push_str(&hunk.join("\n"));
    out.push('\n');
    hunk.clear();
    *hunk_len = 0;
}
