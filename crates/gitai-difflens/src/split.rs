use std::sync::OnceLock;

use regex::Regex;

fn file_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?m)^diff --git").expect("valid file marker regex"))
}

/// Split a full diff into per-file blocks, in diff order.
///
/// Every block starting at a `diff --git` line keeps its marker. Text before
/// the first marker is kept as its own block when non-empty, so a bare patch
/// without git headers still yields one block.
///
/// # Examples
///
/// ```
/// use gitai_difflens::split::split_by_file;
///
/// let diff = "diff --git a/a.go b/a.go\n+x\ndiff --git a/b.go b/b.go\n+y\n";
/// let blocks = split_by_file(diff);
/// assert_eq!(blocks.len(), 2);
/// assert!(blocks[1].starts_with("diff --git a/b.go"));
///
/// assert!(split_by_file("").is_empty());
/// ```
pub fn split_by_file(diff: &str) -> Vec<&str> {
    let mut starts: Vec<usize> = file_marker().find_iter(diff).map(|m| m.start()).collect();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }

    let mut blocks = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(diff.len());
        let block = &diff[start..end];
        if i == 0 && block.is_empty() {
            continue;
        }
        blocks.push(block);
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(split_by_file("").is_empty());
    }

    #[test]
    fn two_files_each_keep_marker() {
        let diff = "\
diff --git a/file1.go b/file1.go
index 123..456
--- a/file1.go
+++ b/file1.go
@@ -1 +1 @@
-old content
+new content
diff --git a/file2.go b/file2.go
index 789..abc
--- a/file2.go
+++ b/file2.go
@@ -1 +1 @@
-old content 2
+new content 2";
        let blocks = split_by_file(diff);
        assert_eq!(blocks.len(), 2);
        for block in &blocks {
            assert!(block.starts_with("diff --git"));
        }
        assert!(blocks[0].contains("file1.go"));
        assert!(!blocks[0].contains("file2.go"));
        assert_eq!(blocks.concat(), diff);
    }

    #[test]
    fn preamble_is_kept_as_leading_block() {
        let diff = "From: someone\n\ndiff --git a/x.rs b/x.rs\n+a\n";
        let blocks = split_by_file(diff);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "From: someone\n\n");
    }

    #[test]
    fn marker_only_counts_at_line_start() {
        let diff = "diff --git a/x.md b/x.md\n+see `diff --git` docs\n";
        assert_eq!(split_by_file(diff).len(), 1);
    }

    #[test]
    fn headerless_patch_is_one_block() {
        let diff = "--- a/x.rs\n+++ b/x.rs\n@@ -1 +1 @@\n-a\n+b\n";
        assert_eq!(split_by_file(diff), vec![diff]);
    }
}
