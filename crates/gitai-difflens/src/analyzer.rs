use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{
    file_type, is_addition, is_config_file, is_deletion, is_file_header, is_hunk_header,
    is_test_file,
};
use crate::extract::extract_key_changes;

/// How a file changed, read from the block's header markers.
///
/// # Examples
///
/// ```
/// use gitai_difflens::FileStatus;
///
/// assert_eq!(FileStatus::Renamed.to_string(), "renamed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// `new file mode` header.
    Added,
    /// `deleted file mode` header.
    Deleted,
    /// `rename from` header.
    Renamed,
    /// Only `---`/`+++` headers.
    Modified,
}

impl FileStatus {
    /// Lowercase label used in summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed => "renamed",
            FileStatus::Modified => "modified",
        }
    }

    fn from_header(line: &str) -> Option<Self> {
        if line.starts_with("new file") {
            Some(FileStatus::Added)
        } else if line.starts_with("deleted file") {
            Some(FileStatus::Deleted)
        } else if line.starts_with("rename from") {
            Some(FileStatus::Renamed)
        } else if line.starts_with("+++") || line.starts_with("---") {
            Some(FileStatus::Modified)
        } else {
            None
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change summary for a single file in a diff.
///
/// # Examples
///
/// ```
/// use gitai_difflens::analyzer::analyze_file;
/// use gitai_difflens::FileStatus;
///
/// let block = "diff --git a/pkg/auth.go b/pkg/auth.go\n\
///              --- a/pkg/auth.go\n\
///              +++ b/pkg/auth.go\n\
///              @@ -1,2 +1,3 @@\n\
///              +func Login() error {\n\
///              -// old\n";
/// let summary = analyze_file(block);
/// assert_eq!(summary.path, "pkg/auth.go");
/// assert_eq!(summary.status, Some(FileStatus::Modified));
/// assert_eq!((summary.additions, summary.deletions), (1, 1));
/// assert_eq!(summary.key_changes, vec!["function Login"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// Path in the new version; empty when the block has no `diff --git` line.
    pub path: String,
    /// Change status; `None` when the block carries no status markers.
    pub status: Option<FileStatus>,
    /// Added lines, excluding the `+++` header.
    pub additions: usize,
    /// Removed lines, excluding the `---` header.
    pub deletions: usize,
    /// File-type tag derived from the extension.
    pub file_type: String,
    /// Path matched a test-file marker.
    pub is_test_file: bool,
    /// Path matched a config-file marker.
    pub is_config_file: bool,
    /// Up to five declarations added in this file, first-seen order.
    pub key_changes: Vec<String>,
}

impl FileSummary {
    /// Added plus removed lines.
    pub fn changed_lines(&self) -> usize {
        self.additions + self.deletions
    }
}

/// Summarise one per-file block produced by [`crate::split::split_by_file`].
///
/// Never fails: a block missing the expected markers yields an empty path
/// and no status.
pub fn analyze_file(file_diff: &str) -> FileSummary {
    let mut path = String::new();
    let mut new_side = None;
    let mut in_hunk = false;
    let mut status = None;
    let mut additions = 0;
    let mut deletions = 0;

    for line in file_diff.lines() {
        if is_file_header(line) {
            if path.is_empty() {
                path = header_path(line).unwrap_or_default();
            }
        } else {
            if status.is_none() {
                status = FileStatus::from_header(line);
            }
            if is_hunk_header(line) {
                in_hunk = true;
            } else if !in_hunk && new_side.is_none() {
                new_side = plus_path(line);
            }
        }

        if is_addition(line) {
            additions += 1;
        } else if is_deletion(line) {
            deletions += 1;
        }
    }

    if let Some(new_side) = new_side {
        path = new_side;
    }

    let file_type = file_type(&path);
    FileSummary {
        is_test_file: is_test_file(&path),
        is_config_file: is_config_file(&path),
        key_changes: extract_key_changes(file_diff, file_type),
        file_type: file_type.to_string(),
        path,
        status,
        additions,
        deletions,
    }
}

/// New-side path from the `+++ b/<path>` line; `None` for `/dev/null`.
fn plus_path(line: &str) -> Option<String> {
    let rest = line.strip_prefix("+++ ")?.trim_end_matches(['\t', '\r']);
    if let Some(quoted) = rest.strip_prefix("\"b/") {
        return Some(quoted.trim_end_matches('"').to_string());
    }
    rest.strip_prefix("b/").map(str::to_string)
}

/// New-side path from `diff --git a/<old> b/<new>`, quoted or not.
///
/// When old and new sides are the same path the header is split in half, so a
/// path containing ` b/` survives. For renames the last ` b/` wins, which can
/// cut such a path short; the `+++` line overrides it when present.
fn header_path(line: &str) -> Option<String> {
    let rest = line.strip_prefix("diff --git ")?.trim_end();
    if let Some(same) = same_side_path(rest) {
        return Some(same.to_string());
    }
    if let Some(idx) = rest.rfind(" \"b/") {
        return Some(rest[idx + 4..].trim_end_matches('"').to_string());
    }
    if let Some(idx) = rest.rfind(" b/") {
        return Some(rest[idx + 3..].to_string());
    }
    rest.split_whitespace().nth(1).map(str::to_string)
}

fn same_side_path(rest: &str) -> Option<&str> {
    let body = rest.strip_prefix("a/")?;
    let half = body.len().checked_sub(3)? / 2;
    let (old, new) = (body.get(..half)?, body.get(half..)?);
    (new.strip_prefix(" b/")? == old).then_some(old)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modified_file() {
        let block = "\
diff --git a/main.go b/main.go
index 123..456 100644
--- a/main.go
+++ b/main.go
@@ -1,5 +1,7 @@
 package main

+import \"fmt\"
+
 func main() {
-	println(\"hello\")
+	fmt.Println(\"hello world\")
 }";
        let summary = analyze_file(block);
        assert_eq!(summary.path, "main.go");
        assert_eq!(summary.status, Some(FileStatus::Modified));
        assert_eq!(summary.additions, 3);
        assert_eq!(summary.deletions, 1);
        assert_eq!(summary.file_type, "go");
        assert!(!summary.is_test_file);
        assert!(!summary.is_config_file);
    }

    #[test]
    fn new_file() {
        let block = "\
diff --git a/src/new.py b/src/new.py
new file mode 100644
--- /dev/null
+++ b/src/new.py
@@ -0,0 +1,2 @@
+class Greeter:
+    def hello(self):
";
        let summary = analyze_file(block);
        assert_eq!(summary.status, Some(FileStatus::Added));
        assert_eq!(summary.additions, 2);
        assert_eq!(summary.deletions, 0);
        assert_eq!(summary.key_changes, vec!["class Greeter", "function hello"]);
    }

    #[test]
    fn deleted_file() {
        let block = "\
diff --git a/old.rs b/old.rs
deleted file mode 100644
--- a/old.rs
+++ /dev/null
@@ -1,2 +0,0 @@
-fn goodbye() {
-}
";
        let summary = analyze_file(block);
        assert_eq!(summary.status, Some(FileStatus::Deleted));
        assert_eq!(summary.deletions, 2);
        assert!(summary.key_changes.is_empty());
    }

    #[test]
    fn renamed_file_without_content() {
        let block = "\
diff --git a/old_name.rs b/new_name.rs
similarity index 100%
rename from old_name.rs
rename to new_name.rs
";
        let summary = analyze_file(block);
        assert_eq!(summary.path, "new_name.rs");
        assert_eq!(summary.status, Some(FileStatus::Renamed));
        assert_eq!(summary.changed_lines(), 0);
    }

    #[test]
    fn first_status_marker_wins() {
        let block = "\
diff --git a/a.txt b/b.txt
rename from a.txt
rename to b.txt
--- a/a.txt
+++ b/b.txt
@@ -1 +1 @@
-x
+y
";
        assert_eq!(analyze_file(block).status, Some(FileStatus::Renamed));
    }

    #[test]
    fn quoted_paths_are_unquoted() {
        let block = "diff --git \"a/my file.rs\" \"b/my file.rs\"\n";
        assert_eq!(analyze_file(block).path, "my file.rs");
    }

    #[test]
    fn paths_with_spaces_use_new_side() {
        let block = "diff --git a/docs/release notes.md b/docs/release notes.md\n";
        let summary = analyze_file(block);
        assert_eq!(summary.path, "docs/release notes.md");
        assert_eq!(summary.file_type, "markdown");
    }

    #[test]
    fn path_containing_b_slash() {
        let block = "diff --git a/plan b/x.md b/plan b/x.md\n";
        assert_eq!(analyze_file(block).path, "plan b/x.md");
    }

    #[test]
    fn plus_line_overrides_header_for_renames() {
        let block = "\
diff --git a/old b/x.md b/new b/x.md
similarity index 90%
rename from old b/x.md
rename to new b/x.md
--- a/old b/x.md
+++ b/new b/x.md
@@ -1 +1 @@
-a
+b
";
        let summary = analyze_file(block);
        assert_eq!(summary.path, "new b/x.md");
        assert_eq!(summary.status, Some(FileStatus::Renamed));
        assert_eq!((summary.additions, summary.deletions), (1, 1));
    }

    #[test]
    fn plus_line_with_trailing_tab() {
        let block = "diff --git a/my notes.md b/my notes.md\n--- a/my notes.md\t\n+++ b/my notes.md\t\n";
        assert_eq!(analyze_file(block).path, "my notes.md");
    }

    #[test]
    fn deleted_file_keeps_header_path() {
        let block = "diff --git a/gone.rs b/gone.rs\ndeleted file mode 100644\n--- a/gone.rs\n+++ /dev/null\n";
        assert_eq!(analyze_file(block).path, "gone.rs");
    }

    #[test]
    fn test_and_config_flags() {
        let test = analyze_file("diff --git a/pkg/auth_test.go b/pkg/auth_test.go\n");
        assert!(test.is_test_file);
        let config = analyze_file("diff --git a/Cargo.toml b/Cargo.toml\n");
        assert!(config.is_config_file);
        assert_eq!(config.file_type, "toml");
    }

    #[test]
    fn malformed_block_degrades_to_empty_fields() {
        let summary = analyze_file("just some text\n+with an added line\n");
        assert_eq!(summary.path, "");
        assert_eq!(summary.status, None);
        assert_eq!(summary.additions, 1);
        assert_eq!(summary.file_type, "unknown");
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = analyze_file("diff --git a/a.go b/a.go\n--- a/a.go\n+++ b/a.go\n");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "modified");
        assert_eq!(json["fileType"], "go");
        assert_eq!(json["isTestFile"], false);
        assert!(json["keyChanges"].is_array());
    }
}
