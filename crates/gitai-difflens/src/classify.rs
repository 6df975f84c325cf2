//! Stateless predicates over single diff lines and file paths.
//!
//! The extension, test-path, and config-path heuristics are plain static
//! tables so they can be inspected and extended without touching the logic.

/// File extension to file-type tag. Anything unlisted maps to `"unknown"`.
pub static FILE_TYPES: &[(&str, &str)] = &[
    ("go", "go"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("java", "java"),
    ("rb", "ruby"),
    ("rs", "rust"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("h", "c"),
    ("hpp", "cpp"),
    ("cs", "csharp"),
    ("php", "php"),
    ("swift", "swift"),
    ("kt", "kotlin"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("json", "json"),
    ("toml", "toml"),
    ("md", "markdown"),
    ("sql", "sql"),
];

/// Lowercase path fragments that mark a test file.
pub static TEST_MARKERS: &[&str] = &[
    "_test.",
    ".test.",
    "/test/",
    "/tests/",
    "__tests__",
    ".spec.",
];

/// Lowercase path fragments that mark a configuration file.
///
/// Matching is by substring, so `.yaml` anywhere in the path counts.
pub static CONFIG_MARKERS: &[&str] = &[
    "package.json",
    "go.mod",
    "go.sum",
    "cargo.toml",
    "requirements.txt",
    "gemfile",
    "pom.xml",
    "build.gradle",
    ".yml",
    ".yaml",
    ".toml",
    ".json",
    ".config",
    ".env",
    "dockerfile",
    "makefile",
    ".gitignore",
    ".dockerignore",
];

/// Tag returned by [`file_type`] for unmapped extensions.
pub const UNKNOWN_FILE_TYPE: &str = "unknown";

/// `true` for the `diff --git` line that opens a per-file block.
pub fn is_file_header(line: &str) -> bool {
    line.starts_with("diff --git")
}

/// `true` for an `@@ ... @@` hunk header.
pub fn is_hunk_header(line: &str) -> bool {
    line.starts_with("@@")
}

/// `true` for an added line, excluding the `+++` file header.
///
/// # Examples
///
/// ```
/// use gitai_difflens::classify::is_addition;
///
/// assert!(is_addition("+let x = 1;"));
/// assert!(!is_addition("+++ b/src/lib.rs"));
/// assert!(!is_addition(" context"));
/// ```
pub fn is_addition(line: &str) -> bool {
    line.starts_with('+') && !line.starts_with("+++")
}

/// `true` for a removed line, excluding the `---` file header.
pub fn is_deletion(line: &str) -> bool {
    line.starts_with('-') && !line.starts_with("---")
}

/// `true` for any line that is neither an addition nor a removal marker.
pub(crate) fn is_context(line: &str) -> bool {
    !line.starts_with('+') && !line.starts_with('-')
}

/// The trimmed content of an added line, or `None` for anything else.
///
/// # Examples
///
/// ```
/// use gitai_difflens::classify::added_content;
///
/// assert_eq!(added_content("+    fn main() {"), Some("fn main() {"));
/// assert_eq!(added_content("-removed"), None);
/// ```
pub fn added_content(line: &str) -> Option<&str> {
    if is_addition(line) {
        Some(line[1..].trim())
    } else {
        None
    }
}

/// Map a path to its file-type tag using the lowercased extension.
///
/// # Examples
///
/// ```
/// use gitai_difflens::classify::file_type;
///
/// assert_eq!(file_type("src/main.go"), "go");
/// assert_eq!(file_type("web/App.TSX"), "typescript");
/// assert_eq!(file_type("Makefile"), "unknown");
/// ```
pub fn file_type(path: &str) -> &'static str {
    let name = path.rsplit('/').next().unwrap_or(path);
    let Some((_, ext)) = name.rsplit_once('.') else {
        return UNKNOWN_FILE_TYPE;
    };
    let ext = ext.to_lowercase();
    FILE_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map_or(UNKNOWN_FILE_TYPE, |(_, tag)| *tag)
}

/// Whether the path looks like a test file.
///
/// # Examples
///
/// ```
/// use gitai_difflens::classify::is_test_file;
///
/// assert!(is_test_file("pkg/auth_test.go"));
/// assert!(is_test_file("src/__tests__/app.js"));
/// assert!(!is_test_file("src/auth.js"));
/// ```
pub fn is_test_file(path: &str) -> bool {
    let lower = path.to_lowercase();
    TEST_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Whether the path looks like a configuration or build file.
///
/// # Examples
///
/// ```
/// use gitai_difflens::classify::is_config_file;
///
/// assert!(is_config_file("Dockerfile"));
/// assert!(is_config_file("deploy/values.yaml"));
/// assert!(!is_config_file("main.go"));
/// ```
pub fn is_config_file(path: &str) -> bool {
    let lower = path.to_lowercase();
    CONFIG_MARKERS.iter().any(|marker| lower.contains(marker))
}
