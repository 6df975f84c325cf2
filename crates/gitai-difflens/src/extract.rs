//! Best-effort extraction of declarations and imports from added lines.
//!
//! Patterns are anchored token matches, not a parser: they pick up the common
//! shapes of function, class, and type declarations per language and ignore
//! everything else.

use std::sync::OnceLock;

use regex::Regex;

use crate::classify::added_content;
use crate::util::{truncate_chars, unique_strings};

/// Maximum key changes kept per file.
pub const MAX_KEY_CHANGES: usize = 5;

/// Generic matches are only reported for lines shorter than this.
const GENERIC_LINE_LIMIT: usize = 100;
const GENERIC_SNIPPET_CHARS: usize = 50;
const IMPORT_SNIPPET_CHARS: usize = 60;

/// Words that look like `name(args) {` in JavaScript but are not methods.
const JS_CONTROL_WORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "function", "with",
];

struct Patterns {
    go_func: Regex,
    go_type: Regex,
    js_function: Regex,
    js_arrow: Regex,
    js_method: Regex,
    js_class: Regex,
    py_def: Regex,
    py_class: Regex,
    generic_call: Regex,
    imports: Vec<Regex>,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        go_func: Regex::new(r"^func\s+(?:\([^)]*\)\s*)?([A-Za-z_]\w*)\s*[\[(]").unwrap(),
        go_type: Regex::new(r"^type\s+(\w+)\s+(?:struct|interface)\b").unwrap(),
        js_function: Regex::new(
            r"^(?:export\s+)?(?:default\s+)?(?:async\s+)?function\b\s*\*?\s*(\w+)",
        )
        .unwrap(),
        js_arrow: Regex::new(r"^(?:export\s+)?const\s+(\w+)\s*=\s*(?:async\s+)?\(").unwrap(),
        js_method: Regex::new(r"^(?:async\s+)?(\w+)\s*\([^)]*\)\s*\{").unwrap(),
        js_class: Regex::new(r"^(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+(\w+)")
            .unwrap(),
        py_def: Regex::new(r"^(?:async\s+)?def\s+(\w+)").unwrap(),
        py_class: Regex::new(r"^class\s+(\w+)").unwrap(),
        generic_call: Regex::new(r"\w+\s*\([^)]*\)").unwrap(),
        imports: vec![
            Regex::new(r"^import\s+").unwrap(),
            Regex::new(r"^import\(").unwrap(),
            Regex::new(r"^from\s+\S+\s+import\b").unwrap(),
            Regex::new(r"^(?:export\s+)?\*?\s*\{[^}]*\}\s+from\s+").unwrap(),
            Regex::new(r"^require\(").unwrap(),
            Regex::new(r"^(?:const|let|var)\s+[\w{}\s,:]+=\s*require\(").unwrap(),
            Regex::new(r"^use\s+").unwrap(),
        ],
    })
}

fn capture_name(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extraction strategy, selected by a file's type tag.
///
/// # Examples
///
/// ```
/// use gitai_difflens::extract::ConstructStrategy;
///
/// let strategy = ConstructStrategy::for_file_type("python");
/// assert_eq!(strategy, ConstructStrategy::Python);
/// assert_eq!(strategy.extract("def login(user):"), vec!["function login"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructStrategy {
    /// `func` and `type ... struct|interface` declarations.
    Go,
    /// JavaScript and TypeScript functions, arrow constants, methods, classes.
    Script,
    /// `def` and `class` declarations.
    Python,
    /// Any call-like line, reported as a short raw snippet.
    Generic,
}

impl ConstructStrategy {
    /// Pick the strategy for a file-type tag from [`crate::classify::file_type`].
    pub fn for_file_type(file_type: &str) -> Self {
        match file_type {
            "go" => ConstructStrategy::Go,
            "javascript" | "typescript" => ConstructStrategy::Script,
            "python" => ConstructStrategy::Python,
            _ => ConstructStrategy::Generic,
        }
    }

    /// Describe the constructs declared on one trimmed source line.
    pub fn extract(self, line: &str) -> Vec<String> {
        let p = patterns();
        let mut found = Vec::new();
        match self {
            ConstructStrategy::Go => {
                if let Some(name) = capture_name(&p.go_func, line) {
                    found.push(format!("function {name}"));
                }
                if let Some(name) = capture_name(&p.go_type, line) {
                    found.push(format!("type {name}"));
                }
            }
            ConstructStrategy::Script => {
                let function = capture_name(&p.js_function, line)
                    .or_else(|| capture_name(&p.js_arrow, line))
                    .or_else(|| {
                        capture_name(&p.js_method, line)
                            .filter(|name| !JS_CONTROL_WORDS.contains(&name.as_str()))
                    });
                if let Some(name) = function {
                    found.push(format!("function {name}"));
                }
                if let Some(name) = capture_name(&p.js_class, line) {
                    found.push(format!("class {name}"));
                }
            }
            ConstructStrategy::Python => {
                if let Some(name) = capture_name(&p.py_def, line) {
                    found.push(format!("function {name}"));
                }
                if let Some(name) = capture_name(&p.py_class, line) {
                    found.push(format!("class {name}"));
                }
            }
            ConstructStrategy::Generic => {
                if line.chars().count() < GENERIC_LINE_LIMIT && p.generic_call.is_match(line) {
                    found.push(format!(
                        "function: {}",
                        truncate_chars(line, GENERIC_SNIPPET_CHARS)
                    ));
                }
            }
        }
        found
    }
}

/// Key constructs added in one file block, deduplicated and capped at
/// [`MAX_KEY_CHANGES`] in first-seen order.
///
/// # Examples
///
/// ```
/// use gitai_difflens::extract::extract_key_changes;
///
/// let block = "+++ b/auth.go\n+func NewAuth() *Auth {\n+type Auth struct {\n";
/// assert_eq!(
///     extract_key_changes(block, "go"),
///     vec!["function NewAuth", "type Auth"],
/// );
/// ```
pub fn extract_key_changes(file_diff: &str, file_type: &str) -> Vec<String> {
    let strategy = ConstructStrategy::for_file_type(file_type);
    let found = file_diff
        .lines()
        .filter_map(added_content)
        .flat_map(|line| strategy.extract(line))
        .collect();

    let mut changes = unique_strings(found);
    changes.truncate(MAX_KEY_CHANGES);
    changes
}

/// Import and dependency lines added in one file block, verbatim up to 60
/// characters and deduplicated.
///
/// # Examples
///
/// ```
/// use gitai_difflens::extract::extract_import_changes;
///
/// let block = "+import \"fmt\"\n+import \"fmt\"\n+from os import path\n-import \"log\"\n";
/// assert_eq!(
///     extract_import_changes(block),
///     vec!["import \"fmt\"", "from os import path"],
/// );
/// ```
pub fn extract_import_changes(file_diff: &str) -> Vec<String> {
    let imports = &patterns().imports;
    let found = file_diff
        .lines()
        .filter_map(added_content)
        .filter(|line| imports.iter().any(|re| re.is_match(line)))
        .map(|line| truncate_chars(line, IMPORT_SNIPPET_CHARS))
        .collect();
    unique_strings(found)
}
