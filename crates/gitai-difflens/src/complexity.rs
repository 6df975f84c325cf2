use std::fmt;

use serde::{Deserialize, Serialize};

/// Changed-line total above which a diff is complex and a large change.
pub const COMPLEX_LINES: usize = 500;
/// File count above which a diff is complex.
pub const COMPLEX_FILES: usize = 10;
/// Changed-line total above which a diff is at least moderate.
pub const MODERATE_LINES: usize = 100;
/// File count above which a diff is at least moderate.
pub const MODERATE_FILES: usize = 3;

/// Three-level rating of how much a diff touches.
///
/// # Examples
///
/// ```
/// use gitai_difflens::Complexity;
///
/// assert_eq!(Complexity::classify(15, 1), Complexity::Simple);
/// assert_eq!(Complexity::classify(200, 2), Complexity::Moderate);
/// assert_eq!(Complexity::classify(20, 12), Complexity::Complex);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// At most 100 changed lines across at most 3 files.
    #[default]
    Simple,
    /// Over 100 lines or over 3 files.
    Moderate,
    /// Over 500 lines or over 10 files.
    Complex,
}

impl Complexity {
    /// Rate a diff from its changed-line total and file count.
    pub fn classify(changed_lines: usize, files: usize) -> Self {
        if changed_lines > COMPLEX_LINES || files > COMPLEX_FILES {
            Complexity::Complex
        } else if changed_lines > MODERATE_LINES || files > MODERATE_FILES {
            Complexity::Moderate
        } else {
            Complexity::Simple
        }
    }

    /// Lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the changed-line total marks a large change, regardless of file count.
///
/// # Examples
///
/// ```
/// use gitai_difflens::complexity::is_large_change;
///
/// assert!(!is_large_change(500));
/// assert!(is_large_change(501));
/// ```
pub fn is_large_change(changed_lines: usize) -> bool {
    changed_lines > COMPLEX_LINES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        assert_eq!(Complexity::classify(10 + 5, 1), Complexity::Simple);
        assert_eq!(Complexity::classify(150 + 50, 5), Complexity::Moderate);
        assert_eq!(Complexity::classify(600 + 400, 12), Complexity::Complex);
        assert_eq!(Complexity::classify(50 + 50, 15), Complexity::Complex);
    }

    #[test]
    fn boundaries_are_exclusive() {
        assert_eq!(Complexity::classify(100, 3), Complexity::Simple);
        assert_eq!(Complexity::classify(101, 3), Complexity::Moderate);
        assert_eq!(Complexity::classify(100, 4), Complexity::Moderate);
        assert_eq!(Complexity::classify(500, 10), Complexity::Moderate);
        assert_eq!(Complexity::classify(501, 0), Complexity::Complex);
        assert_eq!(Complexity::classify(0, 11), Complexity::Complex);
    }

    #[test]
    fn monotonic_in_changed_lines() {
        for files in 0..=12 {
            let mut previous = Complexity::Simple;
            for lines in 0..=700 {
                let current = Complexity::classify(lines, files);
                assert!(current >= previous, "{lines} lines, {files} files went backwards");
                previous = current;
            }
        }
    }

    #[test]
    fn large_change_ignores_file_count() {
        assert!(!is_large_change(0));
        assert!(!is_large_change(COMPLEX_LINES));
        assert!(is_large_change(COMPLEX_LINES + 1));
    }

    #[test]
    fn display_matches_serde() {
        assert_eq!(Complexity::Moderate.to_string(), "moderate");
        assert_eq!(
            serde_json::to_string(&Complexity::Complex).unwrap(),
            "\"complex\""
        );
    }
}
