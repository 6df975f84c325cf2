use serde::{Deserialize, Serialize};
use tracing::trace;

/// One line of `--numstat` output.
///
/// Binary files report `-` for both counts, which parses to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumstatEntry {
    /// Path as printed, including any `old => new` rename form.
    pub path: String,
    /// Added lines, `None` for binary files.
    pub additions: Option<u32>,
    /// Removed lines, `None` for binary files.
    pub deletions: Option<u32>,
}

impl NumstatEntry {
    /// Whether the counts were reported as `-`.
    pub fn is_binary(&self) -> bool {
        self.additions.is_none() && self.deletions.is_none()
    }
}

/// Parse `<adds>\t<dels>\t<path>` lines. Lines with fewer than three
/// tab-separated fields are skipped; the path field is kept as printed.
///
/// # Examples
///
/// ```
/// use gitai_difflens::numstat::parse_numstat;
///
/// let entries = parse_numstat("10\t2\tsrc/main.rs\n-\t-\tlogo.png\n");
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].additions, Some(10));
/// assert!(entries[1].is_binary());
/// ```
pub fn parse_numstat(text: &str) -> Vec<NumstatEntry> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let mut fields = line.splitn(3, '\t');
        let (Some(adds), Some(dels), Some(path)) = (fields.next(), fields.next(), fields.next())
        else {
            if !line.trim().is_empty() {
                trace!(line, "skipping short numstat line");
            }
            continue;
        };

        entries.push(NumstatEntry {
            path: path.to_string(),
            additions: adds.trim().parse().ok(),
            deletions: dels.trim().parse().ok(),
        });
    }
    entries
}

/// Added and removed lines over all non-binary entries.
///
/// # Examples
///
/// ```
/// use gitai_difflens::numstat::{numstat_totals, parse_numstat};
///
/// let entries = parse_numstat("3\t1\ta.rs\n-\t-\tb.png\n2\t0\tc.rs\n");
/// assert_eq!(numstat_totals(&entries), (5, 1));
/// ```
pub fn numstat_totals(entries: &[NumstatEntry]) -> (u64, u64) {
    entries.iter().fold((0, 0), |(adds, dels), entry| {
        (
            adds + u64::from(entry.additions.unwrap_or(0)),
            dels + u64::from(entry.deletions.unwrap_or(0)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(parse_numstat("").is_empty());
        assert!(parse_numstat("\n\n").is_empty());
    }

    #[test]
    fn counts_and_paths() {
        let entries = parse_numstat("3\t1\tREADME.md\n0\t12\tsrc/old.rs\n");
        assert_eq!(
            entries,
            vec![
                NumstatEntry {
                    path: "README.md".into(),
                    additions: Some(3),
                    deletions: Some(1),
                },
                NumstatEntry {
                    path: "src/old.rs".into(),
                    additions: Some(0),
                    deletions: Some(12),
                },
            ]
        );
    }

    #[test]
    fn binary_files_have_no_counts() {
        let entries = parse_numstat("-\t-\tassets/icon.png");
        assert!(entries[0].is_binary());
        assert!(!parse_numstat("1\t0\ta.rs")[0].is_binary());
    }

    #[test]
    fn short_lines_are_skipped() {
        let entries = parse_numstat("garbage\n4\t4\n1\t1\tok.rs\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "ok.rs");
    }

    #[test]
    fn path_whitespace_is_preserved() {
        let entries = parse_numstat("1\t2\tdocs/my  notes.md\n4\t0\tsrc/a\tb.rs\n");
        assert_eq!(entries[0].path, "docs/my  notes.md");
        assert_eq!(entries[1].path, "src/a\tb.rs");
    }

    #[test]
    fn space_separated_lines_are_not_numstat() {
        assert!(parse_numstat("1 2 a.rs\n").is_empty());
    }

    #[test]
    fn totals_skip_binary_entries() {
        let entries = parse_numstat("-\t-\tlogo.png\n7\t3\tsrc/lib.rs\n");
        assert_eq!(numstat_totals(&entries), (7, 3));
        assert_eq!(numstat_totals(&[]), (0, 0));
    }

    #[test]
    fn rename_paths_are_kept_whole() {
        let entries = parse_numstat("2\t2\tsrc/{a.rs => b.rs}\n");
        assert_eq!(entries[0].path, "src/{a.rs => b.rs}");
    }
}
