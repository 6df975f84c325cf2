//! Unified diff analysis and budgeted smart truncation.
//!
//! Splits a staged diff into per-file blocks, summarises each file (status,
//! line counts, file type, test/config heuristics, key constructs), rates the
//! overall complexity, and renders a byte-budgeted "smart diff" that keeps the
//! most informative hunks when the full diff is too large for a prompt.

pub mod analyzer;
pub mod budget;
pub mod classify;
pub mod complexity;
pub mod engine;
pub mod extract;
pub mod numstat;
pub mod split;
mod util;

pub use analyzer::{FileStatus, FileSummary};
pub use complexity::Complexity;
pub use engine::{analyze_diff, DiffAnalysis, DiffAnalyzer};
