//! Commit history analytics: distributions, trends, and recurring patterns.
//!
//! Consumes pipe-delimited log lines (`hash|author|subject|body|date`) and
//! aggregates them into [`CommitStats`]: commit types and scopes, authors,
//! leading verbs, subject language, hour and weekday activity, and rolling
//! 7/30-day trends. Also ranks the most frequent commit patterns, renders a
//! text report with recommendations, and extracts ticket ids from branch
//! names.

pub mod engine;
pub mod language;
pub mod patterns;
pub mod record;
pub mod report;
pub mod stats;
pub mod ticket;
pub mod trends;

pub use engine::{analyze_history, HistoryAnalyzer};
pub use patterns::CommitPattern;
pub use record::CommitRecord;
pub use stats::CommitStats;
pub use trends::TrendAnalysis;
