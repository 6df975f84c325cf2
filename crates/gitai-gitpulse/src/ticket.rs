//! Ticket ids from branch names, e.g. `feature/PROJ-123-login` -> `PROJ-123`.

use std::sync::OnceLock;

use gitai_core::{GitaiError, TicketConfig};
use regex::Regex;

/// Built-in ticket shapes, tried in order.
const DEFAULT_PATTERNS: &[&str] = &[
    r"[A-Z]+-\d+",
    r"[A-Z]{2,}-\d+",
    r"#\d+",
    r"GH-\d+",
    r"[A-Z]+_\d+",
];

fn default_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        DEFAULT_PATTERNS
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect()
    })
}

fn digits_only() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}

/// First ticket id in `branch`, trying `custom` before the built-in shapes.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::ticket::extract_ticket_from_branch;
///
/// assert_eq!(extract_ticket_from_branch("feature/PROJ-123-login", None).as_deref(), Some("PROJ-123"));
/// assert_eq!(extract_ticket_from_branch("fix/#42-crash", None).as_deref(), Some("#42"));
/// assert_eq!(extract_ticket_from_branch("main", None), None);
/// ```
pub fn extract_ticket_from_branch(branch: &str, custom: Option<&Regex>) -> Option<String> {
    if branch.is_empty() {
        return None;
    }
    custom
        .into_iter()
        .chain(default_patterns())
        .find_map(|re| re.find(branch))
        .map(|m| m.as_str().to_string())
}

/// Normalise a ticket id, joining `prefix` onto a bare number.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::ticket::format_ticket_number;
///
/// assert_eq!(format_ticket_number(" 123 ", Some("PROJ")).as_deref(), Some("PROJ-123"));
/// assert_eq!(format_ticket_number("PROJ-9", Some("X")).as_deref(), Some("PROJ-9"));
/// assert_eq!(format_ticket_number("", Some("X")), None);
/// ```
pub fn format_ticket_number(ticket: &str, prefix: Option<&str>) -> Option<String> {
    let ticket = ticket.trim();
    if ticket.is_empty() {
        return None;
    }
    if ticket.contains('-') || ticket.contains('#') {
        return Some(ticket.to_string());
    }
    match prefix {
        Some(prefix) if !prefix.is_empty() && digits_only().is_match(ticket) => {
            Some(format!("{prefix}-{ticket}"))
        }
        _ => Some(ticket.to_string()),
    }
}

/// Ticket extraction configured from `[ticket]`.
///
/// # Examples
///
/// ```
/// use gitai_core::TicketConfig;
/// use gitai_gitpulse::ticket::TicketMatcher;
///
/// let config = TicketConfig { pattern: Some(r"T\d{3}".into()), prefix: Some("PROJ".into()) };
/// let matcher = TicketMatcher::from_config(&config).unwrap();
/// assert_eq!(matcher.ticket_for_branch("feat/T123-x").as_deref(), Some("T123"));
/// assert_eq!(matcher.format("77").as_deref(), Some("PROJ-77"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TicketMatcher {
    custom: Option<Regex>,
    prefix: Option<String>,
}

impl TicketMatcher {
    /// Compile the configured pattern.
    ///
    /// # Errors
    ///
    /// Returns [`GitaiError::Config`] when `pattern` is not a valid regex.
    pub fn from_config(config: &TicketConfig) -> Result<Self, GitaiError> {
        let custom = config
            .pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| {
                Regex::new(p)
                    .map_err(|e| GitaiError::Config(format!("invalid ticket pattern '{p}': {e}")))
            })
            .transpose()?;
        Ok(Self {
            custom,
            prefix: config.prefix.clone(),
        })
    }

    /// Ticket id found in `branch`.
    pub fn ticket_for_branch(&self, branch: &str) -> Option<String> {
        extract_ticket_from_branch(branch, self.custom.as_ref())
    }

    /// Normalise `ticket` with the configured prefix.
    pub fn format(&self, ticket: &str) -> Option<String> {
        format_ticket_number(ticket, self.prefix.as_deref())
    }

    /// Extract from `branch` and normalise in one step.
    pub fn resolve(&self, branch: &str) -> Option<String> {
        self.ticket_for_branch(branch)
            .and_then(|ticket| self.format(&ticket))
    }
}
