use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GitaiError;

/// Top-level configuration loaded from `.gitai.toml`.
///
/// Supports layered resolution: CLI flags > local config > defaults.
///
/// # Examples
///
/// ```
/// use gitai_core::GitaiConfig;
///
/// let config = GitaiConfig::default();
/// assert_eq!(config.diff.max_length, 4000);
/// assert_eq!(config.stats.top_patterns, 3);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitaiConfig {
    /// Smart-diff settings.
    #[serde(default)]
    pub diff: DiffConfig,
    /// Commit history statistics settings.
    #[serde(default)]
    pub stats: StatsConfig,
    /// Ticket extraction settings.
    #[serde(default)]
    pub ticket: TicketConfig,
}

impl GitaiConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GitaiError::FileNotFound`] if the file does not exist,
    /// [`GitaiError::Io`] if it cannot be read, or [`GitaiError::Toml`] if
    /// the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gitai_core::GitaiConfig;
    /// use std::path::Path;
    ///
    /// let config = GitaiConfig::from_file(Path::new(".gitai.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, GitaiError> {
        if !path.exists() {
            return Err(GitaiError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`GitaiError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitai_core::GitaiConfig;
    ///
    /// let toml = r#"
    /// [diff]
    /// max_length = 8000
    /// "#;
    /// let config = GitaiConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.diff.max_length, 8000);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, GitaiError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`GitaiError::Config`] when `stats.top_patterns` is zero or
    /// `ticket.pattern` is not a valid regular expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitai_core::GitaiConfig;
    ///
    /// let config = GitaiConfig::from_toml("[ticket]\npattern = \"(\"").unwrap();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), GitaiError> {
        if self.stats.top_patterns == 0 {
            return Err(GitaiError::Config(
                "stats.top_patterns must be at least 1".into(),
            ));
        }
        if let Some(pattern) = &self.ticket.pattern {
            regex::Regex::new(pattern).map_err(|e| {
                GitaiError::Config(format!("invalid ticket.pattern '{pattern}': {e}"))
            })?;
        }
        Ok(())
    }
}

/// Smart-diff configuration.
///
/// # Examples
///
/// ```
/// use gitai_core::DiffConfig;
///
/// assert_eq!(DiffConfig::default().max_length, 4000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Byte budget for the smart diff (default: 4000).
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_max_length() -> usize {
    4000
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
        }
    }
}

/// Commit history statistics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Number of commits the log collaborator should supply (default: 100).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of commit patterns to rank (default: 3).
    #[serde(default = "default_top_patterns")]
    pub top_patterns: usize,
}

fn default_limit() -> usize {
    100
}

fn default_top_patterns() -> usize {
    3
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            top_patterns: default_top_patterns(),
        }
    }
}

/// Ticket extraction configuration.
///
/// # Examples
///
/// ```
/// use gitai_core::TicketConfig;
///
/// let config = TicketConfig::default();
/// assert!(config.pattern.is_none());
/// assert!(config.prefix.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketConfig {
    /// Custom regex tried before the built-in ticket patterns.
    pub pattern: Option<String>,
    /// Prefix joined onto bare numeric tickets, e.g. `PROJ` for `PROJ-123`.
    pub prefix: Option<String>,
}
