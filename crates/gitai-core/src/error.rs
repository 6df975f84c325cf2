use std::path::PathBuf;

/// Errors that can occur across gitai.
///
/// The analysis engines themselves never fail on malformed input; this type
/// covers configuration, I/O, and serialization at the edges. The binary
/// converts to a `miette` diagnostic at the boundary.
///
/// # Examples
///
/// ```
/// use gitai_core::GitaiError;
///
/// let err = GitaiError::Config("top_patterns must be at least 1".into());
/// assert!(err.to_string().contains("top_patterns"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GitaiError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    #[diagnostic(code(gitai::config), help("check .gitai.toml or run `gitai init`"))]
    Config(String),

    /// Input text could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(gitai::toml))]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    #[diagnostic(code(gitai::file_not_found))]
    FileNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GitaiError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = GitaiError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = GitaiError::FileNotFound(PathBuf::from("/tmp/missing.diff"));
        assert!(err.to_string().contains("/tmp/missing.diff"));
    }

    #[test]
    fn toml_error_converts() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: GitaiError = toml_err.into();
        assert!(err.to_string().starts_with("TOML parse error"));
    }
}
