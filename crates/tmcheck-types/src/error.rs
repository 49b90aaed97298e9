use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for tmcheck-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while acquiring validation inputs.
///
/// Both variants are fatal for a run: they are raised before any
/// parameter is validated. Per-parameter outcomes such as a missing value
/// are never errors, they are folded into the record status.
#[derive(Debug)]
pub enum Error {
    /// Telemetry config or expectation source is missing or malformed
    Config {
        path: Option<PathBuf>,
        reason: String,
    },

    /// Log source is missing or unreadable
    Log {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            path: None,
            reason: reason.into(),
        }
    }

    /// Attach the originating file to a config error raised while parsing.
    pub fn at_path(self, at: &Path) -> Self {
        match self {
            Error::Config { path: None, reason } => Error::Config {
                path: Some(at.to_path_buf()),
                reason,
            },
            other => other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config {
                path: Some(path),
                reason,
            } => write!(f, "Configuration error in {}: {}", path.display(), reason),
            Error::Config { path: None, reason } => write!(f, "Configuration error: {}", reason),
            Error::Log { path, source } => {
                write!(f, "Log error: cannot read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Log { source, .. } => Some(source),
            Error::Config { .. } => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::config(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_file() {
        let err = Error::config("expected an object").at_path(Path::new("eps_config.json"));
        assert_eq!(
            err.to_string(),
            "Configuration error in eps_config.json: expected an object"
        );
    }

    #[test]
    fn test_at_path_keeps_existing_path() {
        let err = Error::Config {
            path: Some(PathBuf::from("a.json")),
            reason: "bad".to_string(),
        }
        .at_path(Path::new("b.json"));
        assert!(err.to_string().contains("a.json"));
    }

    #[test]
    fn test_log_error_exposes_source() {
        let err = Error::Log {
            path: PathBuf::from("missing.log"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("missing.log"));
    }
}
