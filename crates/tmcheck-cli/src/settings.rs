use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tmcheck_engine::MarkerPattern;

pub const DEFAULT_SETTINGS_FILE: &str = "tmcheck.toml";
pub const SETTINGS_ENV: &str = "TMCHECK_SETTINGS";

/// Resolve the settings file path based on priority:
/// 1. Explicit `--settings` path
/// 2. TMCHECK_SETTINGS environment variable
/// 3. `tmcheck.toml` in the working directory
pub fn resolve_settings_path(explicit_path: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit_path {
        return path.to_path_buf();
    }

    if let Ok(env_path) = std::env::var(SETTINGS_ENV)
        && !env_path.is_empty()
    {
        return PathBuf::from(env_path);
    }

    PathBuf::from(DEFAULT_SETTINGS_FILE)
}

/// Input files for one subsystem under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub config: PathBuf,
    pub log: PathBuf,
    #[serde(default)]
    pub expected: Option<PathBuf>,
    #[serde(default)]
    pub reference: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Which comparison a profile asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMode<'a> {
    Range { expected: &'a Path },
    Reference { reference: &'a Path },
}

impl Profile {
    pub fn mode(&self) -> Result<ProfileMode<'_>> {
        match (&self.expected, &self.reference) {
            (Some(expected), None) => Ok(ProfileMode::Range { expected }),
            (None, Some(reference)) => Ok(ProfileMode::Reference { reference }),
            (Some(_), Some(_)) => bail!("profile declares both `expected` and `reference`"),
            (None, None) => bail!("profile declares neither `expected` nor `reference`"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Text preceding the TM id on marker lines
    #[serde(default)]
    pub marker: Option<String>,

    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Directory relative profile paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Settings {
    /// Load settings; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        settings.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(settings)
    }

    pub fn profile(&self, name: &str) -> Result<&Profile> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile),
            None if self.profiles.is_empty() => {
                bail!("Unknown profile '{}': no profiles are configured", name)
            }
            None => bail!(
                "Unknown profile '{}'. Configured profiles: {}",
                name,
                self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        }
    }

    /// Resolve a profile path against the settings file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn marker_pattern(&self) -> MarkerPattern {
        match self.marker.as_deref() {
            Some(marker) => MarkerPattern::new(marker),
            None => MarkerPattern::default(),
        }
    }
}

/// Report path used when a profile names none.
pub fn default_output(profile_name: &str) -> PathBuf {
    PathBuf::from(format!("{}_result.csv", profile_name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmcheck_engine::DEFAULT_MARKER;

    fn write_settings(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SETTINGS_FILE);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(settings.profiles.is_empty());
        assert_eq!(settings.marker_pattern().marker(), DEFAULT_MARKER);
    }

    #[test]
    fn test_profiles_resolve_relative_to_settings_dir() {
        let (dir, path) = write_settings(
            r#"
marker = "RX TM"

[profiles.EPS]
config = "eps_config.json"
expected = "eps_expected.json"
log = "/var/log/eps_test.log"
"#,
        );
        let settings = Settings::load_from(&path).unwrap();
        let profile = settings.profile("EPS").unwrap();

        assert_eq!(
            settings.resolve(&profile.config),
            dir.path().join("eps_config.json")
        );
        assert_eq!(
            settings.resolve(&profile.log),
            PathBuf::from("/var/log/eps_test.log")
        );
        assert!(matches!(profile.mode().unwrap(), ProfileMode::Range { .. }));
        assert_eq!(settings.marker_pattern().marker(), "RX TM");
    }

    #[test]
    fn test_profile_mode_must_be_unambiguous() {
        let (_dir, path) = write_settings(
            r#"
[profiles.BOTH]
config = "c.json"
log = "t.log"
expected = "e.json"
reference = "r.log"

[profiles.NONE]
config = "c.json"
log = "t.log"
"#,
        );
        let settings = Settings::load_from(&path).unwrap();
        assert!(settings.profile("BOTH").unwrap().mode().is_err());
        assert!(settings.profile("NONE").unwrap().mode().is_err());
    }

    #[test]
    fn test_unknown_profile_lists_known_ones() {
        let (_dir, path) = write_settings(
            r#"
[profiles.EPS]
config = "c.json"
log = "t.log"
reference = "r.log"
"#,
        );
        let settings = Settings::load_from(&path).unwrap();
        let err = settings.profile("OBC").unwrap_err();
        assert!(err.to_string().contains("EPS"), "{}", err);
    }

    #[test]
    fn test_invalid_settings_is_error() {
        let (_dir, path) = write_settings("profiles = 3");
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_default_output_is_lowercased() {
        assert_eq!(default_output("EPS"), PathBuf::from("eps_result.csv"));
    }

    #[test]
    fn test_explicit_settings_path_wins() {
        let path = resolve_settings_path(Some(Path::new("custom.toml")));
        assert_eq!(path, PathBuf::from("custom.toml"));
    }
}
