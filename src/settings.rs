//! Settings loading.
//!
//! Settings come from an optional TOML file and `FLEETWATCH_*` environment
//! variables, read once at startup. The team registry lives here too: it is
//! static configuration, so changing it means restarting the dashboard.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::data::{TeamFilter, TeamRegistry, UNKNOWN_TEAM};

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),

    #[error("team name {0:?} is reserved")]
    ReservedTeamName(String),

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,
}

/// Values given on the command line, applied over the loaded settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub refresh_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

/// Dashboard settings.
///
/// ```toml
/// refresh_secs = 10
/// timeout_secs = 5
/// retries = 1
///
/// [[teams]]
/// name = "dev"
/// description = "General purpose workspaces"
/// sprites = ["dev-workspace-01"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Team registry. Defaults to the built-in fleet layout.
    pub teams: TeamRegistry,
    /// Seconds between automatic refreshes; 0 turns them off.
    pub refresh_secs: u64,
    /// Per-request timeout for HTTP sources. Zero is rejected.
    pub timeout_secs: u64,
    /// Retries after a transient HTTP failure.
    pub retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            teams: TeamRegistry::default(),
            refresh_secs: 5,
            timeout_secs: 5,
            retries: 1,
        }
    }
}

impl Settings {
    /// Load settings from `path` (if given) layered under the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_env(path, Self::environment())
    }

    /// The `FLEETWATCH_*` environment source, e.g. `FLEETWATCH_REFRESH_SECS`.
    pub fn environment() -> Environment {
        Environment::with_prefix("FLEETWATCH").try_parsing(true)
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(SettingsError::NotFound(path.to_path_buf()));
            }
            builder = builder.add_source(File::from(path));
        }

        let config = builder.add_source(env).build()?;

        let settings: Self = config.try_deserialize()?;
        settings.validate()
    }

    /// Apply command line values on top of the file and environment.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, SettingsError> {
        if let Some(refresh) = overrides.refresh_secs {
            self.refresh_secs = refresh;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(retries) = overrides.retries {
            self.retries = retries;
        }
        self.validate()
    }

    /// Reject values the dashboard cannot honor.
    ///
    /// Team names must be selectable with `--team` and must not collide with
    /// the bucket for unassigned sprites.
    fn validate(self) -> Result<Self, SettingsError> {
        if self.timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }
        for team in self.teams.teams() {
            let selectable = team.name.parse::<TeamFilter>().ok()
                == Some(TeamFilter::Team(team.name.clone()));
            if !selectable || team.name == UNKNOWN_TEAM {
                return Err(SettingsError::ReservedTeamName(team.name.clone()));
            }
        }
        Ok(self)
    }

    /// Refresh interval, or `None` when automatic refresh is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_secs > 0).then(|| Duration::from_secs(self.refresh_secs))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.teams, TeamRegistry::default());
        assert_eq!(settings.refresh_interval(), Some(Duration::from_secs(5)));
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.retries, 1);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
refresh_secs = 0
retries = 0

[[teams]]
name = "qa"
description = "Release testing"
sprites = ["qa-runner-01", "qa-runner-02"]
"#,
        );

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.refresh_interval(), None);
        assert_eq!(settings.retries, 0);
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.teams.len(), 1);
        assert_eq!(settings.teams.team_for_sprite("qa-runner-02"), "qa");
        assert_eq!(settings.teams.team_for_sprite("dev-workspace-01"), "unknown");
    }

    #[test]
    fn test_file_without_teams_keeps_default_registry() {
        let file = write_config("timeout_secs = 2\n");
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.timeout(), Duration::from_secs(2));
        assert_eq!(settings.teams, TeamRegistry::default());
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Some(Path::new("/nonexistent/fleetwatch.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::NotFound(_)));
    }

    #[test]
    fn test_invalid_file() {
        let file = write_config("refresh_secs = \"soon\"\n");
        assert!(Settings::load(Some(file.path())).is_err());
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::environment().source(Some(vars))
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config("refresh_secs = 30\nretries = 2\n");
        let settings = Settings::load_with_env(
            Some(file.path()),
            env(&[("FLEETWATCH_REFRESH_SECS", "10")]),
        )
        .unwrap();

        assert_eq!(settings.refresh_secs, 10);
        // Untouched by the environment
        assert_eq!(settings.retries, 2);
    }

    #[test]
    fn test_environment_without_file() {
        let settings =
            Settings::load_with_env(None, env(&[("FLEETWATCH_TIMEOUT_SECS", "9")])).unwrap();
        assert_eq!(settings.timeout(), Duration::from_secs(9));
        assert_eq!(settings.refresh_secs, 5);
    }

    #[test]
    fn test_command_line_overrides_win() {
        let file = write_config("refresh_secs = 30\ntimeout_secs = 7\nretries = 2\n");
        let settings = Settings::load_with_env(
            Some(file.path()),
            env(&[("FLEETWATCH_REFRESH_SECS", "10")]),
        )
        .unwrap()
        .with_overrides(Overrides {
            refresh_secs: Some(0),
            retries: Some(0),
            ..Overrides::default()
        })
        .unwrap();

        assert_eq!(settings.refresh_interval(), None);
        assert_eq!(settings.retries, 0);
        assert_eq!(settings.timeout_secs, 7);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let file = write_config("timeout_secs = 0\n");
        let err = Settings::load_with_env(Some(file.path()), env(&[])).unwrap_err();
        assert!(matches!(err, SettingsError::ZeroTimeout));

        let err = Settings::default()
            .with_overrides(Overrides {
                timeout_secs: Some(0),
                ..Overrides::default()
            })
            .unwrap_err();
        assert!(matches!(err, SettingsError::ZeroTimeout));
    }

    #[test]
    fn test_reserved_team_names_are_rejected() {
        for name in ["unknown", "all", " padded "] {
            let file = write_config(&format!(
                "[[teams]]\nname = \"{name}\"\ndescription = \"\"\nsprites = [\"stray-01\"]\n"
            ));
            let err = Settings::load_with_env(Some(file.path()), env(&[])).unwrap_err();
            assert!(
                matches!(&err, SettingsError::ReservedTeamName(n) if n == name),
                "{name}: {err}"
            );
        }
    }
}
