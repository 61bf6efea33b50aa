pub use config::ConfigError;

use config::{Config, Environment, File};
use derive_more::Display;
use serde::Deserialize;
use std::path::Path;

/// Prefix of environment variables that override settings,
/// e.g. `FIXTURE_FACTORY__CLEANUP__POLICY=continue_on_error`.
pub const ENV_PREFIX: &str = "FIXTURE_FACTORY";

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub cleanup: CleanupSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    #[display("pretty")]
    Pretty,
    #[display("json")]
    Json,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CleanupSettings {
    pub policy: CleanupPolicy,
}

/// What cleanup does when destroying a record fails
///
/// In both cases the creation log has already been emptied, so records are
/// never destroyed twice.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
pub enum CleanupPolicy {
    /// Stop at the first failure; records not yet reached are abandoned.
    #[default]
    #[display("stop_on_error")]
    StopOnError,
    /// Attempt every record, then report the first failure.
    #[display("continue_on_error")]
    ContinueOnError,
}

impl Settings {
    /// Load settings from `config/fixtures*` under the working directory and
    /// the environment.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Load settings from `fixtures*` files in `directory`, then the environment
    pub fn load_from(directory: &Path) -> Result<Self, ConfigError> {
        Self::load(directory, ENV_PREFIX)
    }

    fn load(directory: &Path, env_prefix: &str) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Config::builder()
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format.to_string())?
            .set_default("cleanup.policy", defaults.cleanup.policy.to_string())?
            .add_source(File::from(directory.join("fixtures")).required(false))
            .add_source(File::from(directory.join("fixtures.local")).required(false))
            .add_source(Environment::with_prefix(env_prefix).separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_stop_cleanup_on_first_error() {
        let settings = Settings::default();
        assert_eq!(settings.cleanup.policy, CleanupPolicy::StopOnError);
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn missing_directory_yields_defaults() {
        let directory = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&directory.path().join("absent")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(
            directory.path().join("fixtures.toml"),
            "[cleanup]\npolicy = \"continue_on_error\"\n\n[logging]\nlevel = \"debug\"\nformat = \"json\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(directory.path()).unwrap();

        assert_eq!(settings.cleanup.policy, CleanupPolicy::ContinueOnError);
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn local_file_wins_over_shared_file() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(
            directory.path().join("fixtures.toml"),
            "[logging]\nlevel = \"info\"\n",
        )
        .unwrap();
        fs::write(
            directory.path().join("fixtures.local.toml"),
            "[logging]\nlevel = \"trace\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(directory.path()).unwrap();

        assert_eq!(settings.logging.level, "trace");
    }

    #[test]
    fn environment_wins_over_files() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(
            directory.path().join("fixtures.toml"),
            "[cleanup]\npolicy = \"stop_on_error\"\n",
        )
        .unwrap();
        // Own prefix so parallel tests reading ENV_PREFIX are unaffected
        let prefix = "FIXTURE_FACTORY_ENV_LAYER";
        std::env::set_var(format!("{prefix}__CLEANUP__POLICY"), "continue_on_error");

        let settings = Settings::load(directory.path(), prefix);
        std::env::remove_var(format!("{prefix}__CLEANUP__POLICY"));

        assert_eq!(
            settings.unwrap().cleanup.policy,
            CleanupPolicy::ContinueOnError
        );
    }

    #[test]
    fn working_directory_settings_load() {
        assert!(Settings::new().is_ok());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(
            directory.path().join("fixtures.toml"),
            "[cleanup]\npolicy = \"retry_forever\"\n",
        )
        .unwrap();

        assert!(Settings::load_from(directory.path()).is_err());
    }
}
