// Settings
//
// Layering (later wins): built-in defaults -> `careerflow.toml` in the working directory (or an
// explicit `--config=<path>`) -> `CAREERFLOW_*` environment variables.

use crate::api::endpoints::parse_api_base;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_SCHEDULE_CALL_URL: &str =
    "https://calendly.com/drcraigmiller-careerflowframework/strategy-call";
pub const DEFAULT_CONFIG_FILE: &str = "careerflow";
pub const ENV_PREFIX: &str = "CAREERFLOW";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Backend root; `CAREERFLOW_API_BASE` overrides it.
    pub api_base: String,
    /// Call-to-action link when the server does not send `schedule_call_url`.
    pub schedule_call_url: String,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            schedule_call_url: DEFAULT_SCHEDULE_CALL_URL.to_string(),
            log_dir: None,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::from_builder(layered(config_path, environment())?)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings: Settings = builder
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        parse_api_base(&self.api_base).context("Invalid api_base setting")?;
        if self.schedule_call_url.trim().is_empty() {
            anyhow::bail!("schedule_call_url must not be empty");
        }
        if self.request_timeout_secs == Some(0) {
            anyhow::bail!("request_timeout_secs must be greater than zero when set");
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .try_parsing(true)
}

/// Defaults, then the settings file, then `env` on top.
fn layered(config_path: Option<&Path>, env: Environment) -> Result<ConfigBuilder<DefaultState>> {
    let file = match config_path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };
    Ok(defaults()?.add_source(file).add_source(env))
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(config::Config::builder()
        .set_default("api_base", DEFAULT_API_BASE)?
        .set_default("schedule_call_url", DEFAULT_SCHEDULE_CALL_URL)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("careerflow.toml");
        let mut f = std::fs::File::create(&path).expect("create settings file");
        f.write_all(body.as_bytes()).expect("write settings file");
        path
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let settings = Settings::from_builder(defaults().expect("defaults")).expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_base, "http://localhost:5000");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_settings(
            &dir,
            "api_base = \"https://diagnostic.example.com\"\nrequest_timeout_secs = 30\n",
        );

        let builder = defaults()
            .expect("defaults")
            .add_source(File::from(path.as_path()));
        let settings = Settings::from_builder(builder).expect("settings");

        assert_eq!(settings.api_base, "https://diagnostic.example.com");
        assert_eq!(settings.request_timeout_secs, Some(30));
        assert_eq!(settings.schedule_call_url, DEFAULT_SCHEDULE_CALL_URL);
    }

    #[test]
    fn rejects_invalid_api_base() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_settings(&dir, "api_base = \"not a url\"\n");

        let builder = defaults()
            .expect("defaults")
            .add_source(File::from(path.as_path()));
        assert!(Settings::from_builder(builder).is_err());
    }

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn env_api_base_beats_file_and_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_settings(
            &dir,
            "api_base = \"https://file.example.com\"\nrequest_timeout_secs = 30\n",
        );

        let env = env_with(&[
            ("CAREERFLOW_API_BASE", "https://env.example.com"),
            ("CAREERFLOW_REQUEST_TIMEOUT_SECS", "45"),
            ("OTHERAPP_API_BASE", "https://ignored.example.com"),
        ]);
        let builder = layered(Some(path.as_path()), env).expect("layered");
        let settings = Settings::from_builder(builder).expect("settings");

        assert_eq!(settings.api_base, "https://env.example.com");
        assert_eq!(settings.request_timeout_secs, Some(45));
        assert_eq!(settings.schedule_call_url, DEFAULT_SCHEDULE_CALL_URL);
    }

    #[test]
    fn env_api_base_overrides_default_without_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_settings(&dir, "");

        let env = env_with(&[("CAREERFLOW_API_BASE", "https://env.example.com/backend")]);
        let builder = layered(Some(path.as_path()), env).expect("layered");
        let settings = Settings::from_builder(builder).expect("settings");

        assert_eq!(settings.api_base, "https://env.example.com/backend");
    }

    #[test]
    fn invalid_env_api_base_is_rejected() {
        let env = env_with(&[("CAREERFLOW_API_BASE", "ftp://env.example.com")]);
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_settings(&dir, "");
        let builder = layered(Some(path.as_path()), env).expect("layered");
        assert!(Settings::from_builder(builder).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load(Some(&missing)).is_err());
    }
}
