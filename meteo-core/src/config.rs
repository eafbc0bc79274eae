use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::provider::meteostat::ClientConfig;

/// Name of the credential, both as an environment variable and as a `.env` key.
pub const API_KEY_VAR: &str = "METEOSTAT_API_KEY";

/// Optional configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [http]
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Fallback API key, used when neither the environment nor `.env` has one.
    pub api_key: Option<String>,

    #[serde(default)]
    pub http: ClientConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Find the API key: process environment, then the `.env` file at
    /// `dotenv_path`, then this config. Empty values are skipped.
    pub fn resolve_api_key(&self, dotenv_path: &Path) -> Result<String> {
        let from_env = std::env::var(API_KEY_VAR).ok();
        self.resolve_api_key_from(from_env, dotenv_path)
    }

    fn resolve_api_key_from(&self, from_env: Option<String>, dotenv_path: &Path) -> Result<String> {
        if let Some(key) = non_empty(from_env) {
            debug!("using API key from environment");
            return Ok(key);
        }

        if let Some(key) = non_empty(read_dotenv_key(dotenv_path)?) {
            debug!(path = %dotenv_path.display(), "using API key from dotfile");
            return Ok(key);
        }

        if let Some(key) = non_empty(self.api_key.clone()) {
            debug!("using API key from config file");
            return Ok(key);
        }

        Err(anyhow!(
            "Please enter a {API_KEY_VAR} in a .env file, or use an environment variable."
        ))
    }
}

/// Value of [`API_KEY_VAR`] in a dotenv-style file, without touching the
/// process environment. A missing file yields `None`.
fn read_dotenv_key(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let entries = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to read dotfile: {}", path.display()))?;

    for entry in entries {
        let (key, value) =
            entry.with_context(|| format!("Failed to parse dotfile: {}", path.display()))?;
        if key == API_KEY_VAR {
            return Ok(Some(value));
        }
    }

    Ok(None)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dotenv_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write dotfile");
        file
    }

    fn missing_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("does-not-exist")
    }

    #[test]
    fn environment_wins_over_dotfile_and_config() {
        let dotenv = dotenv_with("METEOSTAT_API_KEY=FROM_DOTENV\n");
        let cfg = Config {
            api_key: Some("FROM_CONFIG".into()),
            ..Default::default()
        };

        let key = cfg
            .resolve_api_key_from(Some("FROM_ENV".into()), dotenv.path())
            .expect("key resolves");
        assert_eq!(key, "FROM_ENV");
    }

    #[test]
    fn dotfile_wins_over_config() {
        let dotenv = dotenv_with("# comment\nOTHER=1\nMETEOSTAT_API_KEY=\"FROM_DOTENV\"\n");
        let cfg = Config {
            api_key: Some("FROM_CONFIG".into()),
            ..Default::default()
        };

        let key = cfg.resolve_api_key_from(None, dotenv.path()).expect("key resolves");
        assert_eq!(key, "FROM_DOTENV");
    }

    #[test]
    fn empty_environment_value_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = Config {
            api_key: Some("FROM_CONFIG".into()),
            ..Default::default()
        };

        let key = cfg
            .resolve_api_key_from(Some("  ".into()), &missing_path(&dir))
            .expect("key resolves");
        assert_eq!(key, "FROM_CONFIG");
    }

    #[test]
    fn missing_key_everywhere_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = Config::default();

        let err = cfg.resolve_api_key_from(None, &missing_path(&dir)).unwrap_err();
        assert!(err.to_string().contains("Please enter a METEOSTAT_API_KEY"));
    }

    #[test]
    fn load_from_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");

        let cfg = Config::load_from(&missing_path(&dir)).expect("defaults");
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.http, ClientConfig::default());
    }

    #[test]
    fn load_from_reads_key_and_http_table() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "api_key = \"CFG_KEY\"\n\n[http]\nbase_url = \"http://localhost:8080\"\ntimeout_secs = 5"
        )
        .expect("write config");

        let cfg = Config::load_from(file.path()).expect("config parses");
        assert_eq!(cfg.api_key.as_deref(), Some("CFG_KEY"));
        assert_eq!(cfg.http.base_url, "http://localhost:8080");
        assert_eq!(cfg.http.timeout_secs, 5);
        assert_eq!(cfg.http.pool_max_idle_per_host, 10);
    }

    #[test]
    fn load_from_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "api_key = ").expect("write config");

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
