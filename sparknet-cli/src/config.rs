//! Configuration file and overrides
//!
//! Values come from `<config dir>/config.json`, then from the environment
//! (including `.env`) and command line flags, later sources winning.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use sparknet_lib::SparkNetClient;
use sparknet_lib::console::ConsoleConfig;
use sparknet_lib::model::Collection;

use crate::cli::BackendArgs;
use crate::error::CliError;
use crate::paths;

const DEFAULT_DATABASE: &str = "sparknet";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub endpoint: Option<String>,
    pub project: Option<String>,
    pub api_key: Option<String>,
    pub database: Option<String>,
    pub avatar_bucket: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Collection ID overrides, keyed by collection name.
    pub collections: BTreeMap<String, String>,
}

impl Config {
    /// Loads the config file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| CliError::config(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(CliError::ReadFile {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Loads the config from the platform config directory.
    pub fn load_default() -> Result<Self, CliError> {
        match paths::config_file() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Applies environment and command line overrides.
    pub fn apply(&mut self, args: &BackendArgs) {
        let overrides = [
            (&mut self.endpoint, &args.endpoint),
            (&mut self.project, &args.project),
            (&mut self.api_key, &args.api_key),
            (&mut self.database, &args.database),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                *slot = Some(value.clone());
            }
        }
    }

    /// Builds the console configuration, resolving collection overrides.
    pub fn console_config(&self) -> Result<ConsoleConfig, CliError> {
        let mut config = ConsoleConfig::new(self.database.as_deref().unwrap_or(DEFAULT_DATABASE));
        if let Some(bucket) = &self.avatar_bucket {
            config = config.with_avatar_bucket(bucket);
        }
        for (name, id) in &self.collections {
            let collection = Collection::parse(name)
                .ok_or_else(|| CliError::config(format!("unknown collection '{name}'")))?;
            config = config.with_collection(collection, id);
        }
        Ok(config)
    }

    /// Builds the REST client. Needs an endpoint and a project.
    pub fn client(&self) -> Result<SparkNetClient, CliError> {
        let endpoint = self.endpoint.as_deref().ok_or_else(|| {
            CliError::config("no endpoint; set SPARKNET_ENDPOINT or add it to config.json")
        })?;
        let project = self.project.as_deref().ok_or_else(|| {
            CliError::config("no project; set SPARKNET_PROJECT or add it to config.json")
        })?;

        let mut builder = SparkNetClient::builder().endpoint(endpoint).project(project);
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"endpoint": "https://file.example.com/v1", "project": "p1", "collections": {"members": "people"}}"#,
        )
        .unwrap();

        let mut config = Config::load(&path).unwrap();
        config.apply(&BackendArgs {
            endpoint: Some("https://flag.example.com/v1".to_string()),
            ..BackendArgs::default()
        });

        assert_eq!(config.endpoint.as_deref(), Some("https://flag.example.com/v1"));
        assert_eq!(config.project.as_deref(), Some("p1"));
        let console = config.console_config().unwrap();
        assert_eq!(console.collection_id(Collection::Members), "people");
        assert_eq!(console.database, DEFAULT_DATABASE);
    }

    #[test]
    fn test_client_needs_endpoint() {
        let config = Config {
            project: Some("p1".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.client(), Err(CliError::Config(_))));
    }
}
