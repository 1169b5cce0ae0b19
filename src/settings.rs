use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::constants::{
    DEFAULT_CDN_BASE, DEFAULT_CHANNEL_ID, DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_DOWNLOAD_DIRECTORY,
    DEFAULT_LOG_LEVEL, DEFAULT_MANIFEST,
};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Wrapper for all settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Tracing filter directive, used when `RUST_LOG` is not set
    pub log_level: String,
    /// Discord settings
    pub discord: Discord,
    /// Download settings
    pub download: Download,
    /// Catalog settings
    pub catalog: Catalog,
}

impl Settings {
    /// Load settings from an optional `settings.*` file in the working directory
    /// and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        Self::build(config::File::with_name("settings").required(false))
    }

    /// Load settings from the file at `path` and the environment.
    /// The file has to exist.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let path = path.to_string_lossy();
        Self::build(config::File::with_name(&path))
    }

    fn build<S>(file: S) -> Result<Self, SettingsError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("discord.channel_id", DEFAULT_CHANNEL_ID)?
            .set_default("download.directory", DEFAULT_DOWNLOAD_DIRECTORY)?
            .set_default("download.manifest", DEFAULT_MANIFEST)?
            .set_default("catalog.database", DEFAULT_DATABASE)?
            .set_default("catalog.collection", DEFAULT_COLLECTION)?
            .set_default("catalog.cdn_base", DEFAULT_CDN_BASE)?
            .add_source(file)
            .add_source(Environment::with_prefix("FUMO").prefix_separator("_").separator("__"))
            // the plain variables the upload scripts have always used
            .set_override_option("discord.token", std::env::var("DISCORD_TOKEN").ok())?
            .set_override_option("catalog.mongo_uri", std::env::var("MONGO_URI").ok())?
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

/// Discord settings
#[derive(Debug, Clone, Deserialize)]
pub struct Discord {
    /// Bot token
    pub token: Option<String>,
    /// Channel to archive
    pub channel_id: u64,
    /// Upper bound of messages to crawl. Unbounded if missing
    pub message_limit: Option<usize>,
}

/// Download settings
#[derive(Debug, Clone, Deserialize)]
pub struct Download {
    /// Where downloaded files end up
    pub directory: PathBuf,
    /// Attachment manifest written by the crawl and read by the download
    pub manifest: PathBuf,
}

/// Catalog settings
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// Mongodb connection string
    pub mongo_uri: Option<String>,
    /// Database name
    pub database: String,
    /// Collection name
    pub collection: String,
    /// Base url the cdn serves the downloaded files from
    pub cdn_base: Url,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            log_level = "debug"

            [discord]
            token = "from-file"
            channel_id = 42
            message_limit = 500

            [catalog]
            mongo_uri = "mongodb://localhost:27017"
            cdn_base = "https://cdn.example.com/fumos/"
            "#
        )
        .unwrap();

        let settings = Settings::load_from_path(file.path()).unwrap();

        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.discord.channel_id, 42);
        assert_eq!(settings.discord.message_limit, Some(500));
        assert_eq!(settings.download.directory, PathBuf::from(DEFAULT_DOWNLOAD_DIRECTORY));
        assert_eq!(settings.catalog.database, DEFAULT_DATABASE);
        assert_eq!(settings.catalog.collection, DEFAULT_COLLECTION);
        assert_eq!(settings.catalog.cdn_base.as_str(), "https://cdn.example.com/fumos/");
    }

    #[test]
    fn missing_file_is_an_error_when_path_is_given() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load_from_path(&dir.path().join("nope.toml"));
        assert!(result.is_err());
    }
}
