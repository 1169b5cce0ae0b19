use thiserror::Error;

use crate::{filename::FilenameError, settings::SettingsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Serenity(#[from] poise::serenity_prelude::Error),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Filename(#[from] FilenameError),

    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("Unsupported attachment manifest version: {0}")]
    UnsupportedManifestVersion(u32),

    #[error("Catalog insert hit {duplicates} duplicate id(s) after inserting {inserted} record(s)")]
    DuplicateRecords { inserted: usize, duplicates: usize },
}
