use std::{fmt::Display, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::{Error, filename::split_file_name, media::MediaType};

/// A fumo as stored in the catalog collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FumoRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

impl FumoRecord {
    /// Build the record for a downloaded file called `file_name`
    pub fn from_file_name(file_name: &str, cdn_base: &Url) -> Result<Self, Error> {
        let (id, extension) = split_file_name(file_name)?;
        Ok(Self {
            id: id.to_owned(),
            // "./" keeps names like `a:b.png` from being read as a scheme
            url: cdn_base.join(&format!("./{file_name}"))?.to_string(),
            media_type: MediaType::from_extension(extension),
        })
    }
}

impl Display for FumoRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.id, self.media_type, self.url)
    }
}

/// Turn every file directly inside `directory` into a record, ordered by file name.
///
/// Subdirectories and names that don't look like `<id>.<extension>` are skipped.
#[instrument(skip_all)]
pub async fn build_catalog(directory: &Path, cdn_base: &Url) -> Result<Vec<FumoRecord>, Error> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(directory).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            debug!("Skipping non file {}", entry.path().display());
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => warn!("Skipping file with non utf-8 name: {}", name.to_string_lossy()),
        }
    }
    names.sort();

    let mut records = Vec::with_capacity(names.len());
    for name in &names {
        match FumoRecord::from_file_name(name, cdn_base) {
            Ok(record) => records.push(record),
            Err(err) => warn!("Skipping {name}: {err}"),
        }
    }

    info!("Built {} catalog records from {}", records.len(), directory.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_CDN_BASE;

    fn cdn() -> Url {
        Url::parse(DEFAULT_CDN_BASE).unwrap()
    }

    #[test]
    fn record_from_file_name() {
        let record = FumoRecord::from_file_name("844263000000000000.png", &cdn()).unwrap();

        assert_eq!(record.id, "844263000000000000");
        assert_eq!(record.url, "https://cdn.nosesisaid.com/844263000000000000.png");
        assert_eq!(record.media_type, MediaType::Image);
    }

    #[test]
    fn cdn_base_keeps_its_path() {
        let base = Url::parse("https://cdn.example.com/fumos/").unwrap();
        let record = FumoRecord::from_file_name("1.gif", &base).unwrap();
        assert_eq!(record.url, "https://cdn.example.com/fumos/1.gif");
    }

    #[test]
    fn document_shape() {
        let record = FumoRecord::from_file_name("def456.mp4", &cdn()).unwrap();

        let document = mongodb::bson::to_document(&record).unwrap();

        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["_id", "url", "type"]);
        assert_eq!(document.get_str("_id").unwrap(), "def456");
        assert_eq!(document.get_str("url").unwrap(), "https://cdn.nosesisaid.com/def456.mp4");
        assert_eq!(document.get_str("type").unwrap(), "video");
    }

    #[tokio::test]
    async fn directory_becomes_sorted_records() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["xyz000.txt", "ghi789.gif", "abc123.png", "def456.mp4"] {
            std::fs::write(dir.path().join(name), b"fumo").unwrap();
        }

        let records = build_catalog(dir.path(), &cdn()).await.unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        let types: Vec<MediaType> = records.iter().map(|r| r.media_type).collect();
        assert_eq!(ids, vec!["abc123", "def456", "ghi789", "xyz000"]);
        assert_eq!(
            types,
            vec![MediaType::Image, MediaType::Video, MediaType::Gif, MediaType::Unknown]
        );
    }

    #[tokio::test]
    async fn directories_and_malformed_names_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();
        std::fs::write(dir.path().join("nested.png").join("inner.png"), b"x").unwrap();
        std::fs::write(dir.path().join("README"), b"x").unwrap();
        std::fs::write(dir.path().join("1.png"), b"x").unwrap();

        let records = build_catalog(dir.path(), &cdn()).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_catalog(&dir.path().join("downloads"), &cdn()).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
