//! The file handed from the crawl to the download step.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{Error, constants::MANIFEST_VERSION};

/// List of attachment urls found in a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentManifest {
    pub version: u32,
    pub channel_id: Option<u64>,
    pub urls: Vec<String>,
}

/// What can be found on disk. Older runs wrote a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredManifest {
    Versioned(AttachmentManifest),
    Legacy(Vec<String>),
}

impl AttachmentManifest {
    pub fn new(channel_id: u64, urls: Vec<String>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            channel_id: Some(channel_id),
            urls,
        }
    }

    /// Parse a manifest, accepting the legacy bare array as well
    pub fn from_json(json: &str) -> Result<Self, Error> {
        match serde_json::from_str(json)? {
            StoredManifest::Versioned(manifest) if manifest.version == MANIFEST_VERSION => Ok(manifest),
            StoredManifest::Versioned(manifest) => Err(Error::UnsupportedManifestVersion(manifest.version)),
            StoredManifest::Legacy(urls) => {
                warn!("Reading legacy attachment list without version");
                Ok(Self {
                    version: MANIFEST_VERSION,
                    channel_id: None,
                    urls,
                })
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn read_from(path: &Path) -> Result<Self, Error> {
        debug!("Reading attachment manifest from {}", path.display());
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    /// Write the manifest, replacing whatever was at `path`
    #[instrument(skip_all)]
    pub async fn write_to(&self, path: &Path) -> Result<(), Error> {
        debug!("Writing {} urls to {}", self.urls.len(), path.display());
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_array_is_accepted() {
        let manifest =
            AttachmentManifest::from_json(r#"["https://a/b/c/1/x.png", "https://a/b/c/2/y.gif"]"#).unwrap();

        assert_eq!(manifest.channel_id, None);
        assert_eq!(manifest.urls.len(), 2);
    }

    #[test]
    fn other_versions_are_rejected() {
        let result = AttachmentManifest::from_json(r#"{"version": 2, "channel_id": 1, "urls": []}"#);
        assert!(matches!(result, Err(Error::UnsupportedManifestVersion(2))));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            AttachmentManifest::from_json(r#"{"urls": "nope"}"#),
            Err(Error::Json(_))
        ));
    }

    #[tokio::test]
    async fn written_manifest_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attachments.json");
        let manifest = AttachmentManifest::new(844, vec!["https://a/b/c/1/x.png".to_owned()]);

        manifest.write_to(&path).await.unwrap();
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let read = AttachmentManifest::read_from(&path).await.unwrap();

        assert!(written.contains("\"version\": 1"));
        assert_eq!(read, manifest);
    }
}
