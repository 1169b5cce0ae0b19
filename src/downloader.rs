//! Fetching attachments onto the local disk.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    pin::pin,
    time::Duration,
};

use bytes::Bytes;
use reqwest::Client;
use tokio::{fs::File, io::AsyncWriteExt};
use tokio_stream::StreamExt;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::{Error, constants::USER_AGENT, filename::derive_filename};

/// A file that has been written to the download directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub bytes: u64,
    pub source: Url,
}

/// Outcome of a download run
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub downloaded: Vec<DownloadedFile>,
    pub failed: Vec<(String, Error)>,
}

impl Display for DownloadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Downloaded: {}", self.downloaded.len())?;
        writeln!(f, "Failed: {}", self.failed.len())?;
        for (url, err) in &self.failed {
            writeln!(f, "- {url}: {err}")?;
        }
        Ok(())
    }
}

/// Streams urls into a directory
pub struct Downloader {
    client: Client,
    directory: PathBuf,
}

impl Downloader {
    pub fn new(client: Client, directory: impl Into<PathBuf>) -> Self {
        Self {
            client,
            directory: directory.into(),
        }
    }

    /// Client used by the download step
    pub fn default_client() -> Result<Client, Error> {
        Ok(Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(USER_AGENT)
            .build()?)
    }

    /// Download a single url into the directory, overwriting an existing file of the same name.
    ///
    /// A partially written file is removed again if the transfer fails.
    #[instrument(skip(self))]
    pub async fn download(&self, url: &str) -> Result<DownloadedFile, Error> {
        let source = Url::parse(url)?;
        let path = self.directory.join(derive_filename(&source)?);

        debug!("requesting {source}");
        let response = self.client.get(source.clone()).send().await?.error_for_status()?;

        let bytes = match write_body(response, &path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                    debug!("could not remove partial file {}: {remove_err}", path.display());
                }
                return Err(err);
            }
        };

        info!("Downloaded {source} to {} ({bytes} bytes)", path.display());
        Ok(DownloadedFile { path, bytes, source })
    }

    /// Download every url one after another.
    ///
    /// Failures are collected in the report instead of aborting the run.
    #[instrument(skip_all)]
    pub async fn download_all(&self, urls: &[String]) -> Result<DownloadReport, Error> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let mut report = DownloadReport::default();
        for (index, url) in urls.iter().enumerate() {
            debug!("{}/{}", index + 1, urls.len());
            match self.download(url).await {
                Ok(file) => report.downloaded.push(file),
                Err(err) => {
                    warn!("Could not download {url}: {err}");
                    report.failed.push((url.clone(), err));
                }
            }
        }

        Ok(report)
    }
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<u64, Error> {
    let mut file = File::create(path).await?;
    let mut stream = pin!(response.bytes_stream());
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk: Bytes = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}
