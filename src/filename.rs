//! Turning attachment urls into local file names and back into catalog ids.
//!
//! Discord serves attachments as `/attachments/<channel id>/<attachment id>/<original name>`.
//! The attachment id is unique, so it becomes the local name, keeping the original extension.

use url::Url;

/// Ways an url or a file name can fail to fit the expected shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    #[error("Url has {found} path segment(s), expected at least 4: {url}")]
    TooFewSegments { url: String, found: usize },

    #[error("Identifier is empty in: {0}")]
    EmptyIdentifier(String),

    #[error("Could not determine file extension of: {0}")]
    MissingExtension(String),
}

/// Index of the attachment id inside [Url::path_segments].
/// The leading empty segment of the raw path is not counted there,
/// so this is the fourth slash delimited component of the path.
const ID_SEGMENT: usize = 2;

/// Derive the local file name `<attachment id>.<extension>` for an attachment url
pub fn derive_filename(url: &Url) -> Result<String, FilenameError> {
    let segments: Vec<&str> = url.path_segments().map(Iterator::collect).unwrap_or_default();

    if segments.len() <= ID_SEGMENT + 1 {
        return Err(FilenameError::TooFewSegments {
            url: url.to_string(),
            found: segments.len(),
        });
    }

    let id = segments[ID_SEGMENT];
    if id.is_empty() {
        return Err(FilenameError::EmptyIdentifier(url.to_string()));
    }

    let last = segments[segments.len() - 1];
    let extension = match last.rsplit_once('.') {
        Some((_, extension)) if !extension.is_empty() => extension,
        _ => return Err(FilenameError::MissingExtension(url.to_string())),
    };

    Ok(format!("{id}.{extension}"))
}

/// Split a local file name into `(id, extension)` at the last dot
pub fn split_file_name(name: &str) -> Result<(&str, &str), FilenameError> {
    let (id, extension) = name
        .rsplit_once('.')
        .filter(|(_, extension)| !extension.is_empty())
        .ok_or_else(|| FilenameError::MissingExtension(name.to_owned()))?;

    if id.is_empty() {
        return Err(FilenameError::EmptyIdentifier(name.to_owned()));
    }

    Ok((id, extension))
}
