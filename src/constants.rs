//! Constants
//!
//! See invidividual items' description

/// The user agent for the reqwest instance that's downloading attachments
pub const USER_AGENT: &str = concat!("fumo-archiver, ", env!("CARGO_PKG_VERSION"));

/// Discord hands out at most this many messages per request
pub const MAX_PAGE_SIZE: u8 = 100;

/// Version written into new attachment manifests
pub const MANIFEST_VERSION: u32 = 1;

/// Channel the fumos have been posted in
pub const DEFAULT_CHANNEL_ID: u64 = 844_262_973_043_114_044;

pub const DEFAULT_LOG_LEVEL: &str = "fumo_archiver=info,warn";

pub const DEFAULT_DOWNLOAD_DIRECTORY: &str = "downloads";

pub const DEFAULT_MANIFEST: &str = "attachments.json";

pub const DEFAULT_DATABASE: &str = "fumo-api";

pub const DEFAULT_COLLECTION: &str = "fumos";

/// Where the cdn mirrors the download directory
pub const DEFAULT_CDN_BASE: &str = "https://cdn.nosesisaid.com/";
