pub mod attachments;
pub mod catalog;
pub mod cli;
pub mod constants;
pub mod database;
pub mod downloader;
pub mod error;
pub mod filename;
pub mod manifest;
pub mod media;
pub mod messages;
pub mod paginator;
pub mod settings;
pub mod utils;

pub use error::Error;
pub use settings::Settings;
