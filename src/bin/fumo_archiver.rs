use clap::Parser;
use fumo_archiver::{
    Settings,
    attachments::extract_attachment_urls,
    catalog::build_catalog,
    cli::{ArchiverCli, ArchiverCommand},
    database::Database,
    downloader::Downloader,
    error::Error,
    manifest::AttachmentManifest,
    paginator::{DiscordChannel, retrieve_messages},
    utils::start_logging,
};
use poise::serenity_prelude::{self, GenericChannelId};
use std::num::NonZeroUsize;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = ArchiverCli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::load()?,
    };

    start_logging(&settings.log_level);
    info!("{cli:?}");

    match cli.command {
        ArchiverCommand::Crawl { channel_id, limit } => crawl(&settings, channel_id, limit).await,
        ArchiverCommand::Download => download(&settings).await,
        ArchiverCommand::Catalog { dry_run } => catalog(&settings, dry_run).await,
    }
}

async fn crawl(
    settings: &Settings,
    channel_id: Option<u64>,
    limit: Option<NonZeroUsize>,
) -> Result<(), Error> {
    let token = settings
        .discord
        .token
        .as_deref()
        .ok_or(Error::MissingSetting("discord.token"))?;
    let channel_id = channel_id.unwrap_or(settings.discord.channel_id);
    let limit = limit.or_else(|| settings.discord.message_limit.and_then(NonZeroUsize::new));

    let http = serenity_prelude::HttpBuilder::new(token).build();
    let channel = DiscordChannel::new(http, GenericChannelId::new(channel_id));

    info!("Retrieving messages of channel {channel_id}, limit={limit:?}");
    let messages = retrieve_messages(&channel, limit).await?;
    let urls = extract_attachment_urls(&messages);

    let manifest = AttachmentManifest::new(channel_id, urls);
    manifest.write_to(&settings.download.manifest).await?;

    info!(
        "Wrote {} attachment urls from {} messages to {}",
        manifest.urls.len(),
        messages.len(),
        settings.download.manifest.display()
    );
    Ok(())
}

async fn download(settings: &Settings) -> Result<(), Error> {
    let manifest = AttachmentManifest::read_from(&settings.download.manifest).await?;
    info!("Downloading {} urls", manifest.urls.len());

    let downloader = Downloader::new(Downloader::default_client()?, &settings.download.directory);
    let report = downloader.download_all(&manifest.urls).await?;

    if report.failed.is_empty() {
        info!("Downloaded all {} files", report.downloaded.len());
    } else {
        error!("Some downloads failed\n{report}");
    }
    Ok(())
}

async fn catalog(settings: &Settings, dry_run: bool) -> Result<(), Error> {
    let records = build_catalog(&settings.download.directory, &settings.catalog.cdn_base).await?;

    if dry_run {
        for record in &records {
            println!("{record}");
        }
        return Ok(());
    }

    let database = Database::connect(&settings.catalog).await?;
    let result = database.insert_all(&records).await;
    database.disconnect().await;

    let inserted = result?;
    info!("Inserted all fumos ({inserted})");
    Ok(())
}
