use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct ArchiverCli {
    /// Settings file to use instead of `./settings.toml`
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ArchiverCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ArchiverCommand {
    /// Walk the channel history and write the attachment manifest
    Crawl {
        #[arg(short, long)]
        channel_id: Option<u64>,
        /// Stop after this many messages
        #[arg(short, long)]
        limit: Option<NonZeroUsize>,
    },
    /// Download every url of the attachment manifest
    Download,
    /// Insert the downloaded files into the catalog
    Catalog {
        /// Print the records instead of inserting them
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_crawl_overrides() {
        let args = ["fumo_archiver", "crawl", "--channel-id", "42", "-l", "10"];
        let cli = ArchiverCli::try_parse_from(args).unwrap();

        match cli.command {
            ArchiverCommand::Crawl { channel_id, limit } => {
                assert_eq!(channel_id, Some(42));
                assert_eq!(limit, NonZeroUsize::new(10));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn settings_flag_works_after_subcommand() {
        let cli = ArchiverCli::try_parse_from([
            "fumo_archiver",
            "catalog",
            "--dry-run",
            "--settings",
            "x.toml",
        ])
        .unwrap();

        assert_eq!(cli.settings, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, ArchiverCommand::Catalog { dry_run: true }));
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(ArchiverCli::try_parse_from(["fumo_archiver", "crawl", "--limit", "0"]).is_err());
    }
}
