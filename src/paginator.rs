//! Walking a channel's history from the newest message backwards.

use std::num::NonZeroUsize;

use poise::serenity_prelude::{GenericChannelId, GetMessages, Http, MessageId};
use tracing::{debug, info, instrument};

use crate::{Error, constants::MAX_PAGE_SIZE, messages::ArchivedMessage};

/// Something that hands out pages of channel history, newest first
#[allow(async_fn_in_trait)]
pub trait MessageSource {
    /// Fetch at most `limit` messages older than `before`,
    /// or the most recent ones if `before` is `None`
    async fn fetch_page(&self, before: Option<u64>, limit: u8) -> Result<Vec<ArchivedMessage>, Error>;
}

/// A discord channel reached through the REST api
pub struct DiscordChannel {
    http: Http,
    channel_id: GenericChannelId,
}

impl DiscordChannel {
    pub fn new(http: Http, channel_id: GenericChannelId) -> Self {
        Self { http, channel_id }
    }
}

impl MessageSource for DiscordChannel {
    async fn fetch_page(&self, before: Option<u64>, limit: u8) -> Result<Vec<ArchivedMessage>, Error> {
        let mut request = GetMessages::new().limit(limit);
        if let Some(before) = before {
            request = request.before(MessageId::new(before));
        }

        let messages = self.channel_id.messages(&self.http, request).await?;
        Ok(messages.iter().map(ArchivedMessage::from).collect())
    }
}

/// Collect the channel history, newest message first.
///
/// Stops at the end of the history or once `limit` messages are collected.
#[instrument(skip_all)]
pub async fn retrieve_messages(
    source: &impl MessageSource,
    limit: Option<NonZeroUsize>,
) -> Result<Vec<ArchivedMessage>, Error> {
    let limit = limit.map_or(usize::MAX, NonZeroUsize::get);
    let mut messages: Vec<ArchivedMessage> = Vec::new();
    let mut cursor: Option<u64> = None;

    while messages.len() < limit {
        let remaining = limit - messages.len();
        let page_size = u8::try_from(remaining).map_or(MAX_PAGE_SIZE, |r| r.min(MAX_PAGE_SIZE));

        debug!("requesting {page_size} messages before {cursor:?}");
        let page = source.fetch_page(cursor, page_size).await?;
        let fetched = page.len();

        let Some(oldest) = page.last().map(|message| message.id) else {
            break;
        };
        cursor = Some(oldest);
        messages.extend(page);

        info!("Retrieved {} messages so far, last id: {oldest}", messages.len());

        if fetched < usize::from(page_size) {
            break;
        }
    }

    messages.truncate(limit);
    Ok(messages)
}
