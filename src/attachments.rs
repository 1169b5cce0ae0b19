use tracing::{debug, info, instrument};

use crate::messages::ArchivedMessage;

/// Flatten the attachment urls of all messages, keeping message and attachment order.
///
/// Urls that show up in several messages are kept every time.
#[instrument(skip_all)]
pub fn extract_attachment_urls(messages: &[ArchivedMessage]) -> Vec<String> {
    let mut urls = Vec::with_capacity(messages.len());

    for message in messages {
        if !message.has_attachments() {
            info!("Skipping message without attachment: {}", message.id);
            continue;
        }

        debug!("Found attachments in {message}");
        urls.extend(message.attachments.iter().map(|attachment| attachment.url.clone()));
    }

    urls
}
