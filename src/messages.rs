use std::fmt::Display;

use poise::serenity_prelude::{Attachment, Message};

/// The parts of a channel message the archiver cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedMessage {
    pub id: u64,
    pub attachments: Vec<AttachmentRef>,
}

impl ArchivedMessage {
    pub fn new(id: u64, attachments: impl Into<Vec<AttachmentRef>>) -> Self {
        Self {
            id,
            attachments: attachments.into(),
        }
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

impl From<&Message> for ArchivedMessage {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.get(),
            attachments: message.attachments.iter().map(AttachmentRef::from).collect(),
        }
    }
}

impl Display for ArchivedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}]", self.id)?;
        for attachment in &self.attachments {
            writeln!(f, "  - {attachment}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    pub url: String,
    pub filename: String,
    pub content_type: Option<String>,
}

impl AttachmentRef {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            content_type: None,
        }
    }
}

impl From<&Attachment> for AttachmentRef {
    fn from(attachment: &Attachment) -> Self {
        Self {
            url: attachment.url.to_string(),
            filename: attachment.filename.to_string(),
            content_type: attachment.content_type.as_ref().map(ToString::to_string),
        }
    }
}

impl Display for AttachmentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.content_type {
            Some(content_type) => write!(f, "{} ({content_type}) {}", self.filename, self.url),
            None => write!(f, "{} {}", self.filename, self.url),
        }
    }
}
