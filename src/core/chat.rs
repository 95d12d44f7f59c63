//! In-memory conversation shown by the TUI.
//!
//! The history is bounded: once [`MAX_MESSAGES`] is reached the oldest
//! message is dropped. Nothing is persisted.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::catalog::parse_catalog;
use crate::core::repair::VIEW_MORE_LABEL;
use crate::core::response::{NormalizedResponse, ProductRecord, ProductReply};
use crate::core::text::{DEFAULT_TRAIL, DEFAULT_WORD_LIMIT, truncate_words};

/// Maximum number of messages kept on screen.
pub const MAX_MESSAGES: usize = 200;

pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI assistant. How can I help you today?";
pub const CLEARED_MESSAGE: &str = "Chat cleared. How can I help you?";
pub const SETUP_HINT: &str =
    "🌐 Chat ready. Press F2 to set up the webhook URL of your assistant workflow.";
pub const RELAY_NOTICE: &str = "🔧 CORS relay is enabled. Requests go through third-party relays; \
     disable it once the webhook is reachable directly.";
pub const CONFIGURED_MESSAGE: &str = "🔗 Webhook URL configured successfully!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// What a message displays.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBody {
    Text { text: String },
    Products(ProductReply),
}

impl MessageBody {
    /// Body for an assistant reply. Plain text that reads as a bulleted
    /// product listing is lifted into a catalog.
    pub fn from_response(response: NormalizedResponse) -> Self {
        match response {
            NormalizedResponse::Products(reply) => MessageBody::Products(reply),
            NormalizedResponse::Plain(reply) => match parse_catalog(&reply.text) {
                Some(catalog) => {
                    log::debug!("plain reply parsed as catalog ({} products)", catalog.products.len());
                    MessageBody::Products(catalog)
                }
                None => MessageBody::Text { text: reply.text },
            },
        }
    }

    /// Render for a plain terminal (single-prompt mode).
    pub fn to_plain_text(&self) -> String {
        match self {
            MessageBody::Text { text } => text.clone(),
            MessageBody::Products(reply) => {
                let mut parts: Vec<String> = Vec::new();
                if let Some(intro) = &reply.intro_text {
                    parts.push(intro.clone());
                }
                for (i, product) in reply.products.iter().enumerate() {
                    parts.push(product_lines(i + 1, product).join("\n"));
                }
                if let Some(outro) = &reply.outro_text {
                    parts.push(outro.clone());
                }
                parts.join("\n\n")
            }
        }
    }
}

/// Title line plus indented detail lines for one product card.
pub fn product_lines(position: usize, product: &ProductRecord) -> Vec<String> {
    let title = product.title.as_deref().unwrap_or("Product");
    let mut lines = vec![format!("{}. {}", position, title)];
    match (&product.price, &product.old_price) {
        (Some(price), Some(old)) => lines.push(format!("   💰 {} (was {})", price, old)),
        (Some(price), None) => lines.push(format!("   💰 {}", price)),
        (None, Some(old)) => lines.push(format!("   💰 was {}", old)),
        (None, None) => {}
    }
    if let Some(availability) = &product.availability {
        lines.push(format!("   📦 {}", availability));
    }
    if let Some(description) = &product.description {
        lines.push(format!(
            "   {}",
            truncate_words(description, DEFAULT_WORD_LIMIT, DEFAULT_TRAIL)
        ));
    }
    if let Some(link) = &product.link {
        lines.push(format!("   {} {}", VIEW_MORE_LABEL, link));
    }
    lines
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
    pub body: MessageBody,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[derive(Debug)]
pub struct Conversation {
    messages: VecDeque<ChatMessage>,
    next_id: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// New conversation opened by the welcome message.
    pub fn new() -> Self {
        let mut conversation = Conversation {
            messages: VecDeque::new(),
            next_id: 1,
        };
        conversation.push_assistant_text(WELCOME_MESSAGE);
        conversation
    }

    pub fn messages(&self) -> impl DoubleEndedIterator<Item = &ChatMessage> + ExactSizeIterator {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.back()
    }

    pub fn push_user(&mut self, text: &str) -> &ChatMessage {
        self.push(
            Sender::User,
            MessageBody::Text {
                text: text.trim().to_string(),
            },
        )
    }

    pub fn push_assistant_text(&mut self, text: &str) -> &ChatMessage {
        self.push(
            Sender::Assistant,
            MessageBody::Text {
                text: text.to_string(),
            },
        )
    }

    /// Append the assistant message built from a normalized reply.
    pub fn push_reply(&mut self, response: NormalizedResponse) -> &ChatMessage {
        self.push(Sender::Assistant, MessageBody::from_response(response))
    }

    /// Drop every message and start over with the cleared notice. Ids restart at 1.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.next_id = 1;
        self.push_assistant_text(CLEARED_MESSAGE);
    }

    /// Link of the first product of the most recent catalog that has one.
    pub fn latest_product_link(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match &m.body {
            MessageBody::Products(reply) => reply.products.iter().find_map(|p| p.link.as_deref()),
            MessageBody::Text { .. } => None,
        })
    }

    fn push(&mut self, sender: Sender, body: MessageBody) -> &ChatMessage {
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        let message = ChatMessage {
            id: self.next_id,
            sender,
            timestamp: Local::now(),
            body,
        };
        self.next_id += 1;
        self.messages.push_back(message);
        &self.messages[self.messages.len() - 1]
    }
}
