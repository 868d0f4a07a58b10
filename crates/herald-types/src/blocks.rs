//! Slack Block Kit types for webhook payloads.
//!
//! Only the block kinds produced from markdown are modelled.

use serde::{Deserialize, Serialize};

/// Maximum characters in a `header` block's text.
pub const MAX_HEADER_CHARS: usize = 150;

/// Maximum characters in a `section` block's text.
pub const MAX_SECTION_CHARS: usize = 3000;

/// A text object inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        emoji: Option<bool>,
    },
    Mrkdwn {
        text: String,
    },
}

impl TextObject {
    pub fn text(&self) -> &str {
        match self {
            TextObject::PlainText { text, .. } | TextObject::Mrkdwn { text } => text,
        }
    }
}

/// A single layout block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: TextObject },
    Section { text: TextObject },
    Divider,
}

impl Block {
    pub fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: TextObject::PlainText {
                text: text.into(),
                emoji: Some(true),
            },
        }
    }

    pub fn section(mrkdwn: impl Into<String>) -> Self {
        Block::Section {
            text: TextObject::Mrkdwn {
                text: mrkdwn.into(),
            },
        }
    }

    /// The block's text, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Header { text } | Block::Section { text } => Some(text.text()),
            Block::Divider => None,
        }
    }
}

/// Body POSTed to an incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub blocks: Vec<Block>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_wire_shape() {
        let payload = WebhookPayload {
            blocks: vec![
                Block::header("What's New"),
                Block::section("*bold* <https://x.test|link>"),
                Block::Divider,
            ],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "blocks": [
                    {"type": "header", "text": {"type": "plain_text", "text": "What's New", "emoji": true}},
                    {"type": "section", "text": {"type": "mrkdwn", "text": "*bold* <https://x.test|link>"}},
                    {"type": "divider"}
                ]
            })
        );
    }

    #[test]
    fn test_block_text_accessor() {
        assert_eq!(Block::section("hi").text(), Some("hi"));
        assert_eq!(Block::Divider.text(), None);
    }
}
