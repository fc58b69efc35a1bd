//! Parsing of custom emoji (`toot:Emoji` tag nodes).

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;

use crate::activity_pub::Object;
use crate::config::ParserConfig;

use super::datetime::parse_timestamp;
use super::remote_url::normalize_url;

/// Wraps one inbound `Emoji` tag node.
pub struct CustomEmojiParser<'a> {
    json: Object<'a>,
    config: ParserConfig,
}

impl<'a> CustomEmojiParser<'a> {
    pub fn new(json: &'a Value) -> Self {
        Self::with_config(json, ParserConfig::default())
    }

    pub fn with_config(json: &'a Value, config: ParserConfig) -> Self {
        CustomEmojiParser {
            json: Object::from(json),
            config,
        }
    }

    pub fn uri(&self) -> Option<&str> {
        self.json.id()
    }

    /// The emoji name with its colon fencing stripped: `:blobcat:` →
    /// `blobcat`.
    pub fn shortcode(&self) -> Option<String> {
        self.json.get_str("name").map(|name| name.replace(':', ""))
    }

    pub fn image_remote_url(&self) -> Option<String> {
        let icon = self.json.get_node_object("icon")?;
        normalize_url(icon.get_str("url"), &self.config)
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.json.get_str("updated").and_then(parse_timestamp)
    }

    /// Whether the emoji image needs re-fetching: the image moved, or the
    /// remote end stamped a newer `updated` than we stored.
    pub fn significantly_changes(&self, previous: &CustomEmojiSnapshot) -> bool {
        if self.image_remote_url() != previous.image_remote_url {
            return true;
        }
        match (self.updated_at(), previous.updated_at) {
            (Some(fresh), Some(stored)) => fresh > stored,
            (Some(_), None) => true,
            _ => false,
        }
    }

    pub fn parse(&self) -> CustomEmojiParseResult {
        CustomEmojiParseResult {
            uri: self.uri().map(str::to_owned),
            shortcode: self.shortcode(),
            image_remote_url: self.image_remote_url(),
            updated_at: self.updated_at(),
        }
    }
}

/// Normalized emoji record; see [`CustomEmojiParser::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomEmojiParseResult {
    pub uri: Option<String>,
    pub shortcode: Option<String>,
    pub image_remote_url: Option<String>,
    pub updated_at: Option<Timestamp>,
}

/// Previously persisted emoji state, supplied by the caller for change
/// detection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomEmojiSnapshot {
    pub image_remote_url: Option<String>,
    pub updated_at: Option<Timestamp>,
}
