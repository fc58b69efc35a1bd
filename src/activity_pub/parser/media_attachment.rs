//! Parsing of federated media attachments (Document/Image/Video nodes).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::activity_pub::Object;
use crate::config::ParserConfig;

use super::remote_url::{normalize_url, url_to_href};

/// The Base83 alphabet blurhash strings are encoded in, in value order.
const BASE83_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz#$%*+,-.:;=?@[]^_{|}~";

static BLURHASH_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z#$%*+,\-.:;=?@\[\]\^_{|}~]+$").unwrap());

/// Wraps one inbound attachment node.
pub struct MediaAttachmentParser<'a> {
    json: Object<'a>,
    config: ParserConfig,
}

impl<'a> MediaAttachmentParser<'a> {
    pub fn new(json: &'a Value) -> Self {
        Self::with_config(json, ParserConfig::default())
    }

    pub fn with_config(json: &'a Value, config: ParserConfig) -> Self {
        MediaAttachmentParser {
            json: Object::from(json),
            config,
        }
    }

    pub fn remote_url(&self) -> Option<String> {
        normalize_url(url_to_href(self.json.get("url"), None), &self.config)
    }

    pub fn thumbnail_remote_url(&self) -> Option<String> {
        let icon = self.json.get_node_object("icon")?;
        normalize_url(icon.get_str("url"), &self.config)
    }

    /// Alt text: `summary` preferred, `name` as fallback, trimmed and
    /// truncated to the configured grapheme limit.
    pub fn description(&self) -> Option<String> {
        let text = self
            .json
            .get_str("summary")
            .filter(|summary| !summary.trim().is_empty())
            .or_else(|| self.json.get_str("name"))?;
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(truncate_graphemes(text, self.config.max_description_length))
    }

    /// The raw `focalPoint` value; consumers interpret the coordinate pair.
    pub fn focus_point(&self) -> Option<&Value> {
        self.json.get("focalPoint").filter(|v| !v.is_null())
    }

    /// The blurhash placeholder, accepted only when well-formed: Base83
    /// charset, component counts each at most 5, and a payload length that
    /// matches the declared component grid. Oversized or malformed hashes
    /// are dropped silently.
    pub fn blurhash(&self) -> Option<&str> {
        let blurhash = self.json.get_str("blurhash")?;
        if supported_blurhash(blurhash) {
            Some(blurhash)
        } else {
            debug!(target: "apub", "rejected malformed blurhash");
            None
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.json.get_str("mediaType")
    }

    /// Whether this attachment differs from a stored one in a way that
    /// warrants re-processing: either remote URL or the description.
    pub fn significantly_changes(&self, previous: &MediaAttachmentSnapshot) -> bool {
        self.remote_url() != previous.remote_url
            || self.thumbnail_remote_url() != previous.thumbnail_remote_url
            || self.description() != previous.description
    }

    pub fn parse(&self) -> MediaAttachmentParseResult {
        MediaAttachmentParseResult {
            remote_url: self.remote_url(),
            thumbnail_remote_url: self.thumbnail_remote_url(),
            description: self.description(),
            focus_point: self.focus_point().cloned(),
            blurhash: self.blurhash().map(str::to_owned),
            content_type: self.content_type().map(str::to_owned),
        }
    }
}

fn truncate_graphemes(value: &str, max: usize) -> String {
    value.graphemes(true).take(max).collect()
}

fn supported_blurhash(blurhash: &str) -> bool {
    BLURHASH_CHARSET.is_match(blurhash)
        && matches!(blurhash_components(blurhash), Some((x, y)) if x <= 5 && y <= 5)
}

/// Decode the component grid from a blurhash's size flag and check the
/// payload length against it.
fn blurhash_components(blurhash: &str) -> Option<(usize, usize)> {
    let first = blurhash.chars().next()?;
    let size_flag = BASE83_ALPHABET.find(first)?;
    let x = size_flag % 9 + 1;
    let y = size_flag / 9 + 1;
    if blurhash.len() != 4 + 2 * x * y {
        return None;
    }
    Some((x, y))
}

/// Normalized attachment record; see [`MediaAttachmentParser::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaAttachmentParseResult {
    pub remote_url: Option<String>,
    pub thumbnail_remote_url: Option<String>,
    pub description: Option<String>,
    pub focus_point: Option<Value>,
    pub blurhash: Option<String>,
    pub content_type: Option<String>,
}

/// Previously persisted attachment state, supplied by the caller for
/// change detection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaAttachmentSnapshot {
    pub remote_url: Option<String>,
    pub thumbnail_remote_url: Option<String>,
    pub description: Option<String>,
}
