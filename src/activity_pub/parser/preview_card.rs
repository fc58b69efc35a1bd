//! Parsing of link preview cards attached to federated statuses.

use serde::Serialize;
use serde_json::Value;

use crate::activity_pub::Object;
use crate::config::ParserConfig;

use super::remote_url::{normalize_url, url_to_href};

/// Wraps one inbound preview-card node (a `Page`/`Link`-ish object).
pub struct PreviewCardParser<'a> {
    json: Object<'a>,
    config: ParserConfig,
}

impl<'a> PreviewCardParser<'a> {
    pub fn new(json: &'a Value) -> Self {
        Self::with_config(json, ParserConfig::default())
    }

    pub fn with_config(json: &'a Value, config: ParserConfig) -> Self {
        PreviewCardParser {
            json: Object::from(json),
            config,
        }
    }

    pub fn url(&self) -> Option<String> {
        normalize_url(url_to_href(self.json.get("url"), None), &self.config)
            .or_else(|| normalize_url(self.json.id(), &self.config))
    }

    pub fn parse(&self) -> PreviewCardParseResult {
        PreviewCardParseResult { url: self.url() }
    }
}

/// Normalized preview-card record; see [`PreviewCardParser::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewCardParseResult {
    pub url: Option<String>,
}
