//! Parsing of federated statuses (Notes, Articles, Questions, …).

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::activity_pub::{Object, vocab};
use crate::json_ld::{as_array, equals_or_includes, value_or_id};
use crate::locale;

use super::datetime::{parse_bounded_timestamp, parse_timestamp};
use super::interaction_policy::{self, PolicyScope};
use super::remote_url::url_to_href;

/// Who a status is visible to, derived from its `to`/`cc` audiences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
}

/// Caller-supplied context for [`StatusParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusParserOptions<'a> {
    /// The author's followers collection, used for visibility and policy
    /// resolution.
    pub followers_collection_uri: Option<&'a str>,
    /// The author's own actor URI.
    pub actor_uri: Option<&'a str>,
    /// Parse this object instead of the activity's embedded one.
    pub object: Option<&'a Value>,
}

/// Wraps one inbound status document, either a bare object or an Activity
/// carrying one under `object`.
pub struct StatusParser<'a> {
    json: Object<'a>,
    object: Object<'a>,
    followers_collection_uri: Option<&'a str>,
    actor_uri: Option<&'a str>,
}

impl<'a> StatusParser<'a> {
    pub fn new(json: &'a Value, options: StatusParserOptions<'a>) -> Self {
        let embedded = json.get("object").filter(|v| !v.is_null());
        let object = options.object.or(embedded).unwrap_or(json);
        StatusParser {
            json: Object::from(json),
            object: Object::from(object),
            followers_collection_uri: options.followers_collection_uri,
            actor_uri: options.actor_uri,
        }
    }

    /// The status URI. `bear:` ids — a relay/bridging convention — carry
    /// the real object URI in their `u` query parameter; a malformed
    /// `bear:` URI degrades to the raw id.
    pub fn uri(&self) -> Option<String> {
        let id = self.object.id()?;
        if id.starts_with("bear:") {
            if let Some(uri) = bear_uri(id) {
                return Some(uri);
            }
        }
        Some(id.to_owned())
    }

    /// The human-facing permalink: the `url` entry with a `text/html` media
    /// type, else the first `url` entry.
    pub fn url(&self) -> Option<&str> {
        url_to_href(self.object.get("url"), Some("text/html"))
    }

    pub fn text(&self) -> Option<&str> {
        self.field_with_language_map("content", "contentMap")
    }

    pub fn spoiler_text(&self) -> Option<&str> {
        self.field_with_language_map("summary", "summaryMap")
    }

    pub fn title(&self) -> Option<&str> {
        self.field_with_language_map("name", "nameMap")
    }

    /// `published`, rejected when unparsable or outside years [0, 9999].
    pub fn created_at(&self) -> Option<Timestamp> {
        self.object
            .get_str("published")
            .and_then(parse_bounded_timestamp)
    }

    /// `updated`, parsed leniently; edits carry no year guard.
    pub fn edited_at(&self) -> Option<Timestamp> {
        self.object.get_str("updated").and_then(parse_timestamp)
    }

    pub fn is_reply(&self) -> bool {
        self.object.has("inReplyTo")
    }

    pub fn in_reply_to_uri(&self) -> Option<&str> {
        self.object.get_node_iri("inReplyTo")
    }

    pub fn sensitive(&self) -> bool {
        self.object.get_bool("sensitive").unwrap_or(false)
    }

    /// Audience-derived visibility. The precedence — to-public, cc-public,
    /// to-followers, else direct — is load-bearing for federation
    /// compatibility; in particular `to=[followers], cc=[public]` is
    /// Unlisted, not Private, and cc is never checked for followers.
    pub fn visibility(&self) -> Visibility {
        let to = self.audience("to");
        let cc = self.audience("cc");
        if to.iter().any(|uri| vocab::is_public_collection(uri)) {
            Visibility::Public
        } else if cc.iter().any(|uri| vocab::is_public_collection(uri)) {
            Visibility::Unlisted
        } else if self
            .followers_collection_uri
            .is_some_and(|followers| to.contains(&followers))
        {
            Visibility::Private
        } else {
            Visibility::Direct
        }
    }

    /// Language of the content: the first key of whichever language map is
    /// present (content, then name, then summary), normalized against the
    /// supported-locale table and falling back to the raw code.
    pub fn language(&self) -> Option<String> {
        let raw = self.raw_language_code()?;
        Some(
            locale::normalize(raw)
                .map(str::to_owned)
                .unwrap_or_else(|| raw.to_owned()),
        )
    }

    /// `likes.totalItems` of the activity's embedded object. Unlike the
    /// other accessors this ignores any object override: counts always
    /// come from the wire document itself.
    pub fn favourites_count(&self) -> Option<u64> {
        self.counts_object().get_total_items("likes")
    }

    /// `shares.totalItems`; see [`Self::favourites_count`].
    pub fn reblogs_count(&self) -> Option<u64> {
        self.counts_object().get_total_items("shares")
    }

    /// Packed quote-approval policy from `interactionPolicy.canQuote`.
    /// Mentioned actors are implicitly allowed to quote and never count as
    /// unrecognized grants. No following tier: the followed-collection URI
    /// is not tracked, so such grants surface as UNSUPPORTED.
    pub fn quote_policy(&self) -> u32 {
        let Some(policy) = self
            .object
            .get("interactionPolicy")
            .and_then(|p| p.get("canQuote"))
        else {
            return 0;
        };
        let mentions = self.mentioned_actor_uris();
        let scope = PolicyScope {
            followers_uri: self.followers_collection_uri,
            following_uri: None,
            subject_uri: self.actor_uri,
            exempt_uris: &mentions,
        };
        interaction_policy::bitmask(&Object::from(policy), &scope)
    }

    /// The quoted status URI, across the competing fediverse conventions in
    /// interop-priority order.
    pub fn quote_uri(&self) -> Option<&str> {
        ["quote", "_misskey_quote", "quoteUrl", "quoteUri"]
            .into_iter()
            .find_map(|prop| value_or_id(self.object.get(prop)))
    }

    /// First `quoteAuthorization` entry, the approval stamp for the quote.
    pub fn quote_approval_uri(&self) -> Option<&str> {
        as_array(self.object.get("quoteAuthorization"))
            .first()
            .and_then(|v| value_or_id(Some(v)))
    }

    /// Owned snapshot of every accessor, for handing to persistence.
    pub fn parse(&self) -> StatusParseResult {
        StatusParseResult {
            uri: self.uri(),
            url: self.url().map(str::to_owned),
            text: self.text().map(str::to_owned),
            spoiler_text: self.spoiler_text().map(str::to_owned),
            title: self.title().map(str::to_owned),
            created_at: self.created_at(),
            edited_at: self.edited_at(),
            is_reply: self.is_reply(),
            sensitive: self.sensitive(),
            visibility: self.visibility(),
            language: self.language(),
            favourites_count: self.favourites_count(),
            reblogs_count: self.reblogs_count(),
            quote_policy: self.quote_policy(),
            quote_uri: self.quote_uri().map(str::to_owned),
            quote_approval_uri: self.quote_approval_uri().map(str::to_owned),
        }
    }

    fn field_with_language_map(&self, prop: &str, map_prop: &str) -> Option<&str> {
        if let Some(text) = self.object.get_str(prop) {
            return Some(text);
        }
        self.object
            .get_language_map(map_prop)?
            .values()
            .next()
            .and_then(Value::as_str)
    }

    fn raw_language_code(&self) -> Option<&str> {
        for prop in ["contentMap", "nameMap", "summaryMap"] {
            if let Some(map) = self.object.get_language_map(prop) {
                return map.keys().next().map(String::as_str);
            }
        }
        None
    }

    fn audience(&self, prop: &str) -> Vec<&str> {
        as_array(self.object.get(prop))
            .iter()
            .filter_map(|v| value_or_id(Some(v)))
            .collect()
    }

    /// The activity's own object resolution, with no override applied.
    fn counts_object(&self) -> Object<'_> {
        self.json
            .get_node_object("object")
            .unwrap_or_else(|| Object::from(self.json.as_ref()))
    }

    fn mentioned_actor_uris(&self) -> Vec<&str> {
        as_array(self.object.get("tag"))
            .iter()
            .filter(|tag| equals_or_includes(tag.get("type"), "Mention"))
            .filter_map(|tag| {
                tag.get("href")
                    .and_then(Value::as_str)
                    .or_else(|| value_or_id(tag.get("id")))
            })
            .collect()
    }
}

fn bear_uri(id: &str) -> Option<String> {
    let url = Url::parse(id).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "u")
        .map(|(_, value)| value.into_owned())
}

/// Normalized status record; see [`StatusParser::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusParseResult {
    pub uri: Option<String>,
    pub url: Option<String>,
    pub text: Option<String>,
    pub spoiler_text: Option<String>,
    pub title: Option<String>,
    pub created_at: Option<Timestamp>,
    pub edited_at: Option<Timestamp>,
    pub is_reply: bool,
    pub sensitive: bool,
    pub visibility: Visibility,
    pub language: Option<String>,
    pub favourites_count: Option<u64>,
    pub reblogs_count: Option<u64>,
    pub quote_policy: u32,
    pub quote_uri: Option<String>,
    pub quote_approval_uri: Option<String>,
}
