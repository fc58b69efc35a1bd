//! Remote URL resolution and normalization.

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ParserConfig;
use crate::json_ld::as_array;

/// Resolve an AS2 `url` property to a single href. The value may be a bare
/// string, a Link object, or an array of either. With a `preferred_type`,
/// the first entry whose `mediaType` matches wins; otherwise the first
/// entry.
pub(crate) fn url_to_href<'a>(
    value: Option<&'a Value>,
    preferred_type: Option<&str>,
) -> Option<&'a str> {
    let candidates = as_array(value);
    let candidate = preferred_type
        .and_then(|ty| {
            candidates
                .iter()
                .find(|link| link.get("mediaType").and_then(Value::as_str) == Some(ty))
        })
        .or_else(|| candidates.first())?;
    match candidate {
        Value::String(href) => Some(href),
        Value::Object(map) => map.get("href").and_then(Value::as_str),
        _ => None,
    }
}

/// Parse and normalize a remote URL, rejecting schemes outside the
/// configured allowlist. Parse failures degrade to `None`, never propagate.
pub(crate) fn normalize_url(value: Option<&str>, config: &ParserConfig) -> Option<String> {
    let raw = value?;
    match Url::parse(raw) {
        Ok(url) if config.allows_scheme(url.scheme()) => Some(url.to_string()),
        Ok(url) => {
            debug!(target: "apub", scheme = url.scheme(), "rejected remote URL with unsupported scheme");
            None
        }
        Err(error) => {
            debug!(target: "apub", %error, "rejected malformed remote URL");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::ParserConfig;

    use super::{normalize_url, url_to_href};

    #[test]
    fn href_from_string_link_and_array() {
        assert_eq!(
            url_to_href(Some(&json!("https://example.com/1")), None),
            Some("https://example.com/1")
        );
        assert_eq!(
            url_to_href(
                Some(&json!({"type": "Link", "href": "https://example.com/2"})),
                None
            ),
            Some("https://example.com/2")
        );
        let links = json!([
            {"type": "Link", "mediaType": "application/activity+json", "href": "https://example.com/ap"},
            {"type": "Link", "mediaType": "text/html", "href": "https://example.com/html"}
        ]);
        assert_eq!(
            url_to_href(Some(&links), Some("text/html")),
            Some("https://example.com/html")
        );
        // No preference: first entry wins.
        assert_eq!(
            url_to_href(Some(&links), None),
            Some("https://example.com/ap")
        );
        // Preferred type absent: fall back to the first entry.
        assert_eq!(
            url_to_href(Some(&links), Some("image/png")),
            Some("https://example.com/ap")
        );
        assert_eq!(url_to_href(None, None), None);
        assert_eq!(url_to_href(Some(&json!(42)), None), None);
    }

    #[test]
    fn normalization_and_scheme_policy() {
        let config = ParserConfig::default();
        assert_eq!(
            normalize_url(Some("HTTP://EXAMPLE.com/media/1.png"), &config),
            Some("http://example.com/media/1.png".to_string())
        );
        assert_eq!(normalize_url(Some("ftp://example.com/1.png"), &config), None);
        assert_eq!(
            normalize_url(Some("data:image/png;base64,AAAA"), &config),
            None
        );
        assert_eq!(normalize_url(Some("not a url"), &config), None);
        assert_eq!(normalize_url(None, &config), None);
    }

    #[test]
    fn allowlist_is_a_policy_hook() {
        let config = ParserConfig {
            allowed_url_schemes: vec!["https".to_string(), "ipfs".to_string()],
            ..ParserConfig::default()
        };
        assert!(normalize_url(Some("ipfs://bafy/1.png"), &config).is_some());
        assert_eq!(normalize_url(Some("http://example.com/1"), &config), None);
    }
}
