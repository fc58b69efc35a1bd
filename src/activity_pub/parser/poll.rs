//! Parsing of federated polls (AS2 `Question` objects).

use anyhow::{Result, bail};
use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;

use crate::activity_pub::Object;

use super::datetime::parse_timestamp;

/// Wraps one inbound `Question` document.
pub struct PollParser<'a> {
    json: Object<'a>,
}

impl<'a> PollParser<'a> {
    pub fn new(json: &'a Value) -> Self {
        PollParser {
            json: Object::from(json),
        }
    }

    /// A poll is a `Question` carrying an `anyOf` or `oneOf` answer set.
    /// Callers must check this before trusting the other accessors — the
    /// one precondition this parser does not defend itself against.
    pub fn valid(&self) -> bool {
        self.json.type_is("Question") && self.items().is_some()
    }

    /// Answer options in document order. Options prefer `name` over
    /// `content`; items providing neither are silently dropped.
    pub fn options(&self) -> Vec<String> {
        let Some(items) = self.items() else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| {
                item.get("name")
                    .and_then(Value::as_str)
                    .filter(|name| !name.is_empty())
                    .or_else(|| item.get("content").and_then(Value::as_str))
                    .map(str::to_owned)
            })
            .collect()
    }

    /// Multiple choice iff the options came as `anyOf`; `oneOf` means pick
    /// one. This is the sole signal.
    pub fn multiple(&self) -> bool {
        self.json.has("anyOf")
    }

    /// When the poll closes. A string `closed` is the authoritative close
    /// time; any other non-`false` value means "closed as of now"; else
    /// `endTime` gives the scheduled end. Unparsable values degrade to
    /// `None`.
    pub fn expires_at(&self) -> Option<Timestamp> {
        match self.json.get("closed") {
            Some(Value::String(closed)) => parse_timestamp(closed),
            Some(value) if !matches!(value, Value::Null | Value::Bool(false)) => {
                Some(Timestamp::now())
            }
            _ => self.json.get_str("endTime").and_then(parse_timestamp),
        }
    }

    pub fn voters_count(&self) -> Option<u64> {
        self.json.get_u64("votersCount")
    }

    /// Per-option vote counts from each item's `replies.totalItems`,
    /// defaulting to zero.
    pub fn cached_tallies(&self) -> Vec<u64> {
        let Some(items) = self.items() else {
            return Vec::new();
        };
        items
            .iter()
            .map(|item| {
                item.get("replies")
                    .and_then(|replies| replies.get("totalItems"))
                    .and_then(Value::as_u64)
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Whether this poll differs from a stored one in a way that warrants
    /// re-processing. Only the options and the choice mode count; vote
    /// tallies churn constantly and never do.
    pub fn significantly_changes(&self, previous: &PollSnapshot) -> bool {
        self.options() != previous.options || self.multiple() != previous.multiple
    }

    pub fn parse(&self) -> PollParseResult {
        PollParseResult {
            options: self.options(),
            multiple: self.multiple(),
            expires_at: self.expires_at(),
            voters_count: self.voters_count(),
            cached_tallies: self.cached_tallies(),
        }
    }

    fn items(&self) -> Option<&Vec<Value>> {
        for prop in ["anyOf", "oneOf"] {
            if let Some(Value::Array(items)) = self.json.get(prop) {
                return Some(items);
            }
        }
        None
    }
}

/// Normalized poll record; see [`PollParser::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollParseResult {
    pub options: Vec<String>,
    pub multiple: bool,
    pub expires_at: Option<Timestamp>,
    pub voters_count: Option<u64>,
    pub cached_tallies: Vec<u64>,
}

impl TryFrom<&Value> for PollParseResult {
    type Error = anyhow::Error;

    fn try_from(json: &Value) -> Result<Self> {
        let parser = PollParser::new(json);
        if !parser.valid() {
            bail!("object is not a recognized Question");
        }
        Ok(parser.parse())
    }
}

/// Previously persisted poll state, supplied by the caller for change
/// detection.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSnapshot {
    pub options: Vec<String>,
    pub multiple: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{PollParseResult, PollParser, PollSnapshot};

    fn question() -> Value {
        json!({
            "id": "https://mastodon.example/users/alice/statuses/67890",
            "type": "Question",
            "content": "Favourite season?",
            "endTime": "2025-01-01T00:00:00Z",
            "votersCount": 10,
            "oneOf": [
                {"type": "Note", "name": "Spring", "replies": {"type": "Collection", "totalItems": 4}},
                {"type": "Note", "name": "Autumn", "replies": {"type": "Collection", "totalItems": 6}}
            ]
        })
    }

    #[test]
    fn validity_boundary() {
        assert!(PollParser::new(&question()).valid());
        // Type tolerance: an array type containing Question still counts.
        let multi_typed = json!({
            "type": ["Question", "Other"],
            "anyOf": [{"name": "A"}]
        });
        assert!(PollParser::new(&multi_typed).valid());
        // A Note is not a poll no matter what options it carries.
        let note = json!({"type": "Note", "anyOf": [{"name": "A"}]});
        assert!(!PollParser::new(&note).valid());
        // A Question with no answer set is not a poll either.
        let bare = json!({"type": "Question", "content": "?"});
        assert!(!PollParser::new(&bare).valid());
    }

    #[test]
    fn options_prefer_name_and_drop_blanks() {
        let poll = json!({
            "type": "Question",
            "oneOf": [
                {"name": "First"},
                {"content": "Second"},
                {"name": "", "content": "Third"},
                {"type": "Note"},
                {"name": 42}
            ]
        });
        assert_eq!(
            PollParser::new(&poll).options(),
            ["First", "Second", "Third"]
        );
    }

    #[test]
    fn any_of_signals_multiple_choice() {
        let single = question();
        assert!(!PollParser::new(&single).multiple());
        let multi = json!({"type": "Question", "anyOf": [{"name": "A"}, {"name": "B"}]});
        assert!(PollParser::new(&multi).multiple());
    }

    #[test]
    fn expires_at_variants() {
        let scheduled = PollParser::new(&question()).expires_at();
        assert_eq!(
            scheduled,
            "2025-01-01T00:00:00Z".parse().ok(),
        );

        let closed_at = json!({
            "type": "Question",
            "closed": "2024-06-01T12:00:00Z",
            "endTime": "2025-01-01T00:00:00Z",
            "oneOf": []
        });
        assert_eq!(
            PollParser::new(&closed_at).expires_at(),
            "2024-06-01T12:00:00Z".parse().ok(),
        );

        // A bare `closed: true` means closed as of receipt.
        let closed_now = json!({"type": "Question", "closed": true, "oneOf": []});
        assert!(PollParser::new(&closed_now).expires_at().is_some());

        // `closed: false` falls through to endTime.
        let open = json!({
            "type": "Question",
            "closed": false,
            "endTime": "2025-01-01T00:00:00Z",
            "oneOf": []
        });
        assert_eq!(
            PollParser::new(&open).expires_at(),
            "2025-01-01T00:00:00Z".parse().ok(),
        );

        let garbled = json!({"type": "Question", "closed": "whenever", "oneOf": []});
        assert_eq!(PollParser::new(&garbled).expires_at(), None);

        let nothing = json!({"type": "Question", "oneOf": []});
        assert_eq!(PollParser::new(&nothing).expires_at(), None);
    }

    #[test]
    fn tallies_default_to_zero() {
        let poll = json!({
            "type": "Question",
            "oneOf": [
                {"name": "A", "replies": {"totalItems": 3}},
                {"name": "B"},
                {"name": "C", "replies": "not a collection"}
            ]
        });
        assert_eq!(PollParser::new(&poll).cached_tallies(), [3, 0, 0]);
        assert_eq!(PollParser::new(&question()).voters_count(), Some(10));
    }

    #[test]
    fn try_from_gates_on_validity() {
        let record = PollParseResult::try_from(&question()).unwrap();
        assert_eq!(record.options, ["Spring", "Autumn"]);
        assert_eq!(record.cached_tallies, [4, 6]);
        assert!(!record.multiple);

        let note = json!({"type": "Note", "content": "not a poll"});
        assert!(PollParseResult::try_from(&note).is_err());
    }

    #[test]
    fn change_detection_ignores_tallies() {
        let poll = question();
        let parser = PollParser::new(&poll);
        let unchanged = PollSnapshot {
            options: vec!["Spring".into(), "Autumn".into()],
            multiple: false,
        };
        assert!(!parser.significantly_changes(&unchanged));

        let reworded = PollSnapshot {
            options: vec!["Spring".into(), "Winter".into()],
            multiple: false,
        };
        assert!(parser.significantly_changes(&reworded));

        let remodeled = PollSnapshot {
            options: vec!["Spring".into(), "Autumn".into()],
            multiple: true,
        };
        assert!(parser.significantly_changes(&remodeled));
    }
}
