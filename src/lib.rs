//! Ingestion core for federated ActivityStreams 2.0 content.
//!
//! Everything here is a pure, synchronous transformation: wrap one inbound
//! JSON document in a parser, call accessors, discard. The parsers tolerate
//! arbitrary spec-deviating input from remote servers — a malformed field
//! degrades to `None`/empty/false, it never panics and never raises out of
//! an accessor. Persistence, delivery and signature checking are the
//! caller's business; this crate only normalizes what came off the wire.

pub mod activity_pub;
pub mod config;
pub mod json_ld;
pub mod locale;

pub use activity_pub::Object;
pub use activity_pub::parser::{
    CustomEmojiParseResult, CustomEmojiParser, CustomEmojiSnapshot, InteractionPolicyParser,
    MediaAttachmentParseResult, MediaAttachmentParser, MediaAttachmentSnapshot, PolicyScope,
    PollParseResult, PollParser, PollSnapshot, PreviewCardParseResult, PreviewCardParser,
    StatusParseResult, StatusParser, StatusParserOptions, Visibility, automatic_flags, flag,
    manual_flags,
};
pub use config::ParserConfig;
