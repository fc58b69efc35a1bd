//! One parser per federated entity type.
//!
//! Each parser wraps one raw JSON document plus optional caller-supplied
//! context and exposes typed accessors with the fallback chains remote
//! content requires. Accessors recompute from the wrapped JSON on every
//! call; a parser holds no mutable state, so the same instance can be
//! queried repeatedly without drift and arbitrarily many parses can run
//! concurrently with zero coordination.

mod custom_emoji;
mod datetime;
mod interaction_policy;
mod media_attachment;
mod poll;
mod preview_card;
mod remote_url;
mod status;

pub use custom_emoji::{CustomEmojiParseResult, CustomEmojiParser, CustomEmojiSnapshot};
pub use interaction_policy::{
    InteractionPolicyParser, PolicyScope, automatic_flags, flag, manual_flags,
};
pub use media_attachment::{
    MediaAttachmentParseResult, MediaAttachmentParser, MediaAttachmentSnapshot,
};
pub use poll::{PollParseResult, PollParser, PollSnapshot};
pub use preview_card::{PreviewCardParseResult, PreviewCardParser};
pub use status::{StatusParseResult, StatusParser, StatusParserOptions, Visibility};
