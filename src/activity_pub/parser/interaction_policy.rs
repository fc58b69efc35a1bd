//! Bitmask encoding of interaction and quote approval policies.
//!
//! A policy node carries two independent grant lists: `automaticApproval`
//! ("allowed outright") and `manualApproval` ("allowed subject to review").
//! Each list folds into a 16-bit tier of named flags, and the two tiers
//! pack into one `u32` — automatic high, manual low — a single storable
//! column that stays decodable by masking and shifting.
//!
//! The encoder is fail-safe about grants it does not recognize: an unknown
//! actor URI is neither treated as "allowed" nor dropped as "denied", it
//! sets [`flag::UNSUPPORTED`] so consumers can surface a
//! partially-understood policy instead of guessing.

use serde_json::Value;

use crate::activity_pub::Object;
use crate::activity_pub::vocab;
use crate::json_ld::{as_array, value_or_id};

/// Per-tier policy flags. Bit positions are a storage contract shared with
/// the persistence layer; do not renumber.
pub mod flag {
    pub const PUBLIC: u16 = 1 << 0;
    pub const FOLLOWERS: u16 = 1 << 1;
    pub const FOLLOWING: u16 = 1 << 2;
    /// At least one grant was not recognized.
    pub const UNSUPPORTED: u16 = 1 << 3;
    /// The policy names only the subject itself: interactions are off.
    pub const DISABLED: u16 = 1 << 4;
}

/// Automatic-approval tier of a packed policy.
pub fn automatic_flags(bitmask: u32) -> u16 {
    (bitmask >> 16) as u16
}

/// Manual-approval tier of a packed policy.
pub fn manual_flags(bitmask: u32) -> u16 {
    (bitmask & 0xffff) as u16
}

/// Actor URIs the encoder recognizes as structural grants rather than
/// individual actors.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyScope<'a> {
    /// The subject's followers collection.
    pub followers_uri: Option<&'a str>,
    /// The subject's following collection. Quote policies never supply
    /// this: the followed-collection URI is not tracked for remote
    /// accounts, so such grants fall through to [`flag::UNSUPPORTED`].
    pub following_uri: Option<&'a str>,
    /// The subject actor itself.
    pub subject_uri: Option<&'a str>,
    /// Actors allowed implicitly (mentioned users, for quote policies);
    /// they never count as unrecognized grants.
    pub exempt_uris: &'a [&'a str],
}

/// Fold one grant list into a 16-bit flag tier.
///
/// Recognized grants are consumed in a fixed order — public aliases,
/// followers, following, the subject itself, exemptions — and any leftover
/// entry is an unrecognized grant that sets UNSUPPORTED. A policy whose
/// only grant was the subject itself encodes as DISABLED.
pub(crate) fn subpolicy(list: Option<&Value>, scope: &PolicyScope) -> u16 {
    let mut flags = 0;
    let mut actors: Vec<&str> = as_array(list)
        .iter()
        .filter_map(|item| value_or_id(Some(item)))
        .collect();
    actors.sort_unstable();
    actors.dedup();

    if actors.iter().any(|uri| vocab::is_public_collection(uri)) {
        actors.retain(|uri| !vocab::is_public_collection(uri));
        flags |= flag::PUBLIC;
    }
    if let Some(followers) = scope.followers_uri {
        if actors.contains(&followers) {
            actors.retain(|uri| *uri != followers);
            flags |= flag::FOLLOWERS;
        }
    }
    if let Some(following) = scope.following_uri {
        if actors.contains(&following) {
            actors.retain(|uri| *uri != following);
            flags |= flag::FOLLOWING;
        }
    }
    let includes_self = scope
        .subject_uri
        .is_some_and(|subject| actors.contains(&subject));
    if let Some(subject) = scope.subject_uri {
        actors.retain(|uri| *uri != subject);
    }
    actors.retain(|uri| !scope.exempt_uris.contains(uri));

    if !actors.is_empty() {
        flags |= flag::UNSUPPORTED;
    }
    if flags == 0 && includes_self {
        flags |= flag::DISABLED;
    }
    flags
}

/// Pack both grant lists of a policy node into one `u32`.
pub(crate) fn bitmask(policy: &Object, scope: &PolicyScope) -> u32 {
    let automatic = subpolicy(policy.get("automaticApproval"), scope);
    let manual = subpolicy(policy.get("manualApproval"), scope);
    (u32::from(automatic) << 16) | u32::from(manual)
}

/// Encoder for reply/interaction policies.
pub struct InteractionPolicyParser<'a> {
    json: Object<'a>,
    scope: PolicyScope<'a>,
}

impl<'a> InteractionPolicyParser<'a> {
    /// `json` is the policy node itself — the value of
    /// `interactionPolicy.canReply` — not the enclosing status.
    pub fn new(json: &'a Value, scope: PolicyScope<'a>) -> Self {
        InteractionPolicyParser {
            json: Object::from(json),
            scope,
        }
    }

    pub fn bitmask(&self) -> u32 {
        bitmask(&self.json, &self.scope)
    }
}
