//! Well-known ActivityStreams IRIs.

pub const ACTIVITY_STREAMS_NS: &str = "https://www.w3.org/ns/activitystreams";

/// The special public collection, addressed to mean "everyone".
pub const PUBLIC_COLLECTION: &str = "https://www.w3.org/ns/activitystreams#Public";

/// Spellings of the public collection seen in the wild. Compacted documents
/// shorten the full IRI to `as:Public` or even a bare `Public`.
const PUBLIC_COLLECTION_ALIASES: [&str; 3] = [PUBLIC_COLLECTION, "as:Public", "Public"];

/// True if `iri` addresses the public collection under any known spelling.
pub fn is_public_collection(iri: &str) -> bool {
    PUBLIC_COLLECTION_ALIASES.contains(&iri)
}

#[cfg(test)]
mod tests {
    use super::is_public_collection;

    #[test]
    fn recognizes_all_aliases() {
        assert!(is_public_collection(
            "https://www.w3.org/ns/activitystreams#Public"
        ));
        assert!(is_public_collection("as:Public"));
        assert!(is_public_collection("Public"));
        assert!(!is_public_collection("https://example.com/followers"));
    }
}
