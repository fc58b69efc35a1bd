//! Locale normalization for language-tagged content.
//!
//! Remote servers are sloppy about locale casing (`en-us`, `ZH-cn`, …). We
//! match case-insensitively against the supported set and hand back the
//! canonical casing. The table is read-only process-wide data; no
//! synchronization needed.

/// Locale codes the rest of the system understands, in canonical casing.
static SUPPORTED_LOCALES: &[&str] = &[
    "af", "an", "ar", "ast", "be", "bg", "bn", "br", "bs", "ca", "ckb", "co", "cs", "cy", "da",
    "de", "el", "en", "en-GB", "eo", "es", "es-AR", "es-MX", "et", "eu", "fa", "fi", "fo", "fr",
    "fr-CA", "fy", "ga", "gd", "gl", "he", "hi", "hr", "hu", "hy", "ia", "id", "ig", "io", "is",
    "it", "ja", "ka", "kab", "kk", "kn", "ko", "ku", "kw", "la", "lt", "lv", "mk", "ml", "mr",
    "ms", "my", "nl", "nn", "no", "oc", "pa", "pl", "pt-BR", "pt-PT", "ro", "ru", "sa", "sc",
    "sco", "si", "sk", "sl", "sq", "sr", "sr-Latn", "sv", "ta", "te", "th", "tr", "uk", "ur",
    "vi", "zgh", "zh-CN", "zh-HK", "zh-TW",
];

/// Look up a raw language code case-insensitively, returning the canonical
/// casing if it is supported.
pub fn normalize(code: &str) -> Option<&'static str> {
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|locale| locale.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn canonical_casing_wins() {
        assert_eq!(normalize("en"), Some("en"));
        assert_eq!(normalize("EN"), Some("en"));
        assert_eq!(normalize("zh-cn"), Some("zh-CN"));
        assert_eq!(normalize("SR-LATN"), Some("sr-Latn"));
        assert_eq!(normalize("pt-br"), Some("pt-BR"));
    }

    #[test]
    fn unknown_codes_miss() {
        assert_eq!(normalize("tlh"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("en-us-x-custom"), None);
    }
}
