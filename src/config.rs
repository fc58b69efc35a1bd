use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Upper bound on media attachment descriptions, counted in grapheme
    /// clusters.
    pub max_description_length: usize,
    /// Scheme allowlist for remote URLs. Deployments that trust additional
    /// schemes (e.g. `ipfs`) can extend this list.
    pub allowed_url_schemes: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_description_length: 1500,
            allowed_url_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }
}

impl ParserConfig {
    pub(crate) fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_url_schemes.iter().any(|s| s == scheme)
    }
}
