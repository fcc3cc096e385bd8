use serde::Deserialize;

/// Selection store configuration
///
/// When `url` is set the selected provider/model is persisted in a
/// Redis-protocol key/value store; otherwise it lives in process memory.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Key/value backend URL (e.g. `redis://localhost:6379`)
    #[serde(default)]
    pub url: Option<String>,
    /// Prefix applied to every key written by Quarry
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            key_prefix: default_key_prefix(),
        }
    }
}

impl StoreConfig {
    /// Backend URL, treating an empty value as unset
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

fn default_key_prefix() -> String {
    "quarry".to_owned()
}
