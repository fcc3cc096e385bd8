use serde::Deserialize;
use url::Url;

/// Overrides for a single vendor adapter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Base URL override, e.g. to route through a proxy
    #[serde(default)]
    pub base_url: Option<Url>,
}
