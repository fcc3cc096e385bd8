use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Admin credentials for mutating the selected provider/model
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Password required by `POST /api/config`
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl AdminConfig {
    /// The configured password, treating an empty value as unset
    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref().filter(|p| !p.expose_secret().is_empty())
    }
}
