//! Where provider credentials come from
//!
//! Credentials are read per request, so a key rotated in the environment is
//! picked up without a restart.

use std::collections::HashMap;

use secrecy::SecretString;

use crate::registry::ProviderDescriptor;

/// Resolves the credential for a provider, if one is configured
pub trait CredentialSource: Send + Sync {
    fn resolve(&self, provider: &ProviderDescriptor) -> Option<SecretString>;
}

/// Reads the variable named by [`ProviderDescriptor::credential_env_var`]
///
/// An empty value counts as not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn resolve(&self, provider: &ProviderDescriptor) -> Option<SecretString> {
        std::env::var(provider.credential_env_var)
            .ok()
            .filter(|value| !value.is_empty())
            .map(SecretString::from)
    }
}

/// Fixed credentials keyed by provider id
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(HashMap<String, SecretString>);

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, provider_id: impl Into<String>, credential: impl Into<String>) -> Self {
        self.0
            .insert(provider_id.into(), SecretString::from(credential.into()));
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn resolve(&self, provider: &ProviderDescriptor) -> Option<SecretString> {
        self.0.get(provider.id).cloned()
    }
}
