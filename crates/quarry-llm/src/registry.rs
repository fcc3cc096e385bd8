//! Static table of supported providers and their selectable models
//!
//! Adding a provider or model is a data-only change to [`PROVIDERS`]. The
//! rest of the crate only iterates the table or checks membership in it.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::LlmError;

/// A model offered for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Vendor model identifier
    pub id: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
}

/// A supported vendor and the models it offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// Unique provider identifier
    pub id: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// Selectable models, in display order
    pub models: &'static [ModelDescriptor],
    /// Environment variable holding the provider credential
    pub credential_env_var: &'static str,
}

const fn model(id: &'static str, display_name: &'static str) -> ModelDescriptor {
    ModelDescriptor { id, display_name }
}

/// Every supported provider, in display order
pub static PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        id: "anthropic",
        display_name: "Anthropic",
        models: &[
            model("claude-sonnet-4-20250514", "Claude Sonnet 4"),
            model("claude-opus-4-20250514", "Claude Opus 4"),
            model("claude-3-5-sonnet-20241022", "Claude 3.5 Sonnet"),
            model("claude-3-5-haiku-20241022", "Claude 3.5 Haiku"),
        ],
        credential_env_var: "ANTHROPIC_API_KEY",
    },
    ProviderDescriptor {
        id: "google",
        display_name: "Google",
        models: &[
            model("gemini-2.0-flash-exp", "Gemini 2.0 Flash"),
            model("gemini-1.5-pro", "Gemini 1.5 Pro"),
            model("gemini-1.5-flash", "Gemini 1.5 Flash"),
        ],
        credential_env_var: "GOOGLE_API_KEY",
    },
    ProviderDescriptor {
        id: "openai",
        display_name: "OpenAI",
        models: &[
            model("gpt-4o", "GPT-4o"),
            model("gpt-4o-mini", "GPT-4o Mini"),
            model("gpt-4-turbo", "GPT-4 Turbo"),
        ],
        credential_env_var: "OPENAI_API_KEY",
    },
];

/// Provider/model pair used at cold start
pub const DEFAULT_PROVIDER: &str = "anthropic";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Look up a provider by id
pub fn lookup(provider_id: &str) -> Option<&'static ProviderDescriptor> {
    PROVIDERS.iter().find(|p| p.id == provider_id)
}

/// Whether `model_id` is one of the provider's selectable models
///
/// Exact match only; casing is significant.
pub fn is_valid_model(provider_id: &str, model_id: &str) -> bool {
    lookup(provider_id).is_some_and(|p| p.has_model(model_id))
}

impl ProviderDescriptor {
    pub fn has_model(&self, model_id: &str) -> bool {
        self.models.iter().any(|m| m.id == model_id)
    }
}

/// The currently active provider/model pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub provider: String,
    pub model: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
        }
    }
}

impl Selection {
    /// Build a selection after checking it against the registry
    pub fn validated(provider: &str, model: &str) -> Result<Self, LlmError> {
        let descriptor = lookup(provider).ok_or_else(|| LlmError::UnknownProvider {
            provider: provider.to_owned(),
        })?;

        if !descriptor.has_model(model) {
            return Err(LlmError::UnknownModel {
                provider: provider.to_owned(),
                model: model.to_owned(),
            });
        }

        Ok(Self {
            provider: provider.to_owned(),
            model: model.to_owned(),
        })
    }
}

/// Serializable view of the whole registry
///
/// Renders as an object keyed by provider id:
/// `{"anthropic": {"name": .., "models": [{"id": .., "name": ..}], "envKey": ..}}`
#[derive(Debug, Clone, Copy, Default)]
pub struct Registry;

impl Registry {
    pub fn iter(self) -> impl Iterator<Item = &'static ProviderDescriptor> {
        PROVIDERS.iter()
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PROVIDERS.len()))?;
        for provider in PROVIDERS {
            map.serialize_entry(provider.id, provider)?;
        }
        map.end()
    }
}

impl Serialize for ProviderDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ProviderDescriptor", 3)?;
        state.serialize_field("name", self.display_name)?;
        state.serialize_field("models", self.models)?;
        state.serialize_field("envKey", self.credential_env_var)?;
        state.end()
    }
}

impl Serialize for ModelDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ModelDescriptor", 2)?;
        state.serialize_field("id", self.id)?;
        state.serialize_field("name", self.display_name)?;
        state.end()
    }
}
