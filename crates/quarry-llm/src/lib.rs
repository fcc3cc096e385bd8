//! Multi-provider LLM request normalization for Quarry
//!
//! A single vendor-neutral request (an ordered list of [`ContentBlock`]s) is
//! translated into the Anthropic, Google Gemini or `OpenAI` wire format, sent
//! with exactly one HTTP call, and the vendor response is normalized back into
//! a [`NormalizedResult`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod credentials;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod provider;
pub mod registry;
pub mod types;

pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use dispatch::Dispatcher;
pub use error::LlmError;
pub use provider::Provider;
pub use registry::{ModelDescriptor, ProviderDescriptor, Registry, Selection};
pub use types::{ContentBlock, MediaSource, NormalizedResult};
