//! Shared primitives for Quarry crates

mod error;

pub use error::{HttpError, error_body};
