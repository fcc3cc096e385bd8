//! Vendor-neutral request and response types

mod content;
mod result;

pub use content::{ContentBlock, MediaSource};
pub use result::NormalizedResult;
