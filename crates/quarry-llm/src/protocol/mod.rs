//! Vendor request bodies
//!
//! Only requests are typed. Responses stay as raw JSON and are read with
//! pointers in [`crate::convert`], so unexpected shapes never fail parsing.

pub mod anthropic;
pub mod google;
pub mod openai;

/// Output token cap sent to every vendor
pub const MAX_OUTPUT_TOKENS: u32 = 4000;
