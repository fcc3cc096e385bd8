//! Conversion between the vendor-neutral types and each wire format
//!
//! Outbound, every [`crate::ContentBlock`] variant is matched exhaustively so
//! no block can be dropped silently. Inbound, vendor payloads are reduced to a
//! [`crate::NormalizedResult`] without ever failing on an unexpected shape.

pub mod anthropic;
pub mod google;
pub mod openai;
