//! Caller credential extraction and redaction.

pub mod api_key;

pub use api_key::*;
