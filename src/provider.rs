//! Upstream-facing descriptor for the single data provider the relay talks to.
//!
//! `descriptor` exposes validated metadata ([`UpstreamDescriptor`]) covering the listings
//! endpoint and the header name the provider expects the API key under.

pub mod descriptor;

pub use descriptor::*;
