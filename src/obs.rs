//! Optional observability helpers for relayed requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `crypto_relay.relay` with the `upstream`
//!   and `stage` fields, and to install a `tracing-subscriber` formatter from the binary.
//! - Enable `metrics` to increment the `crypto_relay_requests_total` counter for every
//!   attempt/success/rejection/failure, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each relayed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelayOutcome {
	/// Entry to the relay handler.
	Attempt,
	/// Upstream payload forwarded to the caller.
	Success,
	/// Request refused before any outbound call (missing credential).
	Rejected,
	/// Outbound call failed.
	Failure,
}
impl RelayOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RelayOutcome::Attempt => "attempt",
			RelayOutcome::Success => "success",
			RelayOutcome::Rejected => "rejected",
			RelayOutcome::Failure => "failure",
		}
	}
}
impl Display for RelayOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
