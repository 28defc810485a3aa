// self
use crate::{_prelude::*, error::UpstreamError};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRelay<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRelay<F> = F;

/// A span builder used by the relay handler.
#[derive(Clone, Debug)]
pub struct RelaySpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RelaySpan {
	/// Creates a new span tagged with the upstream name + stage.
	pub fn new(upstream: &str, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("crypto_relay.relay", upstream, stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (upstream, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRelay<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a rejected request. The credential itself is never part of the event.
pub fn log_missing_api_key() {
	#[cfg(feature = "tracing")]
	tracing::info!("rejected request without an API key");
}

/// Logs an upstream failure with its classification.
pub fn log_upstream_failure(err: &UpstreamError) {
	#[cfg(feature = "tracing")]
	tracing::warn!(
		kind = %err.kind,
		status = ?err.status,
		message = %err.message,
		"upstream call failed"
	);
	#[cfg(not(feature = "tracing"))]
	let _ = err;
}

/// Installs the global `tracing` subscriber used by the binary.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` applies. Calling this more than once
/// is harmless: later calls leave the first subscriber in place.
#[cfg(feature = "tracing")]
pub fn init_subscriber(default_filter: &str) {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = RelaySpan::new("coinmarketcap", "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[cfg(feature = "tracing")]
	#[test]
	fn init_subscriber_is_idempotent() {
		init_subscriber("info");
		init_subscriber("debug");
	}
}
