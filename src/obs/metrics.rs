// self
use crate::obs::RelayOutcome;

/// Records a relay outcome via the global metrics recorder (when enabled).
pub fn record_relay_outcome(outcome: RelayOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("crypto_relay_requests_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
