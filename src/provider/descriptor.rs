//! Upstream descriptor data structures.

/// Builder API for assembling upstream descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Immutable description of the upstream consumed by the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamDescriptor {
	/// Human-readable provider name used in logs.
	pub name: String,
	/// Listings resource fetched for every relayed request.
	pub listings_endpoint: Url,
	/// Header the provider reads the API key from.
	pub api_key_header: HeaderName,
}
impl UpstreamDescriptor {
	/// Production CoinMarketCap listings endpoint.
	pub const COINMARKETCAP_LISTINGS_URL: &'static str =
		"https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";
	/// Header CoinMarketCap expects the API key under.
	pub const COINMARKETCAP_API_KEY_HEADER: &'static str = "X-CMC_PRO_API_KEY";

	/// Creates a new builder for the provided provider name.
	pub fn builder(name: impl Into<String>) -> UpstreamDescriptorBuilder {
		UpstreamDescriptorBuilder::new(name)
	}

	/// Descriptor for the production CoinMarketCap listings API.
	pub fn coinmarketcap() -> Self {
		Self {
			name: "coinmarketcap".into(),
			listings_endpoint: coinmarketcap_listings_url(),
			api_key_header: HeaderName::from_static("x-cmc_pro_api_key"),
		}
	}
}

fn coinmarketcap_listings_url() -> Url {
	match Url::parse(UpstreamDescriptor::COINMARKETCAP_LISTINGS_URL) {
		Ok(url) => url,
		Err(e) => unreachable!("Built-in listings URL must parse: {e}."),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn coinmarketcap_descriptor_targets_listings() {
		let descriptor = UpstreamDescriptor::coinmarketcap();

		assert_eq!(
			descriptor.listings_endpoint.as_str(),
			UpstreamDescriptor::COINMARKETCAP_LISTINGS_URL
		);
		assert_eq!(
			descriptor.api_key_header,
			HeaderName::from_bytes(UpstreamDescriptor::COINMARKETCAP_API_KEY_HEADER.as_bytes())
				.expect("CoinMarketCap header name should be valid."),
		);
	}
}
