// self
use crate::{_prelude::*, provider::UpstreamDescriptor};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum UpstreamDescriptorError {
	/// Listings endpoint is mandatory.
	#[error("Missing listings endpoint.")]
	MissingListingsEndpoint,
	/// Endpoints must use HTTP(S).
	#[error("The listings endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// API-key header name is not a valid HTTP header name.
	#[error("The API key header `{name}` is not a valid header name.")]
	InvalidHeaderName {
		/// Rejected header name.
		name: String,
	},
}

/// Builder for [`UpstreamDescriptor`] values.
#[derive(Debug)]
pub struct UpstreamDescriptorBuilder {
	/// Provider name for the descriptor being constructed.
	pub name: String,
	/// Listings resource fetched for every relayed request.
	pub listings_endpoint: Option<Url>,
	/// Header name the provider reads the API key from.
	pub api_key_header: String,
}
impl UpstreamDescriptorBuilder {
	/// Creates a new builder seeded with the CoinMarketCap header name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			listings_endpoint: None,
			api_key_header: UpstreamDescriptor::COINMARKETCAP_API_KEY_HEADER.into(),
		}
	}

	/// Sets the listings endpoint.
	pub fn listings_endpoint(mut self, url: Url) -> Self {
		self.listings_endpoint = Some(url);

		self
	}

	/// Overrides the header the API key is forwarded under.
	pub fn api_key_header(mut self, name: impl Into<String>) -> Self {
		self.api_key_header = name.into();

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<UpstreamDescriptor, UpstreamDescriptorError> {
		let listings_endpoint =
			self.listings_endpoint.ok_or(UpstreamDescriptorError::MissingListingsEndpoint)?;

		validate_endpoint(&listings_endpoint)?;

		let api_key_header = match HeaderName::from_bytes(self.api_key_header.as_bytes()) {
			Ok(name) => name,
			Err(_) => {
				return Err(UpstreamDescriptorError::InvalidHeaderName {
					name: self.api_key_header,
				});
			},
		};

		Ok(UpstreamDescriptor { name: self.name, listings_endpoint, api_key_header })
	}
}

fn validate_endpoint(url: &Url) -> Result<(), UpstreamDescriptorError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(UpstreamDescriptorError::UnsupportedScheme { url: url.to_string() }),
	}
}
