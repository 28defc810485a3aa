//! Process configuration read from command-line flags with environment fallbacks.

// crates.io
use clap::Parser;
// self
use crate::{_prelude::*, error::ConfigError, provider::UpstreamDescriptor};

/// Runtime settings for the relay binary.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(
	name = "crypto-relay",
	version,
	about = "Relay browser requests to CoinMarketCap listings"
)]
pub struct RelayConfig {
	/// Port to listen on.
	#[arg(long, env = "PORT", default_value_t = RelayConfig::DEFAULT_PORT)]
	pub port: u16,
	/// Interface to bind.
	#[arg(long, env = "HOST", default_value_t = RelayConfig::DEFAULT_HOST)]
	pub host: IpAddr,
	/// Listings endpoint to relay to.
	#[arg(
		long,
		env = "CMC_LISTINGS_URL",
		default_value = UpstreamDescriptor::COINMARKETCAP_LISTINGS_URL
	)]
	pub upstream_url: String,
}
impl RelayConfig {
	/// Port used when `PORT` is unset.
	pub const DEFAULT_PORT: u16 = 3000;
	/// Listen on every interface by default.
	pub const DEFAULT_HOST: IpAddr = IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED);

	/// Socket address the server binds to.
	pub fn bind_addr(&self) -> SocketAddr {
		SocketAddr::new(self.host, self.port)
	}

	/// Builds the validated upstream descriptor.
	pub fn descriptor(&self) -> Result<UpstreamDescriptor, ConfigError> {
		if self.upstream_url == UpstreamDescriptor::COINMARKETCAP_LISTINGS_URL {
			return Ok(UpstreamDescriptor::coinmarketcap());
		}

		let url = Url::parse(&self.upstream_url).map_err(|source| {
			ConfigError::InvalidUpstreamUrl { url: self.upstream_url.clone(), source }
		})?;

		Ok(UpstreamDescriptor::builder("coinmarketcap").listings_endpoint(url).build()?)
	}
}
impl Default for RelayConfig {
	fn default() -> Self {
		Self {
			port: Self::DEFAULT_PORT,
			host: Self::DEFAULT_HOST,
			upstream_url: UpstreamDescriptor::COINMARKETCAP_LISTINGS_URL.into(),
		}
	}
}
