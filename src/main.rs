//! `crypto-relay` binary: parses configuration, installs logging, and serves the relay.

// crates.io
use clap::Parser;
// self
use crypto_relay::{config::RelayConfig, error::Result, server};

#[tokio::main]
async fn main() -> Result<()> {
	let config = RelayConfig::parse();

	#[cfg(feature = "tracing")]
	crypto_relay::obs::init_subscriber("info,hyper=warn");

	server::serve(&config).await
}
