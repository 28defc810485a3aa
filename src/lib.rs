//! Browser-facing relay for CoinMarketCap listings: validates a caller-supplied API key, forwards
//! it to the single upstream, and hands the upstream payload back verbatim.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod provider;
pub mod relay;
pub mod server;
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		error::UpstreamError,
		http::{UpstreamFuture, UpstreamHttpClient, UpstreamPayload, UpstreamRequest},
		provider::UpstreamDescriptor,
		relay::Relay,
	};
	#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

	type Responder = dyn Fn(&str) -> Result<UpstreamPayload, UpstreamError> + Send + Sync;

	/// Outbound call captured by [`ScriptedHttpClient`].
	#[derive(Clone, Debug, PartialEq, Eq)]
	pub struct RecordedCall {
		/// Upstream URL the relay targeted.
		pub url: String,
		/// Header name the credential travelled under.
		pub header: String,
		/// Credential value, exposed for assertions only.
		pub api_key: String,
	}

	/// In-process upstream that answers every call through a closure keyed by the credential.
	#[derive(Clone)]
	pub struct ScriptedHttpClient {
		responder: Arc<Responder>,
		calls: Arc<Mutex<Vec<RecordedCall>>>,
	}
	impl ScriptedHttpClient {
		/// Builds a client that delegates every call to `responder`.
		pub fn new<F>(responder: F) -> Self
		where
			F: 'static + Fn(&str) -> Result<UpstreamPayload, UpstreamError> + Send + Sync,
		{
			Self { responder: Arc::new(responder), calls: Default::default() }
		}

		/// Returns a client that answers every call with `body`.
		pub fn ok(body: &'static str) -> Self {
			Self::new(move |_| Ok(UpstreamPayload::new(body.as_bytes().to_vec())))
		}

		/// Returns a client that fails every call with `message`.
		pub fn failing(message: &'static str) -> Self {
			Self::new(move |_| Err(UpstreamError::network_message(message)))
		}

		/// Snapshot of the calls observed so far.
		pub fn calls(&self) -> Vec<RecordedCall> {
			self.calls.lock().clone()
		}

		/// Number of calls observed so far.
		pub fn call_count(&self) -> usize {
			self.calls.lock().len()
		}
	}
	impl UpstreamHttpClient for ScriptedHttpClient {
		fn fetch<'a>(&'a self, request: UpstreamRequest<'a>) -> UpstreamFuture<'a> {
			let api_key = String::from_utf8_lossy(request.api_key.expose().as_bytes()).into_owned();

			self.calls.lock().push(RecordedCall {
				url: request.url.to_string(),
				header: request.header.as_str().to_owned(),
				api_key: api_key.clone(),
			});

			let outcome = (self.responder)(api_key.as_str());

			Box::pin(async move { outcome })
		}
	}

	/// Builds a relay over a [`ScriptedHttpClient`] pointed at the production descriptor.
	pub fn build_scripted_relay(client: ScriptedHttpClient) -> Relay<ScriptedHttpClient> {
		Relay::with_http_client(UpstreamDescriptor::coinmarketcap(), client)
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	#[cfg(feature = "reqwest")]
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a reqwest-backed [`Relay`] for the provided descriptor.
	#[cfg(feature = "reqwest")]
	pub fn build_reqwest_test_relay(descriptor: UpstreamDescriptor) -> Relay<ReqwestHttpClient> {
		Relay::with_http_client(descriptor, test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		net::{IpAddr, SocketAddr},
		pin::Pin,
		sync::Arc,
	};

	pub use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tower as _};
