//! Transport primitives for the single outbound upstream call.
//!
//! The module exposes [`UpstreamHttpClient`] alongside [`UpstreamRequest`] and
//! [`UpstreamPayload`] so embedders (and tests) can swap the HTTP stack without touching the
//! relay's credential check or response mapping. Implementations report every failure as an
//! [`UpstreamError`] whose `message` is exactly what the caller will see.

// self
use crate::{_prelude::*, auth::ApiKey, error::UpstreamError, provider::UpstreamDescriptor};
#[cfg(feature = "reqwest")] use {crate::error::ConfigError, reqwest::header::ACCEPT};

/// Boxed future returned by [`UpstreamHttpClient::fetch`].
pub type UpstreamFuture<'a> =
	Pin<Box<dyn Future<Output = Result<UpstreamPayload, UpstreamError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of fetching the upstream listings resource.
///
/// The trait is the relay's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single instance can be shared across every in-flight request,
/// and the future they return must be `Send` so axum can drive it on any worker thread.
/// Each call must issue at most one outbound request and must not retry.
pub trait UpstreamHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Fetches the upstream resource described by `request`.
	fn fetch<'a>(&'a self, request: UpstreamRequest<'a>) -> UpstreamFuture<'a>;
}

/// Borrowed view of one outbound call.
#[derive(Clone, Copy, Debug)]
pub struct UpstreamRequest<'a> {
	/// Resource to fetch.
	pub url: &'a Url,
	/// Header the credential is attached under.
	pub header: &'a HeaderName,
	/// Caller credential for this call only.
	pub api_key: &'a ApiKey,
}
impl<'a> UpstreamRequest<'a> {
	/// Builds a request for `descriptor` carrying `api_key`.
	pub fn new(descriptor: &'a UpstreamDescriptor, api_key: &'a ApiKey) -> Self {
		Self { url: &descriptor.listings_endpoint, header: &descriptor.api_key_header, api_key }
	}
}

/// Upstream JSON body, kept as the exact bytes received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamPayload {
	body: Vec<u8>,
}
impl UpstreamPayload {
	/// Wraps raw body bytes.
	pub fn new(body: Vec<u8>) -> Self {
		Self { body }
	}

	/// Validates that `body` is a single JSON document before wrapping it.
	pub fn from_json_bytes(body: Vec<u8>, status: u16) -> Result<Self, UpstreamError> {
		serde_json::from_slice::<serde::de::IgnoredAny>(&body)
			.map_err(|e| UpstreamError::malformed_body(&e, status))?;

		Ok(Self::new(body))
	}

	/// Borrowed body bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.body
	}

	/// Consumes the payload, returning the body bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.body
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// [`ReqwestHttpClient::new`] follows redirects and imposes no request timeout; supply a
/// configured client through [`ReqwestHttpClient::with_client`] to change either.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with reqwest's defaults, reporting TLS backend failures as
	/// [`ConfigError::HttpClientBuild`].
	pub fn new() -> Result<Self, ConfigError> {
		Ok(Self(ReqwestClient::builder().build()?))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl UpstreamHttpClient for ReqwestHttpClient {
	fn fetch<'a>(&'a self, request: UpstreamRequest<'a>) -> UpstreamFuture<'a> {
		Box::pin(async move {
			let response = self
				.0
				.get(request.url.clone())
				.header(request.header.clone(), request.api_key.expose().clone())
				.header(ACCEPT, HeaderValue::from_static("application/json"))
				.send()
				.await
				.map_err(|e| UpstreamError::network(&e))?;
			let status = response.status();

			if !status.is_success() {
				return Err(UpstreamError::status(status.as_u16()));
			}

			let body = response.bytes().await.map_err(|e| UpstreamError::network(&e))?;

			UpstreamPayload::from_json_bytes(body.to_vec(), status.as_u16())
		})
	}
}
