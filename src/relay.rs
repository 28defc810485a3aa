//! Relay handler: credential check, one outbound call, response translation.
//!
//! [`Relay::handle`] is the whole request pipeline. A missing or empty `x-cmc-api-key` header
//! short-circuits to `400 {"error":"API key is required"}` without touching the upstream.
//! Otherwise exactly one outbound call is made; its payload is returned verbatim with `200`, and
//! any failure is returned as `500 {"error":<message>}`. Nothing is retried or cached, and the
//! relay holds no mutable state, so one instance can serve any number of concurrent requests.

// crates.io
use axum::{
	Json,
	http::header::CONTENT_TYPE,
	response::{IntoResponse, Response},
};
// self
use crate::{
	_prelude::*,
	auth::ApiKey,
	http::{UpstreamHttpClient, UpstreamPayload, UpstreamRequest},
	obs::{self, RelayOutcome, RelaySpan},
	provider::UpstreamDescriptor,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Stateless relay bound to a single upstream descriptor.
pub struct Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// HTTP client used for every outbound call.
	pub http_client: Arc<C>,
	/// Upstream the relay forwards to.
	pub descriptor: Arc<UpstreamDescriptor>,
}
impl<C> Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// Creates a relay that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: UpstreamDescriptor,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), descriptor: Arc::new(descriptor) }
	}

	/// Validates the inbound credential and performs the single outbound call.
	pub async fn relay(&self, headers: &HeaderMap) -> Result<UpstreamPayload> {
		let span = RelaySpan::new(&self.descriptor.name, "relay");

		obs::record_relay_outcome(RelayOutcome::Attempt);

		let result: Result<UpstreamPayload> = span
			.instrument(async {
				let api_key = ApiKey::from_headers(headers).ok_or(Error::MissingApiKey)?;
				let request = UpstreamRequest::new(&self.descriptor, &api_key);

				Ok::<_, Error>(self.http_client.fetch(request).await?)
			})
			.await;

		match &result {
			Ok(_) => obs::record_relay_outcome(RelayOutcome::Success),
			Err(Error::MissingApiKey) => {
				obs::log_missing_api_key();
				obs::record_relay_outcome(RelayOutcome::Rejected);
			},
			Err(e) => {
				if let Error::Upstream(upstream) = e {
					obs::log_upstream_failure(upstream);
				}

				obs::record_relay_outcome(RelayOutcome::Failure);
			},
		}

		result
	}

	/// Runs [`Relay::relay`] and maps the outcome onto the caller-facing response.
	pub async fn handle(&self, headers: &HeaderMap) -> RelayResponse {
		match self.relay(headers).await {
			Ok(payload) => RelayResponse::Payload(payload),
			Err(e) => RelayResponse::from_error(&e),
		}
	}
}
#[cfg(feature = "reqwest")]
impl Relay<ReqwestHttpClient> {
	/// Creates a relay for `descriptor` backed by a default reqwest client.
	pub fn new(descriptor: UpstreamDescriptor) -> Result<Self> {
		Ok(Self::with_http_client(descriptor, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			descriptor: Arc::clone(&self.descriptor),
		}
	}
}
impl<C> Debug for Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay").field("descriptor", &self.descriptor).finish()
	}
}

/// JSON error body returned for every non-200 response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Human-readable failure description.
	pub error: String,
}

/// Caller-facing outcome of one relayed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayResponse {
	/// Upstream payload, returned with `200 OK`.
	Payload(UpstreamPayload),
	/// Validation or upstream failure.
	Error {
		/// Status reported to the caller.
		status: StatusCode,
		/// JSON body carrying the failure message.
		body: ErrorBody,
	},
}
impl RelayResponse {
	/// Maps a relay error onto its status and body.
	pub fn from_error(err: &Error) -> Self {
		Self::Error { status: err.status_code(), body: ErrorBody { error: err.message() } }
	}

	/// Status reported to the caller.
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Payload(_) => StatusCode::OK,
			Self::Error { status, .. } => *status,
		}
	}
}
impl IntoResponse for RelayResponse {
	fn into_response(self) -> Response {
		match self {
			Self::Payload(payload) => (
				StatusCode::OK,
				[(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
				payload.into_bytes(),
			)
				.into_response(),
			Self::Error { status, body } => (status, Json(body)).into_response(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::ScriptedHttpClient, auth::API_KEY_HEADER, error::UpstreamError};

	fn headers_with_key(value: &'static str) -> HeaderMap {
		let mut headers = HeaderMap::new();

		headers.insert(API_KEY_HEADER, HeaderValue::from_static(value));

		headers
	}

	fn relay(client: ScriptedHttpClient) -> Relay<ScriptedHttpClient> {
		Relay::with_http_client(UpstreamDescriptor::coinmarketcap(), client)
	}

	#[tokio::test]
	async fn missing_key_short_circuits() {
		let client = ScriptedHttpClient::ok("{}");
		let response = relay(client.clone()).handle(&HeaderMap::new()).await;

		assert_eq!(
			response,
			RelayResponse::Error {
				status: StatusCode::BAD_REQUEST,
				body: ErrorBody { error: "API key is required".into() },
			}
		);
		assert_eq!(client.call_count(), 0);
	}

	#[tokio::test]
	async fn upstream_errors_become_internal_errors() {
		let client = ScriptedHttpClient::new(|_| Err(UpstreamError::status(403)));
		let response = relay(client).handle(&headers_with_key("k")).await;

		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(
			response,
			RelayResponse::Error {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				body: ErrorBody { error: "Request failed with status code 403".into() },
			}
		);
	}

	#[tokio::test]
	async fn payload_responses_carry_json_content_type() {
		let response = relay(ScriptedHttpClient::ok("{\"data\":[]}"))
			.handle(&headers_with_key("k"))
			.await
			.into_response();

		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(
			response.headers().get(CONTENT_TYPE).map(HeaderValue::as_bytes),
			Some(&b"application/json"[..])
		);
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_relay_construction_is_fallible() {
		let relay = Relay::new(UpstreamDescriptor::coinmarketcap())
			.expect("Relay over the default reqwest client should build.");

		assert_eq!(*relay.descriptor, UpstreamDescriptor::coinmarketcap());
	}

	#[test]
	fn debug_output_omits_transport_details() {
		let rendered = format!("{:?}", relay(ScriptedHttpClient::ok("{}")));

		assert!(rendered.starts_with("Relay { descriptor: "));
	}
}
