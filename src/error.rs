//! Relay-level error types shared across the handler, transport, and server layers.

// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Outbound call to the upstream failed.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
	/// Listener or socket failure while serving.
	#[error("I/O error occurred while serving: {0}.")]
	Io(#[from] std::io::Error),

	/// Inbound request carried no usable credential.
	#[error("API key is required")]
	MissingApiKey,
}
impl Error {
	/// HTTP status reported to the caller for this error.
	pub fn status_code(&self) -> StatusCode {
		match self {
			Self::MissingApiKey => StatusCode::BAD_REQUEST,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Message placed in the `error` field of the response body.
	pub fn message(&self) -> String {
		match self {
			Self::Upstream(e) => e.message.clone(),
			other => other.to_string(),
		}
	}
}

/// Configuration and validation failures raised while wiring the relay.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Upstream URL cannot be parsed.
	#[error("Upstream URL `{url}` is invalid.")]
	InvalidUpstreamUrl {
		/// Raw URL that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Upstream descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::UpstreamDescriptorError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Coarse classification of upstream failures; every kind maps to the same caller-facing 500.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpstreamErrorKind {
	/// DNS, TCP, TLS, or body-read failure.
	Network,
	/// Upstream answered with a non-success status.
	Status,
	/// Upstream answered with a body that is not valid JSON.
	MalformedBody,
}
impl UpstreamErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Network => "network",
			Self::Status => "status",
			Self::MalformedBody => "malformed_body",
		}
	}
}
impl Display for UpstreamErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Failure of the single outbound call, carrying the message surfaced to the caller.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct UpstreamError {
	/// Failure classification.
	pub kind: UpstreamErrorKind,
	/// Human-readable description returned in the response body.
	pub message: String,
	/// Upstream HTTP status, when one was received.
	pub status: Option<u16>,
}
impl UpstreamError {
	/// Creates an error with an explicit kind and message.
	pub fn new(kind: UpstreamErrorKind, message: impl Into<String>) -> Self {
		Self { kind, message: message.into(), status: None }
	}

	/// Network failure described by a plain message.
	pub fn network_message(message: impl Into<String>) -> Self {
		Self::new(UpstreamErrorKind::Network, message)
	}

	/// Network failure built from a transport error and its source chain.
	pub fn network(err: &(dyn StdError + 'static)) -> Self {
		let mut message = err.to_string();
		let mut source = err.source();

		while let Some(cause) = source {
			let text = cause.to_string();

			// Some transports repeat the cause inside their own message.
			if !message.contains(&text) {
				message.push_str(": ");
				message.push_str(&text);
			}

			source = cause.source();
		}

		Self::network_message(message)
	}

	/// Upstream rejected the call with a non-success status.
	pub fn status(code: u16) -> Self {
		Self {
			kind: UpstreamErrorKind::Status,
			message: format!("Request failed with status code {code}"),
			status: Some(code),
		}
	}

	/// Upstream body could not be parsed as JSON.
	pub fn malformed_body(err: &serde_json::Error, status: u16) -> Self {
		Self {
			kind: UpstreamErrorKind::MalformedBody,
			message: format!("Upstream returned malformed JSON: {err}"),
			status: Some(status),
		}
	}
}
