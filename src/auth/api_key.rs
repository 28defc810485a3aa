//! Redacted wrapper for the caller-supplied upstream API key.

// self
use crate::_prelude::*;

/// Inbound header carrying the caller's CoinMarketCap key.
pub const API_KEY_HEADER: &str = "x-cmc-api-key";

/// Caller credential scoped to a single relay; never stored and never printed.
///
/// The wrapped [`HeaderValue`] is flagged sensitive so HTTP stacks that honor the flag
/// (hyper's HPACK encoder, `Debug` on header maps) keep it out of their output as well.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(HeaderValue);
impl ApiKey {
	/// Wraps a header value, returning `None` when it is empty.
	///
	/// No format check is applied; any non-empty value is forwarded byte for byte.
	pub fn new(mut value: HeaderValue) -> Option<Self> {
		if value.is_empty() {
			return None;
		}

		value.set_sensitive(true);

		Some(Self(value))
	}

	/// Reads the first [`API_KEY_HEADER`] value from inbound headers.
	pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
		headers.get(API_KEY_HEADER).cloned().and_then(Self::new)
	}

	/// Returns the raw header value. Callers must only attach it to the outbound request.
	pub fn expose(&self) -> &HeaderValue {
		&self.0
	}
}
impl Debug for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApiKey").field(&"<redacted>").finish()
	}
}
impl Display for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn headers(values: &[&'static str]) -> HeaderMap {
		let mut map = HeaderMap::new();

		for value in values {
			map.append(API_KEY_HEADER, HeaderValue::from_static(value));
		}

		map
	}

	#[test]
	fn api_key_formatters_redact() {
		let key = ApiKey::new(HeaderValue::from_static("super-secret"))
			.expect("Non-empty header values should produce a key.");

		assert_eq!(format!("{key:?}"), "ApiKey(\"<redacted>\")");
		assert_eq!(format!("{key}"), "<redacted>");
		assert!(key.expose().is_sensitive());
	}

	#[test]
	fn missing_or_empty_header_yields_none() {
		assert!(ApiKey::from_headers(&HeaderMap::new()).is_none());
		assert!(ApiKey::from_headers(&headers(&[""])).is_none());
	}

	#[test]
	fn values_are_forwarded_verbatim() {
		let key = ApiKey::from_headers(&headers(&["  padded key  "]))
			.expect("Whitespace-only padding should still count as a credential.");

		assert_eq!(key.expose().as_bytes(), b"  padded key  ");
	}

	#[test]
	fn first_value_wins_when_repeated() {
		let key = ApiKey::from_headers(&headers(&["first", "second"]))
			.expect("Repeated headers should still produce a key.");

		assert_eq!(key.expose(), "first");
	}
}
