// crates.io
use axum::{
	body::{Body, to_bytes},
	http::Request,
};
use tokio::net::TcpListener;
use tower::ServiceExt;
// self
use crypto_relay::{
	_preludet::*,
	auth::API_KEY_HEADER,
	server::{self, CRYPTO_ROUTE},
};

const BODY_LIMIT: usize = 64 * 1024;

async fn get(app: axum::Router, key: Option<&'static str>) -> (StatusCode, HeaderMap, Vec<u8>) {
	let mut request = Request::builder()
		.uri(CRYPTO_ROUTE)
		.header("origin", "https://dashboard.example");

	if let Some(key) = key {
		request = request.header(API_KEY_HEADER, key);
	}

	let response = app
		.oneshot(request.body(Body::empty()).expect("Request should build."))
		.await
		.expect("Router should answer relay requests.");
	let status = response.status();
	let headers = response.headers().clone();
	let body = to_bytes(response.into_body(), BODY_LIMIT)
		.await
		.expect("Response body should be readable.");

	(status, headers, body.to_vec())
}

#[tokio::test]
async fn missing_key_returns_exact_error_json() {
	let client = ScriptedHttpClient::ok("{}");
	let app = server::router(build_scripted_relay(client.clone()));
	let (status, headers, body) = get(app, None).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, b"{\"error\":\"API key is required\"}");
	assert_eq!(
		headers.get("access-control-allow-origin").map(HeaderValue::as_bytes),
		Some(&b"*"[..])
	);
	assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn success_returns_upstream_bytes_as_json() {
	const PAYLOAD: &str = "{\"data\":[{\"symbol\":\"ETH\"}],\"status\":{\"error_code\":0}}";

	let app = server::router(build_scripted_relay(ScriptedHttpClient::ok(PAYLOAD)));
	let (status, headers, body) = get(app, Some("browser-key")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, PAYLOAD.as_bytes());
	assert_eq!(
		headers.get("content-type").map(HeaderValue::as_bytes),
		Some(&b"application/json"[..])
	);
	assert_eq!(
		headers.get("access-control-allow-origin").map(HeaderValue::as_bytes),
		Some(&b"*"[..])
	);
}

#[tokio::test]
async fn failure_returns_message_json() {
	let app = server::router(build_scripted_relay(ScriptedHttpClient::failing("timeout")));
	let (status, _, body) = get(app, Some("browser-key")).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, b"{\"error\":\"timeout\"}");
}

#[tokio::test]
async fn serves_over_tcp() {
	let listener =
		TcpListener::bind("127.0.0.1:0").await.expect("Loopback listener should bind.");
	let addr = listener.local_addr().expect("Listener should report its address.");
	let app = server::router(build_scripted_relay(ScriptedHttpClient::ok("{\"data\":[]}")));
	let handle = tokio::spawn(server::serve_on(listener, app));
	let response = ReqwestClient::new()
		.get(format!("http://{addr}{CRYPTO_ROUTE}"))
		.header(API_KEY_HEADER, "tcp-key")
		.send()
		.await
		.expect("Relay should accept TCP connections.");

	assert_eq!(response.status().as_u16(), 200);
	assert_eq!(
		response.text().await.expect("Relay body should be readable."),
		"{\"data\":[]}"
	);

	handle.abort();
}
