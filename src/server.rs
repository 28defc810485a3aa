//! HTTP surface: routing, cross-origin policy, and the listener loop.

// crates.io
use axum::{
	Router,
	extract::State,
	http::Method,
	response::{IntoResponse, Response},
	routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
	cors::{AllowHeaders, Any, CorsLayer},
	trace::TraceLayer,
};
// self
use crate::{_prelude::*, http::UpstreamHttpClient, relay::Relay};
#[cfg(feature = "reqwest")] use crate::config::RelayConfig;

/// Path the listings relay is mounted on.
pub const CRYPTO_ROUTE: &str = "/api/crypto";

/// Builds the application router around `relay`.
///
/// Every origin is allowed. Preflight requests get the requested headers mirrored back so
/// browsers can send the API-key header. Methods other than `GET`/`HEAD` on the relay route are
/// answered like unknown paths.
pub fn router<C>(relay: Relay<C>) -> Router
where
	C: ?Sized + UpstreamHttpClient,
{
	Router::new()
		.route(CRYPTO_ROUTE, get(crypto_listings::<C>).fallback(not_found))
		.layer(cors_layer())
		.layer(TraceLayer::new_for_http())
		.with_state(relay)
}

/// Cross-origin policy applied to every route.
pub fn cors_layer() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([
			Method::GET,
			Method::HEAD,
			Method::PUT,
			Method::PATCH,
			Method::POST,
			Method::DELETE,
		])
		.allow_headers(AllowHeaders::mirror_request())
}

async fn crypto_listings<C>(State(relay): State<Relay<C>>, headers: HeaderMap) -> Response
where
	C: ?Sized + UpstreamHttpClient,
{
	relay.handle(&headers).await.into_response()
}

async fn not_found() -> StatusCode {
	StatusCode::NOT_FOUND
}

/// Serves `router` on an already-bound listener until a shutdown signal arrives.
pub async fn serve_on(listener: TcpListener, router: Router) -> Result<()> {
	#[cfg(feature = "tracing")]
	if let Ok(addr) = listener.local_addr() {
		tracing::info!(%addr, "crypto relay listening");
	}

	axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

	Ok(())
}

/// Binds `config.bind_addr()` and serves the reqwest-backed relay.
#[cfg(feature = "reqwest")]
pub async fn serve(config: &RelayConfig) -> Result<()> {
	let relay = Relay::new(config.descriptor()?)?;
	let listener = TcpListener::bind(config.bind_addr()).await?;

	serve_on(listener, router(relay)).await
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if tokio::signal::ctrl_c().await.is_err() {
			std::future::pending::<()>().await;
		}
	};
	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			},
			Err(_) => std::future::pending::<()>().await,
		}
	};
	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	#[cfg(feature = "tracing")]
	tracing::info!("shutdown signal received");
}
