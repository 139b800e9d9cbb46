mod http_client;
mod routes;
mod upstream;

use anyhow::Result;
use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self as axum_middleware, Next},
    response::Response,
    routing::get,
};
use core::net::SocketAddr;
use http_client::{BuildHttpClientArgs, HttpClient, build_http_client};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::{net::TcpListener, signal};
use tower_http::{
    catch_panic::CatchPanicLayer,
    normalize_path::NormalizePathLayer,
    timeout::TimeoutLayer,
    trace::{self, TraceLayer},
};
use tracing::{Level, info};
use upstream::{ForecastEndpoint, GeocodeEndpoint};
use url::Url;

#[derive(Debug)]
pub struct Server {
    router_inner: Router,
}

/// Settings to run the proxy server with.
#[derive(Debug, Clone)]
pub struct Settings {
    /// How long an incoming request may take before it is abandoned.
    pub request_timeout: Duration,

    /// See [`UpstreamSettings`].
    pub upstream_settings: UpstreamSettings,

    /// Forecast provider to relay `/fetch` requests to.
    pub forecast_settings: ProviderSettings,

    /// Geocoding provider to relay `/geocode` requests to.
    pub geocode_settings: ProviderSettings,

    /// When set, serve `forecast.json`/`geocode.json` from this directory
    /// instead of calling upstream providers.
    pub fixture_dir: Option<PathBuf>,
}

/// Configuration options used when making any call to an upstream provider
/// regardless of route.
#[derive(Debug, Clone)]
pub struct UpstreamSettings {
    /// How long a request to an upstream provider may take before it is
    /// abandoned and considered failed.
    pub request_timeout: Duration,

    /// The maximum amount of redirects to follow when making a request to an
    /// upstream provider before abandoning the request.
    pub max_redirects: usize,
}

/// A single upstream provider: where it lives and the secret it expects.
///
/// Tokens are held server-side only and are never taken from, or echoed back
/// to, clients.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Origin the provider is reached at.
    pub base_url: Url,

    /// Secret token substituted into every request URL for this provider.
    pub api_token: String,
}

#[derive(Debug)]
struct AppState {
    http_client: HttpClient,
    forecast: ForecastEndpoint,
    geocode: GeocodeEndpoint,
    fixture_dir: Option<PathBuf>,
}

impl Server {
    /// Create a new server with the provided settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let router = Router::new()
            .route("/", get(routes::index_handler))
            .route("/health", get(routes::health_handler))
            .route("/fetch/{lat}/{lon}", get(routes::forecast_handler))
            .route("/geocode", get(routes::geocode_handler))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::new(settings.request_timeout))
            .layer(NormalizePathLayer::trim_trailing_slash())
            .layer(CatchPanicLayer::new())
            .layer(axum_middleware::from_fn(Server::header_middleware))
            .with_state(Arc::new(AppState {
                http_client: build_http_client(BuildHttpClientArgs {
                    max_redirects: settings.upstream_settings.max_redirects,
                    request_timeout: settings.upstream_settings.request_timeout,
                })?,
                forecast: ForecastEndpoint::new(settings.forecast_settings),
                geocode: GeocodeEndpoint::new(settings.geocode_settings),
                fixture_dir: settings.fixture_dir,
            }));

        Ok(Self {
            router_inner: router,
        })
    }

    /// Start the server and expose it locally on the provided [`SocketAddr`].
    pub async fn start(self, address: &SocketAddr) -> Result<()> {
        let tcp_listener = TcpListener::bind(&address).await?;
        info!("Listening on http://{}", tcp_listener.local_addr()?);
        axum::serve(tcp_listener, self.router_inner)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await?;
        Ok(())
    }

    // https://github.com/tokio-rs/axum/blob/15917c6dbcb4a48707a20e9cfd021992a279a662/examples/graceful-shutdown/src/main.rs#L55
    async fn shutdown_signal() {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }

    async fn header_middleware(request: Request, next: Next) -> Response {
        let mut response = next.run(request).await;
        response.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        response.headers_mut().append(
            header::SERVER,
            HeaderValue::from_static(env!("CARGO_PKG_NAME")),
        );
        response
    }
}
