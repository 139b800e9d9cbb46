mod server;

use anyhow::Result;
use clap::Parser;
use core::net::SocketAddr;
use dotenvy::dotenv;
use server::{ProviderSettings, Server, Settings, UpstreamSettings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(author, version, about, long_about)]
struct Arguments {
    /// Internet socket address that the server should be ran on.
    #[arg(long = "address", env = "VANE_ADDRESS", default_value = "127.0.0.1:9292")]
    address: SocketAddr,

    /// Maximum waiting time for before all incoming requests are aborted.
    #[arg(
        long = "request-timeout",
        env = "VANE_REQUEST_TIMEOUT",
        default_value = "15s"
    )]
    request_timeout: humantime::Duration,

    /// Maximum waiting time before requests to upstream providers are aborted.
    #[arg(
        long = "upstream-request-timeout",
        env = "VANE_UPSTREAM_REQUEST_TIMEOUT",
        default_value = "10s"
    )]
    upstream_request_timeout: humantime::Duration,

    /// Maximum amount of redirects to follow when making upstream requests before aborting.
    #[arg(
        long = "upstream-max-redirects",
        env = "VANE_UPSTREAM_MAX_REDIRECTS",
        default_value_t = 5
    )]
    upstream_max_redirects: usize,

    /// Secret token substituted into forecast provider request URLs.
    #[arg(
        long = "forecast-api-token",
        env = "VANE_FORECAST_API_TOKEN",
        hide_env_values = true
    )]
    forecast_api_token: String,

    /// Secret token substituted into geocoding provider request URLs.
    #[arg(
        long = "geocode-api-token",
        env = "VANE_GEOCODE_API_TOKEN",
        hide_env_values = true
    )]
    geocode_api_token: String,

    /// Origin of the forecast provider.
    #[arg(
        long = "forecast-base-url",
        env = "VANE_FORECAST_BASE_URL",
        default_value = "https://api.forecast.io"
    )]
    forecast_base_url: Url,

    /// Origin of the geocoding provider.
    #[arg(
        long = "geocode-base-url",
        env = "VANE_GEOCODE_BASE_URL",
        default_value = "https://maps.googleapis.com"
    )]
    geocode_base_url: Url,

    /// Serve canned JSON responses from this directory instead of calling upstream providers.
    ///
    /// Intended for local development without provider tokens. Request parameters
    /// are still validated as usual.
    #[arg(long = "fixture-dir", env = "VANE_FIXTURE_DIR")]
    fixture_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info")))
        .init();
    let args = Arguments::parse();

    if args.fixture_dir.is_some() {
        println!(
            "WARNING: Running with 'fixture_dir' will serve canned responses instead of live provider data."
        );
    }

    Server::new(Settings {
        request_timeout: *args.request_timeout,
        upstream_settings: UpstreamSettings {
            request_timeout: *args.upstream_request_timeout,
            max_redirects: args.upstream_max_redirects,
        },
        forecast_settings: ProviderSettings {
            base_url: args.forecast_base_url,
            api_token: args.forecast_api_token,
        },
        geocode_settings: ProviderSettings {
            base_url: args.geocode_base_url,
            api_token: args.geocode_api_token,
        },
        fixture_dir: args.fixture_dir,
    })?
    .start(&args.address)
    .await
}
