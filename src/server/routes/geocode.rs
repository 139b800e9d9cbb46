use super::{ProxyError, read_fixture, relay_json};
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct GeocodeRequestQueryParams {
    /// Free-text address to forward to the geocoding provider.
    pub address: Option<String>,
}

pub async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeocodeRequestQueryParams>,
) -> Result<Response, ProxyError> {
    let address = query
        .address
        .as_deref()
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .ok_or(ProxyError::InvalidParameters(
            "A non-empty 'address' query parameter is required.",
        ))?;

    if let Some(fixture_dir) = &state.fixture_dir {
        return Ok(relay_json(read_fixture(fixture_dir, "geocode.json").await?));
    }

    let url = state.geocode.request_url(address);
    let response = match state.http_client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("Failed to make request to geocoding provider: {err:?}");
            return Err(ProxyError::UpstreamUnavailable(
                "Failed to send request to the geocoding provider.",
            ));
        }
    };
    if let Err(err) = response.error_for_status_ref() {
        warn!("Geocoding provider returned unsuccessful status code {err:?}");
        return Err(ProxyError::UpstreamUnavailable(
            "The geocoding provider returned an unsuccessful response.",
        ));
    }
    let body = response.bytes().await.map_err(|err| {
        warn!("Failed to read geocoding provider response: {err:?}");
        ProxyError::UpstreamUnavailable("Failed to read response from the geocoding provider.")
    })?;

    Ok(relay_json(body))
}
