use super::{ProxyError, read_fixture, relay_json};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

pub async fn forecast_handler(
    State(state): State<Arc<AppState>>,
    Path((lat, lon)): Path<(String, String)>,
) -> Result<Response, ProxyError> {
    let lat = parse_coordinate(&lat)?;
    let lon = parse_coordinate(&lon)?;

    if let Some(fixture_dir) = &state.fixture_dir {
        return Ok(relay_json(read_fixture(fixture_dir, "forecast.json").await?));
    }

    let url = state.forecast.request_url(lat, lon);
    let response = match state.http_client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("Failed to make request to forecast provider: {err:?}");
            return Err(ProxyError::UpstreamUnavailable(
                "Failed to send request to the forecast provider.",
            ));
        }
    };
    if let Err(err) = response.error_for_status_ref() {
        warn!("Forecast provider returned unsuccessful status code {err:?}");
        return Err(ProxyError::UpstreamUnavailable(
            "The forecast provider returned an unsuccessful response.",
        ));
    }
    let body = response.bytes().await.map_err(|err| {
        warn!("Failed to read forecast provider response: {err:?}");
        ProxyError::UpstreamUnavailable("Failed to read response from the forecast provider.")
    })?;

    Ok(relay_json(body))
}

/// Parse a path segment into a usable coordinate.
///
/// Non-finite values are rejected: they parse as floats but would produce a
/// nonsense upstream path.
fn parse_coordinate(segment: &str) -> Result<f64, ProxyError> {
    segment
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ProxyError::InvalidParameters(
            "Latitude and longitude must be finite decimal numbers.",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_parse_with_sign_and_fraction() {
        assert_eq!(parse_coordinate("43.7").unwrap(), 43.7);
        assert_eq!(parse_coordinate("-79.4").unwrap(), -79.4);
        assert_eq!(parse_coordinate(" 0 ").unwrap(), 0.0);
    }

    #[test]
    fn malformed_and_non_finite_coordinates_are_rejected() {
        assert!(parse_coordinate("abc").is_err());
        assert!(parse_coordinate("").is_err());
        assert!(parse_coordinate("NaN").is_err());
        assert!(parse_coordinate("inf").is_err());
        assert!(parse_coordinate("1.0.0").is_err());
    }
}
