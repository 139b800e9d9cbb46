mod forecast;
mod geocode;
mod health;
mod index;

pub use forecast::*;
pub use geocode::*;
pub use health::*;
pub use index::*;

use axum::{
    Json,
    body::{Body, Bytes},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    message: &'static str,
}

/// Failures a proxied request can surface to the client.
///
/// Anything else is confined to the single failing request by the
/// panic-catch layer; the server process keeps running.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The request parameters could not be turned into an upstream call.
    /// No outbound request has been made.
    #[error("{0}")]
    InvalidParameters(&'static str),

    /// The upstream provider could not be reached or answered unusably.
    #[error("{0}")]
    UpstreamUnavailable(&'static str),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ProxyError::InvalidParameters(message) => (StatusCode::BAD_REQUEST, message),
            ProxyError::UpstreamUnavailable(message) => (StatusCode::BAD_GATEWAY, message),
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Wrap an upstream (or fixture) body for relaying to the client unchanged.
fn relay_json(body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime::APPLICATION_JSON.as_ref())
            .expect("static mime type should be a valid header value"),
    );
    response
}

/// Read a canned response body from the fixture directory.
async fn read_fixture(dir: &Path, file_name: &str) -> Result<Bytes, ProxyError> {
    match tokio::fs::read(dir.join(file_name)).await {
        Ok(contents) => Ok(Bytes::from(contents)),
        Err(err) => {
            warn!("Failed to read fixture '{file_name}': {err:?}");
            Err(ProxyError::UpstreamUnavailable(
                "Failed to read canned response for this route.",
            ))
        }
    }
}
