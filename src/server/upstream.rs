use super::ProviderSettings;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

/// Dark-Sky-compatible forecast provider.
///
/// Lookups are keyed by coordinates embedded in the request path, with the
/// API token as a leading path segment.
#[derive(Debug, Clone)]
pub struct ForecastEndpoint {
    base_url: Url,
    api_token: String,
}

impl ForecastEndpoint {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            base_url: settings.base_url,
            api_token: settings.api_token,
        }
    }

    /// URL for a forecast lookup at the given coordinates.
    ///
    /// Coordinates are rendered with exactly six fractional digits
    /// (`43.7` becomes `43.700000`), the substitution format the provider
    /// expects.
    pub fn request_url(&self, lat: f64, lon: f64) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/forecast/{}/{lat:.6},{lon:.6}", self.api_token));
        url.set_query(Some("units=ca"));
        url
    }
}

/// Google-Maps-compatible geocoding provider.
#[derive(Debug, Clone)]
pub struct GeocodeEndpoint {
    base_url: Url,
    api_token: String,
}

impl GeocodeEndpoint {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            base_url: settings.base_url,
            api_token: settings.api_token,
        }
    }

    /// URL for a geocoding lookup of a free-text address.
    ///
    /// The address is percent-encoded before substitution so that spaces and
    /// non-ASCII characters survive the query string.
    pub fn request_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/maps/api/geocode/json");
        url.set_query(Some(&format!(
            "address={}&key={}",
            utf8_percent_encode(address, NON_ALPHANUMERIC),
            self.api_token,
        )));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast_endpoint() -> ForecastEndpoint {
        ForecastEndpoint::new(ProviderSettings {
            base_url: Url::parse("https://api.forecast.io").unwrap(),
            api_token: "test-token".to_owned(),
        })
    }

    fn geocode_endpoint() -> GeocodeEndpoint {
        GeocodeEndpoint::new(ProviderSettings {
            base_url: Url::parse("https://maps.googleapis.com").unwrap(),
            api_token: "test-token".to_owned(),
        })
    }

    #[test]
    fn forecast_url_substitutes_coordinates_positionally() {
        assert_eq!(
            forecast_endpoint().request_url(43.7, -79.4).as_str(),
            "https://api.forecast.io/forecast/test-token/43.700000,-79.400000?units=ca"
        );
    }

    #[test]
    fn forecast_url_pads_integral_coordinates() {
        assert_eq!(
            forecast_endpoint().request_url(0.0, 180.0).as_str(),
            "https://api.forecast.io/forecast/test-token/0.000000,180.000000?units=ca"
        );
    }

    #[test]
    fn geocode_url_percent_encodes_spaces() {
        assert_eq!(
            geocode_endpoint().request_url("10 Downing St").as_str(),
            "https://maps.googleapis.com/maps/api/geocode/json?address=10%20Downing%20St&key=test-token"
        );
    }

    #[test]
    fn geocode_url_percent_encodes_non_ascii() {
        assert_eq!(
            geocode_endpoint().request_url("Zürich").as_str(),
            "https://maps.googleapis.com/maps/api/geocode/json?address=Z%C3%BCrich&key=test-token"
        );
    }
}
