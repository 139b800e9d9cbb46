/// Plain-text landing page listing the routes this proxy exposes.
pub async fn index_handler() -> String {
    format!(
        concat!(
            "{} v{}\n",
            "\n",
            "Routes:\n",
            "  GET /fetch/{{lat}}/{{lon}}   relay a forecast lookup\n",
            "  GET /geocode?address=...   relay a geocoding lookup\n",
            "  GET /health                liveness probe\n",
        ),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
}
