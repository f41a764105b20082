use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::trip::TripResponse;

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("no usable trip (code {code}): {body}")]
    NoTrip { code: String, body: String },
}

pub const OSRM_PUBLIC_BASE_URL: &str = "https://router.project-osrm.org";
pub const OSRM_TRIP_API_PATH: &str = "/trip/v1/driving/";

/// Response bodies are cut to this many characters in error messages.
pub const ERROR_BODY_PREFIX_LEN: usize = 500;

pub struct OsrmTripClientParams {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for OsrmTripClientParams {
    fn default() -> Self {
        Self {
            base_url: OSRM_PUBLIC_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct OsrmTripClient {
    params: OsrmTripClientParams,
    client: reqwest::Client,
}

impl OsrmTripClient {
    pub fn new(params: OsrmTripClientParams) -> Result<Self, OsrmError> {
        let client = reqwest::Client::builder()
            .timeout(params.timeout)
            .build()?;

        Ok(Self { params, client })
    }

    /// Trip URL path segment in OSRM order: `lon,lat` pairs joined by `;`.
    pub fn trip_url(&self, points: &[geo_types::Point]) -> String {
        let mut url = self.params.base_url.clone();
        url.push_str(OSRM_TRIP_API_PATH);

        for (i, point) in points.iter().enumerate() {
            url.push_str(&format!("{:.6},{:.6}", point.x(), point.y()));

            if i < points.len() - 1 {
                url.push(';');
            }
        }

        url
    }

    /// One round trip pinned at the first point, with full GeoJSON geometry.
    /// Any non-success status, undecodable body, or tripless result is fatal.
    pub async fn fetch_trip(&self, points: &[geo_types::Point]) -> Result<TripResponse, OsrmError> {
        let url = self.trip_url(points);
        debug!("requesting trip for {} points", points.len());

        let response = self
            .client
            .get(url)
            .query(&[
                ("source", "first"),
                ("roundtrip", "true"),
                ("overview", "full"),
                ("geometries", "geojson"),
                ("annotations", "distance,duration"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = truncate(&response.text().await.unwrap_or_default());
            return Err(OsrmError::Api { status, message });
        }

        let body = response.text().await?;
        let trip: TripResponse = serde_json::from_str(&body)?;
        if trip.code != "Ok" || trip.trips.is_empty() {
            return Err(OsrmError::NoTrip {
                code: trip.code,
                body: truncate(&body),
            });
        }

        Ok(trip)
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREFIX_LEN).collect()
}
