//! Client for a weatherapi.com style `current.json` endpoint.

use std::{fmt, time::Duration};

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

/// Current conditions for one location. Never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub name: String,
    pub region: String,
    pub localtime: String,
    pub temp_f: f64,
    pub wind_mph: f64,
    pub humidity: u8,
    pub condition_icon: String,
    pub condition_text: String,
}

/// Why a lookup failed.
///
/// Callers render every variant the same way; the distinction only
/// reaches the logs. Wrapped reqwest errors never carry the request URL,
/// since it contains the API key.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("malformed weather response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    location: ApiLocation,
    current: ApiCurrent,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    name: String,
    region: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp_f: f64,
    wind_mph: f64,
    humidity: u8,
    condition: ApiCondition,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    icon: String,
    text: String,
}

impl From<ApiResponse> for WeatherSnapshot {
    fn from(resp: ApiResponse) -> Self {
        Self {
            name: resp.location.name,
            region: resp.location.region,
            localtime: resp.location.localtime,
            temp_f: resp.current.temp_f,
            wind_mph: resp.current.wind_mph,
            humidity: resp.current.humidity,
            condition_icon: resp.current.condition.icon,
            condition_text: resp.current.condition.text,
        }
    }
}

/// HTTP client bound to one weather service and API key.
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl WeatherClient {
    /// Creates a client for `base_url` (e.g. `https://api.weatherapi.com/v1`).
    ///
    /// A trailing slash on `base_url` is ignored. Fails only if the TLS
    /// backend cannot be initialised.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetches current conditions for a free-form location query.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_weather(&self, location: &str) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/current.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", location), ("aqi", "no")])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Decode(e.without_url()))?;
        Ok(body.into())
    }
}
