//! Blocking client for an OSRM routing server.
//!
//! Issues `GET {base}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=false&steps=true`.
//! OSRM takes coordinates longitude-first.

use std::time::Duration;

use reqwest::blocking::Client;

use er_core::{DispatchConfig, GeoPoint};

use crate::{RouteResponse, RoutingError, RoutingResult, RoutingService};

pub struct OsrmClient {
    http:     Client,
    base_url: String,
    profile:  String,
    timeout:  Duration,
}

impl OsrmClient {
    pub fn new(base_url: impl Into<String>, profile: impl Into<String>, timeout: Duration) -> RoutingResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RoutingError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            profile: profile.into(),
            timeout,
        })
    }

    pub fn from_config(config: &DispatchConfig) -> RoutingResult<Self> {
        Self::new(&config.osrm_base_url, &config.osrm_profile, config.route_timeout())
    }

    /// Request URL for a route between two points.
    pub fn route_url(&self, origin: GeoPoint, destination: GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false&steps=true",
            self.base_url, self.profile, origin.lon, origin.lat, destination.lon, destination.lat,
        )
    }
}

impl RoutingService for OsrmClient {
    fn get_route(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteResponse> {
        let url = self.route_url(origin, destination);
        tracing::debug!(%url, "requesting OSRM route");

        let response = self.http.get(&url).send().map_err(|e| self.map_err(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RoutingError::Status(status.as_u16()));
        }
        let body = response.text().map_err(|e| self.map_err(e))?;
        RouteResponse::from_json(&body)
    }
}

impl OsrmClient {
    fn map_err(&self, e: reqwest::Error) -> RoutingError {
        if e.is_timeout() {
            RoutingError::Timeout(self.timeout)
        } else {
            RoutingError::Transport(e.to_string())
        }
    }
}
