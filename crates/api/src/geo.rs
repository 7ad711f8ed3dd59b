//! Kakao local search client used to geocode schedule locations.
//!
//! Address lookup is attempted first; when the address endpoint has no match
//! (venues are often registered as places, not addresses) the keyword search
//! endpoint is tried as a fallback. Lookups are best-effort: any failure is
//! logged and the schedule is stored without coordinates.

use serde_json::Value;

use crate::config::KakaoLocalConfig;

const ADDRESS_ENDPOINT: &str = "https://dapi.kakao.com/v2/local/search/address.json";
const KEYWORD_ENDPOINT: &str = "https://dapi.kakao.com/v2/local/search/keyword.json";

/// Number of decimal places kept on stored coordinates.
const COORD_DECIMALS: i32 = 7;

/// Client for the Kakao local REST API.
#[derive(Clone)]
pub struct KakaoLocalClient {
    http: reqwest::Client,
    config: KakaoLocalConfig,
}

impl KakaoLocalClient {
    pub fn new(config: KakaoLocalConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Resolve a free-form location string to `(latitude, longitude)`.
    ///
    /// Returns `None` when neither endpoint finds a match or a request fails;
    /// callers store `NULL` coordinates in that case.
    pub async fn geocode(&self, query: &str) -> Option<(f64, f64)> {
        if query.trim().is_empty() {
            return None;
        }

        if let Some(coords) = self.search(ADDRESS_ENDPOINT, query).await {
            return Some(coords);
        }
        self.search(KEYWORD_ENDPOINT, query).await
    }

    async fn search(&self, endpoint: &str, query: &str) -> Option<(f64, f64)> {
        let response = self
            .http
            .get(endpoint)
            .query(&[("query", query)])
            .header(
                "Authorization",
                format!("KakaoAK {}", self.config.rest_api_key),
            )
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                tracing::warn!(status = %r.status(), endpoint, "Kakao local search rejected");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, endpoint, "Kakao local search request failed");
                return None;
            }
        };

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, endpoint, "Kakao local search returned invalid JSON");
                return None;
            }
        };

        first_coordinates(&body)
    }
}

/// Pull `(latitude, longitude)` out of the first result document.
///
/// Kakao returns coordinates as strings, with `x` = longitude and
/// `y` = latitude.
fn first_coordinates(body: &Value) -> Option<(f64, f64)> {
    let doc = body.get("documents")?.as_array()?.first()?;
    let longitude: f64 = doc.get("x")?.as_str()?.parse().ok()?;
    let latitude: f64 = doc.get("y")?.as_str()?.parse().ok()?;
    Some((truncate_coord(latitude), truncate_coord(longitude)))
}

/// Truncate a coordinate toward zero at seven decimal places.
pub fn truncate_coord(value: f64) -> f64 {
    let factor = 10f64.powi(COORD_DECIMALS);
    (value * factor).trunc() / factor
}
