// API client module: a small blocking HTTP client for the movements API
// (`/api/v1`). Each method issues exactly one request and returns the
// decoded body, or an `ApiError` for transport failures and non-2xx
// responses. There is no retry: failures go straight back to the caller.

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::model::{CreateResponse, HealthStatus, MovementPage, MovementQuery, NewMovement};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the movements API. Holds the reqwest blocking client, the
/// base URL and the headers sent with every request; nothing changes after
/// construction, so a clone can be shared freely.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl ApiClient {
    /// Build a client for `config`. Fails if the token cannot be used as a
    /// header value or the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::Client)?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ApiError::InvalidToken)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(ApiClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn movements_url(&self) -> String {
        format!("{}/api/v1/movements", self.base_url)
    }

    /// List movements. Only the filters set on `query` are sent.
    pub fn get_movements(&self, query: &MovementQuery) -> Result<MovementPage> {
        let url = self.movements_url();
        debug!(%url, ?query, "listing movements");
        let res = self.send(self.client.get(&url).query(query), &url)?;
        decode(res)
    }

    /// Create a single movement (JSON object body).
    pub fn create_movement(&self, movement: &NewMovement) -> Result<CreateResponse> {
        let url = self.movements_url();
        debug!(%url, kind = %movement.kind, amount = movement.amount, "creating movement");
        let res = self.send(self.client.post(&url).json(movement), &url)?;
        decode(res)
    }

    /// Create several movements in one request. The slice goes out as a
    /// JSON array to the same endpoint used by `create_movement`.
    pub fn create_movements_bulk(&self, movements: &[NewMovement]) -> Result<CreateResponse> {
        let url = self.movements_url();
        debug!(%url, rows = movements.len(), "creating movements in bulk");
        let res = self.send(self.client.post(&url).json(movements), &url)?;
        decode(res)
    }

    /// Fetch the API status document from `/api/v1`.
    pub fn health_check(&self) -> Result<HealthStatus> {
        let url = format!("{}/api/v1", self.base_url);
        debug!(%url, "health check");
        let res = self.send(self.client.get(&url), &url)?;
        decode(res)
    }

    /// Attach the shared headers, send, and turn non-2xx into `ApiError::Http`.
    fn send(&self, req: RequestBuilder, url: &str) -> Result<Response> {
        let res = req
            .headers(self.headers.clone())
            .send()
            .map_err(|source| ApiError::Connection {
                url: url.to_string(),
                source,
            })?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            warn!(%url, %status, "request rejected");
            return Err(ApiError::Http { status, body });
        }
        Ok(res)
    }
}

fn decode<T: DeserializeOwned>(res: Response) -> Result<T> {
    res.json().map_err(ApiError::Decode)
}
