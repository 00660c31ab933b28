//! CarQuery HTTP client.
//!
//! Every operation is a single GET against the API endpoint with a `cmd`
//! parameter and optional filters. There are no retries: transport failures
//! are returned as [`CarQueryError::Http`] exactly as reqwest reports them.

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::envelope::{ResponseScope, decode_envelope, payload_into, payload_into_list};
use crate::error::CarQueryError;
use crate::params::{CMD_PARAM, Command, QueryParams, build_url};
use crate::types::{Make, ModelName, Record, YearRange};

/// Default endpoint for the CarQuery API.
pub const DEFAULT_BASE_URL: &str = "http://www.carqueryapi.com/api/0.3/";

/// Environment variable overriding the endpoint.
pub const BASE_URL_ENV: &str = "CAR_QUERY_BASE_URL";

/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "CAR_QUERY_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the CarQuery client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarQueryConfig {
    /// Endpoint URL, including the API version path
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CarQueryConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create a config from `CAR_QUERY_BASE_URL` and `CAR_QUERY_TIMEOUT_SECS`,
    /// falling back to the defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.base_url = url;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!(value = %raw, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }

        config
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for CarQueryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the CarQuery API.
///
/// Holds no mutable state; clones share one connection pool and can be used
/// from any number of tasks.
#[derive(Debug, Clone)]
pub struct CarQueryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CarQueryClient {
    /// Create a new CarQuery client.
    pub fn new(config: CarQueryConfig) -> Result<Self, CarQueryError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| CarQueryError::InvalidUrl {
                url: config.base_url.clone(),
                message: e.to_string(),
            })?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The endpoint every request is built from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request URL for `command` with the given filters.
    pub fn url_for(&self, command: Command, params: &QueryParams) -> Url {
        build_url(&self.base_url, command, params)
    }

    /// Issue a GET for `url` and decode the body according to `scope`.
    ///
    /// An `error` reported in the body always wins, even on a non-success
    /// status; otherwise a non-success status is returned as an HTTP error.
    pub async fn query(&self, url: Url, scope: ResponseScope<'_>) -> Result<Value, CarQueryError> {
        debug!(%url, ?scope, "sending CarQuery request");

        let response = self.http.get(url).send().await?;
        let status_error = response.error_for_status_ref().err();
        let body = response.text().await?;

        trace!(len = body.len(), %body, "received CarQuery response");

        let result = decode_envelope(&body, scope);
        match (&result, status_error) {
            (Err(CarQueryError::Api { message }), _) => {
                warn!(%message, "CarQuery API returned an error");
            }
            (_, Some(err)) => return Err(err.into()),
            _ => {}
        }
        result
    }

    /// Build the URL for `command`, send it and unwrap the command's payload.
    async fn run(&self, command: Command, params: QueryParams) -> Result<Value, CarQueryError> {
        if params.get(CMD_PARAM).is_some() {
            debug!(%command, "dropping caller-supplied cmd parameter");
        }
        let url = self.url_for(command, &params);
        self.query(url, ResponseScope::for_command(command)).await
    }

    /// Range of model years in the database (`getYears`).
    pub async fn years(&self) -> Result<YearRange, CarQueryError> {
        let payload = self.run(Command::GetYears, QueryParams::new()).await?;
        payload_into(payload)
    }

    /// Makes, optionally restricted by `year` and `sold_in_us` (`getMakes`).
    pub async fn makes(&self, params: impl Into<QueryParams>) -> Result<Vec<Make>, CarQueryError> {
        let payload = self.run(Command::GetMakes, params.into()).await?;
        payload_into_list(payload)
    }

    /// Models of a make (`getModels`).
    ///
    /// `make` is required by the API; without it this fails with
    /// [`CarQueryError::Api`].
    pub async fn models(
        &self,
        params: impl Into<QueryParams>,
    ) -> Result<Vec<ModelName>, CarQueryError> {
        let payload = self.run(Command::GetModels, params.into()).await?;
        payload_into_list(payload)
    }

    /// Trims matching the filters (`getTrims`). An empty list means no match.
    ///
    /// Filters are forwarded as given. The API caps unfiltered results, but
    /// no particular count is assumed here.
    pub async fn trims(&self, params: impl Into<QueryParams>) -> Result<Vec<Record>, CarQueryError> {
        let payload = self.run(Command::GetTrims, params.into()).await?;
        payload_into_list(payload)
    }

    /// Full detail of one model id (`getModel`). Empty when nothing matched.
    pub async fn model(&self, params: impl Into<QueryParams>) -> Result<Record, CarQueryError> {
        let payload = self.run(Command::GetModel, params.into()).await?;
        payload_into(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn config_defaults() {
        let config = CarQueryConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config, CarQueryConfig::default());
    }

    #[test]
    fn config_builder() {
        let config = CarQueryConfig::new()
            .with_base_url("http://localhost:8080/api/0.3/")
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080/api/0.3/");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_from_lookup() {
        let env = HashMap::from([
            (BASE_URL_ENV, "http://localhost:9000/api/0.3/"),
            (TIMEOUT_ENV, "12"),
        ]);
        let config = CarQueryConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://localhost:9000/api/0.3/");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn config_from_lookup_ignores_bad_values() {
        let env = HashMap::from([(BASE_URL_ENV, "  "), (TIMEOUT_ENV, "soon")]);
        let config = CarQueryConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config, CarQueryConfig::new());
    }

    #[test]
    fn client_creation() {
        let client = CarQueryClient::new(CarQueryConfig::new()).unwrap();
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn invalid_base_url() {
        let err = CarQueryClient::new(CarQueryConfig::new().with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, CarQueryError::InvalidUrl { .. }));
    }

    #[test]
    fn url_for_command() {
        let client = CarQueryClient::new(CarQueryConfig::new()).unwrap();
        let url = client.url_for(
            Command::GetMakes,
            &QueryParams::new().with("year", 2012).with("cmd", "getTrims"),
        );
        assert_eq!(
            url.as_str(),
            "http://www.carqueryapi.com/api/0.3/?cmd=getMakes&year=2012"
        );
    }
}
