use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method};
use url::Url;

use super::decode::{self, RawResponse};
use super::marshal::Payload;
use super::ApiRequest;
use crate::config::Config;
use crate::error::ApiError;

/// HTTP transport bound to one API endpoint and secret key.
#[derive(Clone)]
pub struct ApiClient {
    remote: Url,
    secret_key: String,
    client: Client,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("remote", &self.remote.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            remote: config.api_url.clone(),
            secret_key: config.secret_key.clone(),
            client,
        })
    }

    /// Run a request: send it, map error statuses, then let the request
    /// interpret the body.
    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let raw = self
            .send(request.method(), &request.path(), request.payload())
            .await?;
        let raw = decode::check_status(raw)?;
        request.parse(raw)
    }

    pub async fn get(&self, path: &str) -> Result<RawResponse, ApiError> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, payload: &Payload) -> Result<RawResponse, ApiError> {
        self.send(Method::POST, path, Some(payload)).await
    }

    pub async fn put(&self, path: &str, payload: &Payload) -> Result<RawResponse, ApiError> {
        self.send(Method::PUT, path, Some(payload)).await
    }

    pub async fn delete(&self, path: &str) -> Result<RawResponse, ApiError> {
        self.send(Method::DELETE, path, None).await
    }

    /// Issue a single request and return whatever came back.
    ///
    /// Only network failures are errors here; API error statuses are
    /// returned as-is.
    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Payload>,
    ) -> Result<RawResponse, ApiError> {
        let url = self.remote.join(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .basic_auth(&self.secret_key, Some(""));
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.remote
    }
}
