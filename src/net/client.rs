//! HTTP client composing config, transport, and the response normalizer.
//!
//! Every call runs: default headers → outbound interceptor → transport →
//! inbound interceptor (success or error path). Non-2xx responses surface as
//! [`ApiError::Http`] after the error path ran.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::http::{Body, HttpRequest, HttpResponse, Method, Transport};
use super::normalizer::ResponseNormalizer;
use super::transport::default_transport;
use crate::config::{ClientConfig, ConfigError};
use crate::storage::CredentialStore;

const DEFAULT_HEADERS: [(&str, &str); 2] = [("X-Requested-With", "XMLHttpRequest"), ("Accept", "application/json")];

#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ClientConfig>,
    transport: Rc<dyn Transport>,
    normalizer: Rc<ResponseNormalizer>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn Transport>, credentials: CredentialStore) -> Self {
        Self { config: Rc::new(config), transport, normalizer: Rc::new(ResponseNormalizer::new(credentials)) }
    }

    /// Client for the running app: environment config, this build's default
    /// transport, and `localStorage` credentials.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(ClientConfig::from_env()?, default_transport(), CredentialStore::browser()))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &ResponseNormalizer {
        &self.normalizer
    }

    pub fn credentials(&self) -> &CredentialStore {
        self.normalizer.credentials()
    }

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.config.endpoint(path))
            .timeout(Duration::from_secs(self.config.timeout_secs));
        for (name, value) in DEFAULT_HEADERS {
            request.set_header(name, value);
        }
        request
    }

    /// Run one request through the interceptor pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Timeout`] / [`ApiError::Network`] when no response
    /// arrived and [`ApiError::Http`] for non-2xx statuses.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = self.normalizer.on_request(request);
        match self.transport.send(request).await {
            Ok(response) if response.is_success() => Ok(self.normalizer.on_response(response)),
            Ok(response) => Err(self.normalizer.on_error(ApiError::Http { status: response.status, body: response.body })),
            Err(e) => Err(self.normalizer.on_error(e.into())),
        }
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Any [`send`](Self::send) error, or [`ApiError::Decode`] when the body
    /// does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::Get, path)).await?;
        decode_body(response.body)
    }

    /// `POST path` with a JSON payload and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Any [`send`](Self::send) error, [`ApiError::Serialize`] for the
    /// payload, or [`ApiError::Decode`] for the response.
    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::Post, path).json(payload)?;
        let response = self.send(request).await?;
        decode_body(response.body)
    }

    /// `POST path` with no payload, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Any [`send`](Self::send) error.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::Post, path)).await.map(|_| ())
    }
}

pub(crate) fn decode_body<T: DeserializeOwned>(body: Body) -> Result<T, ApiError> {
    match body {
        Body::Json(value) => serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string())),
        Body::Text(text) => Err(ApiError::Decode(format!("expected JSON body, got text ({} bytes)", text.len()))),
        Body::Empty => Err(ApiError::Decode("empty response body".to_owned())),
    }
}
