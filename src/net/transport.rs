//! Concrete [`Transport`] implementations.
//!
//! Client-side (hydrate): `fetch` via `gloo-net`, with the request timeout
//! raced against a `gloo-timers` future.
//! Native (`native` feature): `reqwest`.
//! Anything else (SSR without `native`): [`UnavailableTransport`], which
//! fails every call as a network error so server rendering never blocks on
//! a browser-only API.

use std::rc::Rc;

use super::error::TransportError;
use super::http::{HttpRequest, HttpResponse, Transport};
#[cfg(feature = "native")]
use crate::config::ClientConfig;

/// Transport for builds without a network backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableTransport;

#[async_trait::async_trait(?Send)]
impl Transport for UnavailableTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Network(format!(
            "no transport available in this build ({} {})",
            request.method.as_str(),
            request.url
        )))
    }
}

/// The best transport compiled into this build.
pub fn default_transport() -> Rc<dyn Transport> {
    #[cfg(feature = "hydrate")]
    {
        Rc::new(BrowserTransport)
    }
    #[cfg(all(feature = "native", not(feature = "hydrate")))]
    {
        match NativeTransport::new(&ClientConfig::default()) {
            Ok(transport) => Rc::new(transport),
            Err(e) => {
                leptos::logging::error!("native transport unavailable: {e}");
                Rc::new(UnavailableTransport)
            }
        }
    }
    #[cfg(not(any(feature = "hydrate", feature = "native")))]
    {
        Rc::new(UnavailableTransport)
    }
}

// =============================================================================
// BROWSER
// =============================================================================

#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use futures::future::Either;
        use gloo_net::http::Request;

        use super::http::Method;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let send = Box::pin(async move {
            let response = prepared
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Ok::<_, TransportError>(HttpResponse::from_raw(status, text))
        });

        let Some(timeout) = request.timeout else {
            return send.await;
        };
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(millis));
        match futures::future::select(send, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(TransportError::Timeout),
        }
    }
}

// =============================================================================
// NATIVE
// =============================================================================

#[cfg(feature = "native")]
pub struct NativeTransport {
    http: reqwest::Client,
}

#[cfg(feature = "native")]
impl NativeTransport {
    /// Build a `reqwest` client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { http })
    }
}

#[cfg(feature = "native")]
fn classify_reqwest_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() { TransportError::Timeout } else { TransportError::Network(e.to_string()) }
}

#[cfg(feature = "native")]
#[async_trait::async_trait(?Send)]
impl Transport for NativeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use super::http::Method;

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| classify_reqwest_error(&e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| classify_reqwest_error(&e))?;
        Ok(HttpResponse::from_raw(status, text))
    }
}
