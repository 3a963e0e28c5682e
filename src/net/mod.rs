//! Networking modules for the dashboard REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the request/response model and the `Transport` seam,
//! `envelope` repairs the backend's stray-`c` bodies, `normalizer` is the
//! interceptor pair every call passes through, `client` composes them, and
//! `api` holds the endpoint helpers. `types` is the wire schema.

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod normalizer;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, TransportError};
pub use http::{Body, HttpRequest, HttpResponse, Method, Transport};
pub use normalizer::ResponseNormalizer;
