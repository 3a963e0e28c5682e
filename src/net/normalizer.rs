//! Request/response interceptor pair applied to every API call.
//!
//! ARCHITECTURE
//! ============
//! Outbound: attach the bearer token when one is stored.
//! Inbound success: envelope repair on the body.
//! Inbound error: envelope repair on the error body, then react to the
//! failure class (timeout, 401, unreachable) and hand the error back.
//!
//! On 401 the normalizer evicts the persisted credential pair and notifies
//! `on_unauthorized` listeners. It never navigates and never touches the
//! in-memory session; the session store listens and clears its own identity.

#[cfg(test)]
#[path = "normalizer_test.rs"]
mod normalizer_test;

use super::envelope::repair_body;
use super::error::ApiError;
use super::http::{HttpRequest, HttpResponse};
use crate::storage::CredentialStore;
use crate::util::listeners::{ListenerId, Listeners};

pub struct ResponseNormalizer {
    credentials: CredentialStore,
    unauthorized: Listeners<()>,
}

impl ResponseNormalizer {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials, unauthorized: Listeners::default() }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Attach `Authorization: Bearer <token>` when a token is stored.
    #[must_use]
    pub fn on_request(&self, mut request: HttpRequest) -> HttpRequest {
        if let Some(token) = self.credentials.token() {
            request.set_header("Authorization", &format!("Bearer {token}"));
        }
        request
    }

    /// Repair a success response's body.
    #[must_use]
    pub fn on_response(&self, mut response: HttpResponse) -> HttpResponse {
        response.body = repair_body(std::mem::take(&mut response.body));
        response
    }

    /// Process a failed call and return the (possibly repaired) error for
    /// the caller to propagate.
    #[must_use]
    pub fn on_error(&self, error: ApiError) -> ApiError {
        match error {
            ApiError::Timeout => {
                leptos::logging::error!("request timeout: server did not respond in time");
                ApiError::Timeout
            }
            ApiError::Network(message) => {
                leptos::logging::error!("network error: server unreachable: {message}");
                ApiError::Network(message)
            }
            ApiError::Http { status, body } => {
                let body = repair_body(body);
                if status == 401 {
                    leptos::logging::warn!("401 unauthorized: evicting stored credentials");
                    self.credentials.evict();
                    self.unauthorized.emit(&());
                }
                ApiError::Http { status, body }
            }
            other => other,
        }
    }

    /// Register a callback fired after a 401 evicted the credentials.
    pub fn on_unauthorized(&self, callback: impl Fn() + 'static) -> ListenerId {
        self.unauthorized.add(move |()| callback())
    }

    pub fn remove_unauthorized(&self, id: ListenerId) -> bool {
        self.unauthorized.remove(id)
    }
}
