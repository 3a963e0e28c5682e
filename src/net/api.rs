//! Endpoint helpers for the dashboard backend.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, ApiError>`; the interceptor side effects
//! (envelope repair, 401 eviction, diagnostics) have already run by the time
//! an error reaches the caller.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{AuthPayload, LoginCredentials, Province, RegisterData, User};

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const LOGOUT_PATH: &str = "/logout";
pub const PROVINCES_PATH: &str = "/wilayah/provinces";

/// `POST /login`, returning the bearer token and identity.
///
/// # Errors
///
/// Any transport/HTTP error, [`ApiError::Decode`] for an unexpected body, or
/// [`ApiError::MissingToken`] when neither body shape carries a token.
pub async fn login(api: &ApiClient, credentials: &LoginCredentials) -> Result<(String, User), ApiError> {
    let payload: AuthPayload = api.post_json(LOGIN_PATH, credentials).await?;
    payload.into_session().ok_or(ApiError::MissingToken)
}

/// `POST /register`, returning the bearer token and identity.
///
/// # Errors
///
/// Same as [`login`].
pub async fn register(api: &ApiClient, data: &RegisterData) -> Result<(String, User), ApiError> {
    let payload: AuthPayload = api.post_json(REGISTER_PATH, data).await?;
    payload.into_session().ok_or(ApiError::MissingToken)
}

/// `POST /logout` to invalidate the server-side session.
///
/// # Errors
///
/// Any transport/HTTP error. Callers clear local state regardless.
pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
    api.post_empty(LOGOUT_PATH).await
}

/// `GET /wilayah/provinces`. Accepts `{ "data": [...] }` or a bare list.
///
/// # Errors
///
/// Any transport/HTTP error, or [`ApiError::Decode`] when the body is
/// neither shape.
pub async fn fetch_provinces(api: &ApiClient) -> Result<Vec<Province>, ApiError> {
    let body: serde_json::Value = api.get_json(PROVINCES_PATH).await?;
    parse_province_list(body)
}

fn parse_province_list(body: serde_json::Value) -> Result<Vec<Province>, ApiError> {
    let list = match body {
        serde_json::Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| ApiError::Decode("province response has no data field".to_owned()))?,
        other => other,
    };
    serde_json::from_value(list).map_err(|e| ApiError::Decode(e.to_string()))
}
