//! Wire DTOs for the dashboard backend.
//!
//! DESIGN
//! ======
//! Field names mirror the backend JSON (Indonesian where the backend is).
//! `User` keeps unknown fields in `extra` so the identity cache written at
//! login deserializes back into an equal value on restore.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Role embedded in the identity at login time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    /// Case-insensitive role name (e.g. `"admin"`, `"Kabupaten/Kota"`).
    pub name: String,
}

/// Environmental agency category (DLH type) a user belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JenisDlh {
    pub id: i64,
    pub name: String,
}

/// The authenticated identity as returned by `/login` and `/register`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jenis_dlh_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jenis_dlh: Option<JenisDlh>,
    /// Phone number (`nomor_telepon` on the wire).
    #[serde(rename = "nomor_telepon", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regency_name: Option<String>,
    /// Coastal-region flag as sent by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pesisir: Option<String>,
    /// Bearer token, when the backend nests it inside the user object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Any other fields the backend sends.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Role name lowercased for routing decisions.
    #[must_use]
    pub fn role_key(&self) -> String {
        self.role.name.trim().to_lowercase()
    }
}

/// Body of a successful `/login` or `/register` response.
///
/// The token arrives either at the top level (`{token, user}`) or nested as
/// `user.token`; both shapes are accepted.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    pub user: User,
}

impl AuthPayload {
    /// Split into `(token, user)`, preferring the top-level token.
    /// Returns `None` when neither shape carries a non-empty token.
    #[must_use]
    pub fn into_session(self) -> Option<(String, User)> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .or_else(|| self.user.token.clone().filter(|t| !t.is_empty()))?;
        Some((token, self.user))
    }
}

/// Email + password login form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Self-registration form for regional DLH accounts.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub nomor_telepon: String,
    pub password: String,
    pub password_confirmation: String,
    pub role_id: i64,
    pub jenis_dlh_id: i64,
    pub province_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regency_id: Option<String>,
    pub pesisir: String,
}

impl std::fmt::Debug for RegisterData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterData")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role_id", &self.role_id)
            .field("province_id", &self.province_id)
            .field("regency_id", &self.regency_id)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regency {
    pub id: String,
    pub name: String,
}
