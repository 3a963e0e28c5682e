//! Role → dashboard area map.

#[cfg(test)]
#[path = "areas_test.rs"]
mod areas_test;

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// Top-level dashboard area a role is confined to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Admin,
    Pusdatin,
    /// Regional environmental agencies (province and regency/city level).
    Dlh,
}

impl Area {
    /// Map a role name (any case) to its area. Unknown roles are unmapped.
    #[must_use]
    pub fn for_role(role_name: &str) -> Option<Self> {
        match role_name.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "pusdatin" => Some(Self::Pusdatin),
            "provinsi" | "kabupaten/kota" => Some(Self::Dlh),
            _ => None,
        }
    }

    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Admin => "/admin-dashboard",
            Self::Pusdatin => "/pusdatin-dashboard",
            Self::Dlh => "/dlh-dashboard",
        }
    }

    #[must_use]
    pub fn contains(self, path: &str) -> bool {
        path.starts_with(self.prefix())
    }
}

/// Where to send a user right after login/register.
#[must_use]
pub fn landing_path(role_name: &str) -> &'static str {
    Area::for_role(role_name).map_or(ROOT_PATH, Area::prefix)
}
