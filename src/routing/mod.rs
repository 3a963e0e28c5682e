//! Role-based routing: area map, navigation seam, and the route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store uses `areas` for its post-login redirect; the guard uses
//! it to keep an authenticated user inside their role's area. Both navigate
//! through the same [`Navigator`].

pub mod areas;
pub mod guard;

pub use areas::{Area, LOGIN_PATH, ROOT_PATH, landing_path};
pub use guard::{GuardDecision, GuardView, RouteGuard, decide};

/// Client-side navigation (router push).
pub trait Navigator {
    fn push(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn push(&self, path: &str) {
        self(path);
    }
}
