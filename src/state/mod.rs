//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` owns the in-memory identity and the auth actions; `regions`
//! holds the best-effort registration lookup data loaded alongside it.

pub mod regions;
pub mod session;

pub use session::{AuthState, SessionState, SessionStore};
