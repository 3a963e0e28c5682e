//! # dashboard-session
//!
//! Session reconciliation and route-guard core for the role-segmented
//! dashboard frontend.
//!
//! This crate owns the persisted credential pair, the HTTP response
//! normalizer that repairs the backend's `c{`/`c[` envelope defect, the
//! in-memory session store, and the route guard that decides between
//! spinner, guarded content, and redirect. A thin Leptos layer in
//! `components` wires the guard to the router.

pub mod components;
pub mod config;
pub mod net;
pub mod routing;
pub mod state;
pub mod storage;
pub mod util;

#[cfg(test)]
mod test_support;
