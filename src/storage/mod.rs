//! Client-local persistence for the credential pair.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` abstracts the raw key-value store (browser `localStorage` or an
//! in-memory map), and `credentials` layers the typed token / identity-cache
//! accessors on top. Nothing outside this module writes persisted state.

pub mod backend;
pub mod credentials;

pub use backend::{BrowserStorage, KeyValueStore, MemoryStorage};
pub use credentials::{CredentialStore, TOKEN_KEY, USER_KEY};
