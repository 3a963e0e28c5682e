//! Leptos integration for the session core.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app root calls [`provide_session`] once; pages and layouts read the
//! store back with [`use_session`] or the mirrored `RwSignal<AuthState>`.
//! The store itself is single-threaded, so it lives in a local `StoredValue`.

pub mod dashboard_layout;

use leptos::prelude::*;

use crate::state::{AuthState, SessionStore};

/// Share `store` with descendants and mirror its state into a signal.
///
/// Pass a store built with [`SessionStore::new`]. Restoration and the region
/// fetch run from an effect, so they only happen on the client; a server
/// render sees the initial loading state and the guard shows its spinner.
pub fn provide_session(store: SessionStore) {
    let auth = RwSignal::new(store.snapshot());
    store.subscribe(move |state| auth.set(state.clone()));
    let stored = StoredValue::new_local(store);
    provide_context(stored);
    provide_context(auth);

    Effect::new(move || {
        let store = stored.get_value();
        leptos::task::spawn_local(async move { store.bootstrap().await });
    });
}

/// The session store provided by [`provide_session`].
///
/// # Panics
///
/// Panics if no ancestor called [`provide_session`].
pub fn use_session() -> SessionStore {
    expect_context::<StoredValue<SessionStore, LocalStorage>>().get_value()
}

/// Reactive view of the session's [`AuthState`].
pub fn use_auth() -> RwSignal<AuthState> {
    expect_context::<RwSignal<AuthState>>()
}
