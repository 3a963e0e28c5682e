//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the only writer of the in-memory identity. Persisted state
//! goes through [`CredentialStore`]; consumers (the route guard, Leptos
//! components) hold a cloned [`SessionStore`] handle and subscribe to
//! [`AuthState`] changes instead of reading globals.
//!
//! TRADE-OFFS
//! ==========
//! Notifications are delivered synchronously on every mutation. The route
//! guard relies on this to re-evaluate in the same turn that `check_auth`
//! resolves a syncing session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::regions::{RegionState, sample_provinces};
use crate::net::api;
use crate::net::types::{JenisDlh, LoginCredentials, Province, Regency, RegisterData, User};
use crate::net::{ApiClient, ApiError};
use crate::routing::{LOGIN_PATH, Navigator, landing_path};
use crate::storage::CredentialStore;
use crate::util::listeners::{ListenerId, Listeners};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

/// Resolved view of the session at one instant.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    /// Restoration or an auth action is in flight.
    Loading,
    /// A token is stored but the identity has not reached memory yet.
    Syncing,
    Authenticated(User),
    Unauthenticated,
}

impl SessionState {
    /// Derive the state from the in-memory flags and a fresh token read.
    #[must_use]
    pub fn derive(loading: bool, user: Option<&User>, token_present: bool) -> Self {
        match (loading, user) {
            (true, _) => Self::Loading,
            (false, Some(user)) => Self::Authenticated(user.clone()),
            (false, None) if token_present => Self::Syncing,
            (false, None) => Self::Unauthenticated,
        }
    }
}

/// Shared handle to the session. Clones point at the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<SessionInner>,
}

struct SessionInner {
    api: ApiClient,
    navigator: Rc<dyn Navigator>,
    state: RefCell<AuthState>,
    listeners: Listeners<AuthState>,
    regions: RefCell<RegionState>,
    /// Auth actions in flight; `loading` stays set while any remain.
    actions: Cell<u32>,
    /// Login/register calls in flight; they own the identity outcome, so a
    /// 401 seen meanwhile does not clear it.
    identity_actions: Cell<u32>,
    unauthorized_listener: Cell<Option<ListenerId>>,
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        if let Some(id) = self.unauthorized_listener.take() {
            self.api.normalizer().remove_unauthorized(id);
        }
    }
}

/// Keeps `loading` set for the lifetime of an auth action. Dropping it
/// (success, error, or a cancelled future) clears the flag once no other
/// action is still in flight.
struct ActionScope {
    inner: Rc<SessionInner>,
    owns_identity: bool,
}

impl Drop for ActionScope {
    fn drop(&mut self) {
        if self.owns_identity {
            self.inner.identity_actions.set(self.inner.identity_actions.get().saturating_sub(1));
        }
        let remaining = self.inner.actions.get().saturating_sub(1);
        self.inner.actions.set(remaining);
        self.inner.update(|s| s.loading = remaining > 0);
    }
}

impl SessionInner {
    fn update(&self, apply: impl FnOnce(&mut AuthState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };
        self.listeners.emit(&snapshot);
    }

    fn credentials(&self) -> &CredentialStore {
        self.api.credentials()
    }

    fn handle_unauthorized(&self) {
        if self.identity_actions.get() > 0 {
            return;
        }
        if self.state.borrow().user.is_some() {
            leptos::logging::warn!("session rejected by server, clearing identity");
            self.update(|s| s.user = None);
        }
    }
}

impl SessionStore {
    /// Create a store in the initial `loading` state without restoring.
    pub fn new(api: ApiClient, navigator: Rc<dyn Navigator>) -> Self {
        let inner = Rc::new(SessionInner {
            api,
            navigator,
            state: RefCell::new(AuthState { user: None, loading: true }),
            listeners: Listeners::default(),
            regions: RefCell::new(RegionState::default()),
            actions: Cell::new(0),
            identity_actions: Cell::new(0),
            unauthorized_listener: Cell::new(None),
        });
        let weak: Weak<SessionInner> = Rc::downgrade(&inner);
        let id = inner.api.normalizer().on_unauthorized(move || {
            if let Some(inner) = weak.upgrade() {
                inner.handle_unauthorized();
            }
        });
        inner.unauthorized_listener.set(Some(id));
        Self { inner }
    }

    /// Create a store and run the initial restoration immediately.
    ///
    /// Only for contexts that can read real storage. Under server rendering
    /// storage is inert, so restoring there would resolve a signed-in user
    /// to "no session"; build with [`new`](Self::new) and run
    /// [`bootstrap`](Self::bootstrap) on the client instead.
    pub fn mount(api: ApiClient, navigator: Rc<dyn Navigator>) -> Self {
        let store = Self::new(api, navigator);
        store.check_auth();
        store
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn credentials(&self) -> &CredentialStore {
        self.inner.credentials()
    }

    pub fn snapshot(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    /// Current state, reading the token straight from storage.
    pub fn state(&self) -> SessionState {
        let token_present = self.credentials().has_token();
        let state = self.inner.state.borrow();
        SessionState::derive(state.loading, state.user.as_ref(), token_present)
    }

    /// Observe every state change. Callbacks run synchronously after the
    /// mutation.
    pub fn subscribe(&self, callback: impl Fn(&AuthState) + 'static) -> ListenerId {
        self.inner.listeners.add(callback)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.listeners.remove(id)
    }

    /// Raw identity setter. Does not touch persisted state.
    pub fn set_user(&self, user: Option<User>) {
        self.inner.update(|s| s.user = user);
    }

    /// Reconcile in-memory identity with the persisted credential pair.
    ///
    /// Token and cache present: restore the identity, or evict both when the
    /// cache does not deserialize. Token without cache: evict the token (a
    /// half-written pair can never restore). No token: no session. Ends with
    /// `loading` cleared unless an auth action is still in flight.
    pub fn check_auth(&self) {
        let credentials = self.credentials();
        let user = match (credentials.token(), credentials.cached_user()) {
            (Some(_), Ok(Some(user))) => Some(user),
            (Some(_), Err(e)) => {
                leptos::logging::error!("identity cache corrupt, clearing session: {e}");
                credentials.evict();
                None
            }
            (Some(_), Ok(None)) => {
                leptos::logging::warn!("token without identity cache, clearing token");
                credentials.evict();
                None
            }
            (None, _) => None,
        };
        let in_flight = self.inner.actions.get() > 0;
        self.inner.update(|s| {
            s.user = user;
            s.loading = in_flight;
        });
    }

    fn begin_action(&self, owns_identity: bool) -> ActionScope {
        self.inner.actions.set(self.inner.actions.get() + 1);
        if owns_identity {
            self.inner.identity_actions.set(self.inner.identity_actions.get() + 1);
        }
        self.inner.update(|s| s.loading = true);
        ActionScope { inner: self.inner.clone(), owns_identity }
    }

    /// Authenticate, persist the session, and redirect to the role's area.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged; the identity is left as it was.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), ApiError> {
        let _scope = self.begin_action(true);
        self.credentials().evict();
        match api::login(&self.inner.api, credentials).await {
            Ok((token, user)) => self.establish(&token, user),
            Err(e) => {
                leptos::logging::error!("login failed: {e}");
                Err(e)
            }
        }
    }

    /// Register an account, persist the session, and redirect like
    /// [`login`](Self::login).
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged; the identity is left as it was.
    pub async fn register(&self, data: &RegisterData) -> Result<(), ApiError> {
        let _scope = self.begin_action(true);
        self.credentials().evict();
        match api::register(&self.inner.api, data).await {
            Ok((token, user)) => self.establish(&token, user),
            Err(e) => {
                leptos::logging::error!("register failed: {e}");
                Err(e)
            }
        }
    }

    fn establish(&self, token: &str, user: User) -> Result<(), ApiError> {
        self.credentials().persist(token, &user)?;
        let destination = landing_path(&user.role.name);
        self.set_user(Some(user));
        self.inner.navigator.push(destination);
        Ok(())
    }

    /// End the session. The server call is best-effort; local state is
    /// always cleared and the user sent to the login page.
    pub async fn logout(&self) {
        let _scope = self.begin_action(false);
        if let Err(e) = api::logout(&self.inner.api).await {
            leptos::logging::warn!("logout request failed, forcing local logout: {e}");
        }
        self.credentials().clear_all();
        self.set_user(None);
        self.inner.navigator.push(LOGIN_PATH);
    }

    /// Client-side startup: restore the session, then load region data.
    pub async fn bootstrap(&self) {
        self.check_auth();
        self.load_regions().await;
    }

    /// Fetch the province list once per store, falling back to the sample
    /// set when the request fails and fallback is enabled. Later calls (and
    /// calls overlapping a fetch in flight) are no-ops.
    pub async fn load_regions(&self) {
        {
            let mut regions = self.inner.regions.borrow_mut();
            if regions.loaded || regions.fetching {
                return;
            }
            regions.fetching = true;
        }
        let provinces = match api::fetch_provinces(&self.inner.api).await {
            Ok(provinces) => provinces,
            Err(e) if self.inner.api.config().region_fallback => {
                leptos::logging::warn!("province fetch failed, using sample list: {e}");
                sample_provinces()
            }
            Err(e) => {
                leptos::logging::warn!("province fetch failed: {e}");
                Vec::new()
            }
        };
        let mut regions = self.inner.regions.borrow_mut();
        regions.provinces = provinces;
        regions.fetching = false;
        regions.loaded = true;
    }

    pub fn provinces(&self) -> Vec<Province> {
        self.inner.regions.borrow().provinces.clone()
    }

    pub fn regencies(&self) -> Vec<Regency> {
        self.inner.regions.borrow().regencies.clone()
    }

    pub fn jenis_dlhs(&self) -> Vec<JenisDlh> {
        self.inner.regions.borrow().jenis_dlhs.clone()
    }

    pub fn regions_loaded(&self) -> bool {
        self.inner.regions.borrow().loaded
    }
}
