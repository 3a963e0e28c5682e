//! Route guard for the dashboard area.
//!
//! ARCHITECTURE
//! ============
//! [`decide`] is the pure decision procedure over (session state, fresh
//! token read, path). [`RouteGuard`] subscribes to the session store, tracks
//! the current location, runs `decide` on every change, and carries out the
//! result: reconcile via `check_auth`, push a redirect, publish a view.
//!
//! Redirects are never issued while the session is loading or syncing. The
//! unauthenticated kick re-reads the token from storage at decision time
//! rather than trusting the in-memory identity alone, since another tab or a
//! pending restoration may have written it.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::Navigator;
use super::areas::{Area, LOGIN_PATH};
use crate::state::session::{SessionState, SessionStore};
use crate::util::listeners::{ListenerId, Listeners};

/// What the guarded layout should render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardView {
    /// Spinner while the session is indeterminate.
    #[default]
    Loading,
    /// The guarded children inside the layout shell.
    Content,
    /// Nothing; a redirect is in flight.
    Nothing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardDecision {
    pub view: GuardView,
    pub redirect: Option<&'static str>,
    /// Ask the session store to reconcile (token stored, identity missing).
    pub reconcile: bool,
}

impl GuardDecision {
    const fn show(view: GuardView) -> Self {
        Self { view, redirect: None, reconcile: false }
    }
}

/// Decide render/redirect for one evaluation.
///
/// `token_present` must be read from storage at the time of the call.
#[must_use]
pub fn decide(state: &SessionState, token_present: bool, path: &str) -> GuardDecision {
    match state {
        SessionState::Syncing => GuardDecision { view: GuardView::Loading, redirect: None, reconcile: true },
        SessionState::Loading => GuardDecision::show(GuardView::Loading),
        SessionState::Unauthenticated if !token_present => {
            GuardDecision { view: GuardView::Nothing, redirect: Some(LOGIN_PATH), reconcile: false }
        }
        SessionState::Unauthenticated => GuardDecision::show(GuardView::Nothing),
        SessionState::Authenticated(user) => match Area::for_role(&user.role.name) {
            Some(area) if !area.contains(path) => {
                GuardDecision { view: GuardView::Content, redirect: Some(area.prefix()), reconcile: false }
            }
            _ => GuardDecision::show(GuardView::Content),
        },
    }
}

/// Live guard bound to a session store and the current location.
///
/// Dropping the guard unsubscribes it from the store.
pub struct RouteGuard {
    inner: Rc<GuardInner>,
}

struct GuardInner {
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
    location: RefCell<String>,
    view: Cell<GuardView>,
    /// Last redirect pushed for the current location; suppresses repeats
    /// until the location changes.
    pending_redirect: Cell<Option<&'static str>>,
    reconciling: Cell<bool>,
    subscription: Cell<Option<ListenerId>>,
    views: Listeners<GuardView>,
}

impl Drop for GuardInner {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.session.unsubscribe(id);
        }
    }
}

impl GuardInner {
    fn evaluate(&self) -> GuardView {
        let state = self.session.state();
        let path = self.location.borrow().clone();
        let decision = decide(&state, self.session.credentials().has_token(), &path);

        if decision.reconcile {
            if self.reconciling.replace(true) {
                // Nested evaluation from inside check_auth; the outer call
                // publishes the settled view.
                return GuardView::Loading;
            }
            self.publish(GuardView::Loading);
            leptos::logging::log!("token present but identity missing, reconciling session");
            self.session.check_auth();
            self.reconciling.set(false);
            // The store notified us during check_auth; that nested pass has
            // already redirected and published the settled view.
            return self.view.get();
        }

        if let Some(target) = decision.redirect {
            self.redirect(target, &path);
        }
        self.publish(decision.view);
        decision.view
    }

    fn redirect(&self, target: &'static str, from: &str) {
        if self.pending_redirect.get() == Some(target) {
            return;
        }
        self.pending_redirect.set(Some(target));
        leptos::logging::log!("route guard redirect: {from} -> {target}");
        self.navigator.push(target);
    }

    fn publish(&self, view: GuardView) {
        if self.view.replace(view) != view {
            self.views.emit(&view);
        }
    }
}

impl RouteGuard {
    /// Subscribe to `session` and evaluate once for `path`.
    pub fn attach(session: SessionStore, navigator: Rc<dyn Navigator>, path: &str) -> Self {
        let inner = Rc::new(GuardInner {
            session,
            navigator,
            location: RefCell::new(path.to_owned()),
            view: Cell::new(GuardView::Loading),
            pending_redirect: Cell::new(None),
            reconciling: Cell::new(false),
            subscription: Cell::new(None),
            views: Listeners::default(),
        });
        let weak: Weak<GuardInner> = Rc::downgrade(&inner);
        let id = inner.session.subscribe(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.evaluate();
            }
        });
        inner.subscription.set(Some(id));
        inner.evaluate();
        Self { inner }
    }

    /// Feed a location change and re-evaluate.
    pub fn set_location(&self, path: &str) -> GuardView {
        let changed = {
            let mut location = self.inner.location.borrow_mut();
            if *location == path {
                false
            } else {
                path.clone_into(&mut *location);
                true
            }
        };
        if changed {
            self.inner.pending_redirect.set(None);
        }
        self.inner.evaluate()
    }

    /// Re-run the decision procedure against the current state.
    pub fn evaluate(&self) -> GuardView {
        self.inner.evaluate()
    }

    pub fn view(&self) -> GuardView {
        self.inner.view.get()
    }

    pub fn location(&self) -> String {
        self.inner.location.borrow().clone()
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Observe view changes (only fired when the view actually changes).
    pub fn watch(&self, callback: impl Fn(GuardView) + 'static) -> ListenerId {
        self.inner.views.add(move |view| callback(*view))
    }
}
