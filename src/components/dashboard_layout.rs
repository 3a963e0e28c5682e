//! Guarded layout for every dashboard area.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps all `/admin-dashboard`, `/pusdatin-dashboard` and `/dlh-dashboard`
//! routes. A [`RouteGuard`] owned by the layout follows the router location
//! and decides between spinner, nothing, and the guarded children.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use super::use_session;
use crate::routing::Navigator;
use crate::routing::guard::{GuardView, RouteGuard};

/// Dashboard shell gated by the session's route guard.
#[component]
pub fn DashboardLayout(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let location = use_location();
    let navigate = use_navigate();
    let navigator: Rc<dyn Navigator> = Rc::new(move |path: &str| navigate(path, NavigateOptions::default()));

    let guard = RouteGuard::attach(session, navigator, &location.pathname.get_untracked());
    let guard_view = RwSignal::new(guard.view());
    guard.watch(move |view| guard_view.set(view));
    let guard = StoredValue::new_local(guard);

    Effect::new(move || {
        let path = location.pathname.get();
        guard.with_value(|g| g.set_location(&path));
    });

    move || match guard_view.get() {
        GuardView::Loading => view! {
            <div class="dashboard-loading">
                <div class="dashboard-loading__spinner"></div>
                <p class="dashboard-loading__label">"Memuat Dashboard..."</p>
            </div>
        }
        .into_any(),
        GuardView::Nothing => ().into_any(),
        GuardView::Content => view! {
            <div class="dashboard-layout">
                <main class="dashboard-layout__main">{children()}</main>
            </div>
        }
        .into_any(),
    }
}
