//! Leptos application with routing.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use medportal_auth::{RoleRouterGate, routes};

use crate::frontend::session::{AuthProviderScope, RouterNavigator, use_auth};

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProviderScope>
            <Router>
                <Toasts/>
                <Routes>
                    <Route path="/" view=RoleRedirect/>
                    <Route path=routes::LOGIN view=|| view! { <Landing title="Sign in"/> }/>
                    <Route
                        path=routes::PATIENT_HOME
                        view=|| view! { <Landing title="Patient portal"/> }
                    />
                    <Route
                        path=routes::DOCTOR_HOME
                        view=|| view! { <Landing title="Doctor portal"/> }
                    />
                    <Route
                        path=routes::ADMIN_HOME
                        view=|| view! { <Landing title="Administration"/> }
                    />
                </Routes>
            </Router>
        </AuthProviderScope>
    }
}

/// Role-gated redirect layout.
///
/// Only ever renders the loading view. The gate runs in an effect, i.e.
/// after the render commits, and reads the latest committed snapshot.
#[component]
fn RoleRedirect() -> impl IntoView {
    let session = use_auth();
    let snapshot = session.snapshot();
    let auth = session.auth();
    let gate = Rc::new(RefCell::new(RoleRouterGate::new(RouterNavigator::from_router())));

    create_effect(move |_| {
        // Re-run whenever a new snapshot is committed.
        snapshot.with(|_| ());
        gate.borrow_mut().sync(&auth);
    });

    view! {
        <div class="gate-loading" aria-busy="true">
            <span class="spinner"></span>
            "Loading..."
        </div>
    }
}

/// Placeholder destination page.
///
/// These routes are not role-guarded, so the page renders nothing that
/// identifies the session.
#[component]
fn Landing(title: &'static str) -> impl IntoView {
    view! {
        <main>
            <h1>{title}</h1>
        </main>
    }
}

#[component]
fn Toasts() -> impl IntoView {
    let notifier = use_auth().notifier();
    let toasts = notifier.toasts();

    view! {
        <div class="toasts" on:click=move |_| notifier.dismiss_all()>
            {move || {
                toasts.get().into_iter().map(|notice| {
                    view! { <div class="toast">{notice.message}</div> }
                }).collect_view()
            }}
        </div>
    }
}
