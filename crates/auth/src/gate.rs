//! Role-gated redirect.
//!
//! The gate maps the current role to a landing route and navigates there.
//! It is modeled as an explicit transition table plus a "last evaluated
//! role" memo, so navigation fires on state entry only: evaluating again
//! with the same role is a no-op, whatever the caller's render cadence.

use serde::Serialize;

use medportal_core::AuthFault;

use crate::context::AuthHandle;
use crate::Role;

/// Landing routes. Owned by the routing layer; not runtime-configurable.
pub mod routes {
    pub const LOGIN: &str = "/auth/login";
    pub const PATIENT_HOME: &str = "/patient/dashboard";
    pub const DOCTOR_HOME: &str = "/doctor/dashboard";
    pub const ADMIN_HOME: &str = "/admin/dashboard";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Unauthenticated,
    PatientHome,
    DoctorHome,
    AdminHome,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Unauthenticated => routes::LOGIN,
            Destination::PatientHome => routes::PATIENT_HOME,
            Destination::DoctorHome => routes::DOCTOR_HOME,
            Destination::AdminHome => routes::ADMIN_HOME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "destination")]
pub enum Transition {
    Redirect(Destination),
    /// Recognized role without a landing route: stay on the loading view.
    Stall,
}

/// The transition table.
pub fn transition_for(role: Role) -> Transition {
    match role {
        Role::Unknown => Transition::Redirect(Destination::Unauthenticated),
        Role::Patient => Transition::Redirect(Destination::PatientHome),
        Role::Doctor => Transition::Redirect(Destination::DoctorHome),
        Role::Admin => Transition::Redirect(Destination::AdminHome),
        // No landing surface exists for these roles yet.
        Role::Receptionist | Role::Nurse => Transition::Stall,
    }
}

/// Navigation primitive.
///
/// Implementations must replace the current view without adding a history
/// entry, so "back" does not return to the gate.
pub trait Navigator {
    fn redirect_to(&self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn redirect_to(&self, path: &str) {
        (**self).redirect_to(path)
    }
}

impl<N: Navigator + ?Sized> Navigator for std::rc::Rc<N> {
    fn redirect_to(&self, path: &str) {
        (**self).redirect_to(path)
    }
}

impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    fn redirect_to(&self, path: &str) {
        (**self).redirect_to(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "value")]
pub enum GateState {
    /// Nothing evaluated yet.
    Unresolved,
    Redirected(Destination),
    NoDestination(Role),
}

/// What the gate renders. It never renders protected content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    Loading,
}

/// Why the gate routes a role where it does.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingExplanation {
    pub role: Role,
    pub transition: Transition,
    pub path: Option<&'static str>,
    pub reason: String,
}

#[derive(Debug)]
pub struct RoleRouterGate<N> {
    navigator: N,
    state: GateState,
    last_role: Option<Role>,
}

impl<N: Navigator> RoleRouterGate<N> {
    pub fn new(navigator: N) -> Self {
        Self {
            navigator,
            state: GateState::Unresolved,
            last_role: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Evaluate against the latest committed snapshot.
    pub fn sync(&mut self, auth: &AuthHandle) -> GateState {
        let role = auth.current_user().role();
        self.evaluate(role)
    }

    /// Run the transition for `role` if it differs from the last evaluated role.
    pub fn evaluate(&mut self, role: Role) -> GateState {
        if self.last_role == Some(role) {
            return self.state;
        }
        self.last_role = Some(role);

        self.state = match transition_for(role) {
            Transition::Redirect(destination) => {
                tracing::info!(%role, path = destination.path(), "redirecting");
                self.navigator.redirect_to(destination.path());
                GateState::Redirected(destination)
            }
            Transition::Stall => {
                let fault = AuthFault::NoDestinationForRole(role.to_string());
                tracing::warn!(%fault, "no landing route; holding on loading view");
                GateState::NoDestination(role)
            }
        };
        self.state
    }

    pub fn render(&self) -> GateView {
        GateView::Loading
    }
}

/// Explain where the gate would send `role`, and why.
pub fn explain_routing(role: Role) -> RoutingExplanation {
    let transition = transition_for(role);
    let (path, reason) = match transition {
        Transition::Redirect(Destination::Unauthenticated) => (
            Some(routes::LOGIN),
            "No recognized role in session; sending to sign-in".to_string(),
        ),
        Transition::Redirect(destination) => (
            Some(destination.path()),
            format!("Role {role} lands on {}", destination.path()),
        ),
        Transition::Stall => (
            None,
            format!(
                "Role {role} is recognized but has no landing route; gate stays on loading view"
            ),
        ),
    };
    RoutingExplanation {
        role,
        transition,
        path,
        reason,
    }
}
