//! `medportal-auth` — client-side session derivation and role routing.
//!
//! This crate is intentionally decoupled from the browser and the router:
//! storage, navigation and notices come in through traits.
//!
//! Data flows one way: [`SessionStoreReader`] → [`AuthProvider`] (sole owner
//! of the current [`SessionSnapshot`]) → [`RoleRouterGate`].

pub mod context;
pub mod gate;
pub mod notify;
pub mod roles;
pub mod session;
pub mod store;

pub use context::{AuthHandle, AuthProvider};
pub use gate::{
    Destination, GateState, GateView, Navigator, RoleRouterGate, RoutingExplanation, Transition,
    explain_routing, routes, transition_for,
};
pub use notify::{Notice, NoticeLevel, Notifier, NullNotifier, RecordingNotifier};
pub use roles::Role;
pub use session::SessionSnapshot;
pub use store::{
    InMemorySessionStore, SessionKeys, SessionRead, SessionStore, SessionStoreReader, StoreError,
};
