//! Portal shell: wires the session core to its collaborators.
//!
//! Storage, navigation and notices are supplied by the host (browser
//! bindings in `frontend`, in-memory doubles in tests). The shell owns the
//! only [`AuthProvider`] and re-syncs the gate after every session change,
//! so the gate always sees the snapshot that was just committed.

use std::sync::Arc;

use medportal_auth::{
    AuthHandle, AuthProvider, GateState, GateView, Navigator, Notifier, RoleRouterGate,
    SessionSnapshot, SessionStore, SessionStoreReader,
};

use crate::config::PortalConfig;

pub struct PortalShell<S, N, T> {
    provider: AuthProvider<S, T>,
    gate: RoleRouterGate<N>,
}

impl<S, N, T> PortalShell<S, N, T>
where
    S: SessionStore,
    N: Navigator,
    T: Notifier,
{
    /// Mount the auth context (one store read) and run the gate once.
    pub fn mount(store: S, navigator: N, notifier: T, config: &PortalConfig) -> Self {
        let reader = SessionStoreReader::with_keys(store, config.session_keys.clone());
        let provider = AuthProvider::mount_with(reader, notifier);
        let mut gate = RoleRouterGate::new(navigator);
        gate.sync(&provider.handle());
        Self { provider, gate }
    }

    /// Read-only access for the rest of the application.
    pub fn auth(&self) -> AuthHandle {
        self.provider.handle()
    }

    pub fn current_user(&self) -> Arc<SessionSnapshot> {
        self.provider.current_user()
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn render(&self) -> GateView {
        self.gate.render()
    }

    pub fn login_completed(&mut self) -> GateState {
        self.provider.on_login();
        self.gate.sync(&self.provider.handle())
    }

    pub fn logout(&mut self) -> GateState {
        self.provider.on_logout();
        self.gate.sync(&self.provider.handle())
    }

    pub fn refresh(&mut self) -> GateState {
        self.provider.refresh();
        self.gate.sync(&self.provider.handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use medportal_auth::{
        Destination, InMemorySessionStore, NoticeLevel, RecordingNotifier, Role, SessionKeys,
        routes,
    };

    #[derive(Default)]
    struct RecordingNavigator {
        calls: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn redirect_to(&self, path: &str) {
            self.calls.borrow_mut().push(path.to_string());
        }
    }

    #[test]
    fn mount_redirects_signed_out_user_to_login() {
        let store = InMemorySessionStore::new();
        let nav = RecordingNavigator::default();
        let notifier = RecordingNotifier::new();

        let shell = PortalShell::mount(&store, &nav, &notifier, &PortalConfig::default());

        assert_eq!(shell.gate_state(), GateState::Redirected(Destination::Unauthenticated));
        assert_eq!(shell.render(), GateView::Loading);
        assert_eq!(*nav.calls.borrow(), vec![routes::LOGIN.to_string()]);
        // A cold start without a session is not a failure worth a toast.
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn login_then_logout_round_trip() {
        let store = InMemorySessionStore::new();
        let nav = RecordingNavigator::default();
        let notifier = RecordingNotifier::new();
        let mut shell = PortalShell::mount(&store, &nav, &notifier, &PortalConfig::default());

        store.insert("token", "t");
        store.insert("role", "PATIENT");
        store.insert("email", "p@x.com");
        assert_eq!(
            shell.login_completed(),
            GateState::Redirected(Destination::PatientHome)
        );
        assert_eq!(shell.current_user().role(), Role::Patient);
        assert!(shell.auth().is_authenticated());

        store.clear();
        shell.logout();

        assert_eq!(
            *nav.calls.borrow(),
            vec![
                routes::LOGIN.to_string(),
                routes::PATIENT_HOME.to_string(),
                routes::LOGIN.to_string(),
            ]
        );
        assert!(!shell.auth().is_authenticated());
    }

    #[test]
    fn unrecognized_role_at_login_is_logged_not_surfaced() {
        let store = InMemorySessionStore::new();
        let nav = RecordingNavigator::default();
        let notifier = RecordingNotifier::new();
        let mut shell = PortalShell::mount(&store, &nav, &notifier, &PortalConfig::default());

        store.insert("token", "t");
        store.insert("role", "Doctor");
        shell.login_completed();

        assert!(notifier.notices().is_empty());
        assert!(!shell.auth().is_authenticated());
        // Still on the login route: no second redirect for the same role.
        assert_eq!(*nav.calls.borrow(), vec![routes::LOGIN.to_string()]);
    }

    #[test]
    fn login_without_credential_shows_generic_notice() {
        let store = InMemorySessionStore::new();
        let nav = RecordingNavigator::default();
        let notifier = RecordingNotifier::new();
        let mut shell = PortalShell::mount(&store, &nav, &notifier, &PortalConfig::default());

        store.insert("role", "PATIENT");
        shell.login_completed();

        let notices = notifier.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(!notices[0].message.contains("credential"));
        assert_eq!(*nav.calls.borrow(), vec![routes::LOGIN.to_string()]);
    }

    #[test]
    fn configured_keys_are_used() {
        let store = InMemorySessionStore::with_entries([
            ("accessToken", "t"),
            ("userRole", "RECEPTIONIST"),
        ]);
        let nav = RecordingNavigator::default();
        let config = PortalConfig {
            session_keys: SessionKeys {
                token: "accessToken".to_string(),
                role: "userRole".to_string(),
                ..SessionKeys::default()
            },
            ..PortalConfig::default()
        };

        let mut shell = PortalShell::mount(&store, &nav, RecordingNotifier::new(), &config);
        assert_eq!(shell.gate_state(), GateState::NoDestination(Role::Receptionist));

        shell.refresh();
        assert_eq!(shell.gate_state(), GateState::NoDestination(Role::Receptionist));
        assert!(nav.calls.borrow().is_empty());
    }
}
