//! Reactive session context for the component tree.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::*;
use leptos_router::{NavigateOptions, use_navigate};
use wasm_bindgen::JsValue;

use medportal_auth::{
    AuthHandle, AuthProvider, Navigator, Notice, NoticeLevel, Notifier, SessionSnapshot,
    SessionStoreReader,
};

use crate::config::PortalConfig;
use crate::frontend::storage::WebSessionStore;

/// Surfaces notices as toasts (and in the browser console).
#[derive(Debug, Clone, Copy)]
pub struct ToastNotifier {
    toasts: RwSignal<Vec<Notice>>,
}

impl ToastNotifier {
    pub fn toasts(&self) -> ReadSignal<Vec<Notice>> {
        self.toasts.read_only()
    }

    pub fn dismiss_all(&self) {
        self.toasts.set(Vec::new());
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        let msg = JsValue::from_str(&notice.message);
        match notice.level {
            NoticeLevel::Info => web_sys::console::info_1(&msg),
            NoticeLevel::Warning => web_sys::console::warn_1(&msg),
            NoticeLevel::Error => web_sys::console::error_1(&msg),
        }
        self.toasts.update(|t| t.push(notice));
    }
}

/// Router-backed navigation. Always replaces the history entry.
#[derive(Clone)]
pub struct RouterNavigator {
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
}

impl RouterNavigator {
    /// Must be called inside a `<Router>`.
    pub fn from_router() -> Self {
        let navigate = use_navigate();
        Self {
            navigate: Rc::new(move |path: &str, options: NavigateOptions| navigate(path, options)),
        }
    }
}

impl Navigator for RouterNavigator {
    fn redirect_to(&self, path: &str) {
        (self.navigate)(
            path,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    }
}

type WebAuthProvider = AuthProvider<WebSessionStore, ToastNotifier>;

/// Session context provided to the component tree.
///
/// Only this type can write the session; components get the snapshot as a
/// read-only signal.
#[derive(Clone)]
pub struct PortalSession {
    provider: Rc<RefCell<WebAuthProvider>>,
    snapshot: RwSignal<Arc<SessionSnapshot>>,
    notifier: ToastNotifier,
}

impl PortalSession {
    fn mount(config: &PortalConfig) -> Self {
        let notifier = ToastNotifier {
            toasts: create_rw_signal(Vec::new()),
        };
        let reader = SessionStoreReader::with_keys(
            WebSessionStore::new(config.storage_area),
            config.session_keys.clone(),
        );
        let provider = AuthProvider::mount_with(reader, notifier);
        let snapshot = create_rw_signal(provider.current_user());

        Self {
            provider: Rc::new(RefCell::new(provider)),
            snapshot,
            notifier,
        }
    }

    pub fn snapshot(&self) -> ReadSignal<Arc<SessionSnapshot>> {
        self.snapshot.read_only()
    }

    pub fn auth(&self) -> AuthHandle {
        self.provider.borrow().handle()
    }

    pub fn notifier(&self) -> ToastNotifier {
        self.notifier
    }

    /// Called by the login flow after it has written the session store.
    pub fn login_completed(&self) {
        let snapshot = self.provider.borrow_mut().on_login();
        self.snapshot.set(snapshot);
    }

    /// Called by the login flow after it has cleared the session store.
    pub fn logout(&self) {
        let snapshot = self.provider.borrow_mut().on_logout();
        self.snapshot.set(snapshot);
    }
}

/// Mounts the auth context (one store read) and provides it to `children`.
#[component]
pub fn AuthProviderScope(children: Children) -> impl IntoView {
    provide_context(PortalSession::mount(&PortalConfig::default()));
    children()
}

/// The session context. Panics outside `<AuthProviderScope>`.
pub fn use_auth() -> PortalSession {
    expect_context::<PortalSession>()
}
