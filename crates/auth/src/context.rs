//! Process-wide auth context.
//!
//! [`AuthProvider`] is the single writer of the current [`SessionSnapshot`];
//! everything else gets an [`AuthHandle`], which can only read. The provider
//! is not `Clone` and its writes take `&mut self`, so there is exactly one
//! writer by construction.
//!
//! Writes are wholesale replacements of an `Arc<SessionSnapshot>`: a reader
//! sees either the old snapshot or the new one, never a mix.

use std::sync::{Arc, PoisonError, RwLock};

use medportal_core::AuthFault;

use crate::notify::{Notice, Notifier, NullNotifier};
use crate::store::{SessionStore, SessionStoreReader};
use crate::SessionSnapshot;

#[derive(Debug)]
struct Committed {
    snapshot: Arc<SessionSnapshot>,
    generation: u64,
}

type SharedSnapshot = Arc<RwLock<Committed>>;

const SIGN_IN_INCOMPLETE: &str = "Sign-in did not complete. Please sign in again.";

/// Read-only view of the committed session.
#[derive(Debug, Clone)]
pub struct AuthHandle {
    inner: SharedSnapshot,
}

impl AuthHandle {
    /// The latest committed snapshot.
    pub fn current_user(&self) -> Arc<SessionSnapshot> {
        let committed = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&committed.snapshot)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_authenticated()
    }

    /// Number of snapshot replacements since mount (0 = the mount read).
    pub fn generation(&self) -> u64 {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }
}

/// Owner of the current session snapshot.
///
/// - Reads the store exactly once on mount
/// - Re-reads only when told to (login / store change); no polling
/// - No operation fails: unreadable sessions degrade to signed out
#[derive(Debug)]
pub struct AuthProvider<S, T = NullNotifier> {
    reader: SessionStoreReader<S>,
    notifier: T,
    shared: SharedSnapshot,
}

impl<S: SessionStore> AuthProvider<S, NullNotifier> {
    /// Mount with the default session keys and no notifier.
    pub fn mount(store: S) -> Self {
        Self::mount_with(SessionStoreReader::new(store), NullNotifier)
    }
}

impl<S: SessionStore, T: Notifier> AuthProvider<S, T> {
    pub fn mount_with(reader: SessionStoreReader<S>, notifier: T) -> Self {
        let snapshot = reader.read();
        tracing::debug!(
            role = %snapshot.role(),
            authenticated = snapshot.is_authenticated(),
            "auth context mounted"
        );
        Self {
            reader,
            notifier,
            shared: Arc::new(RwLock::new(Committed {
                snapshot: Arc::new(snapshot),
                generation: 0,
            })),
        }
    }

    pub fn handle(&self) -> AuthHandle {
        AuthHandle {
            inner: Arc::clone(&self.shared),
        }
    }

    pub fn current_user(&self) -> Arc<SessionSnapshot> {
        self.handle().current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_authenticated()
    }

    pub fn generation(&self) -> u64 {
        self.handle().generation()
    }

    /// The login flow finished writing the store.
    ///
    /// Re-reads the store. Only a missing credential is surfaced, with a
    /// generic notice; unreadable stores and unrecognized roles are logged.
    pub fn on_login(&mut self) -> Arc<SessionSnapshot> {
        let read = self.reader.inspect();
        match &read.fault {
            Some(AuthFault::MissingCredential) => {
                tracing::warn!("login notification without a credential");
                self.notifier.notify(Notice::error(SIGN_IN_INCOMPLETE));
            }
            Some(fault) => tracing::warn!(%fault, "login notification did not produce a session"),
            None => tracing::info!(role = %read.snapshot.role(), "signed in"),
        }
        self.replace(read.snapshot)
    }

    /// The login flow cleared the session.
    pub fn on_logout(&mut self) -> Arc<SessionSnapshot> {
        tracing::info!("signed out");
        self.replace(SessionSnapshot::unauthenticated())
    }

    /// The store changed for some other reason; re-read silently.
    pub fn refresh(&mut self) -> Arc<SessionSnapshot> {
        let snapshot = self.reader.read();
        self.replace(snapshot)
    }

    fn replace(&mut self, snapshot: SessionSnapshot) -> Arc<SessionSnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut committed = self.shared.write().unwrap_or_else(PoisonError::into_inner);
        committed.snapshot = Arc::clone(&snapshot);
        committed.generation += 1;
        snapshot
    }
}
