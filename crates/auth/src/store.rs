//! Session store contract and the reader that turns it into snapshots.
//!
//! The store itself is owned by the login flow (browser storage in the
//! frontend, an in-memory map in tests). This module only reads from it.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use medportal_core::{AuthFault, Email, EmployeeId};

use crate::{Role, SessionSnapshot};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store does not exist in this execution context.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    #[error("session store backend error: {0}")]
    Backend(String),
}

/// Read-only key-value session store.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
}

/// Keys written by the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionKeys {
    /// Presence of a value under this key means "a credential was issued".
    pub token: String,
    pub role: String,
    pub email: String,
    pub employee_id: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            token: "token".to_string(),
            role: "role".to_string(),
            email: "email".to_string(),
            employee_id: "employeeId".to_string(),
        }
    }
}

/// In-memory session store.
///
/// Intended for tests and native shells.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
    unavailable: bool,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read fails, like browser storage with cookies disabled.
    pub fn unavailable() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            unavailable: true,
        }
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (k, v) in entries {
            store.insert(k, v);
        }
        store
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), value.into());
        }
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("store disabled".to_string()));
        }
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }
}

/// Outcome of a store read: the snapshot plus the fault that was recovered, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRead {
    pub snapshot: SessionSnapshot,
    pub fault: Option<AuthFault>,
}

impl SessionRead {
    fn degraded(fault: AuthFault) -> Self {
        Self {
            snapshot: SessionSnapshot::unauthenticated(),
            fault: Some(fault),
        }
    }
}

/// Reads the raw identity fields and normalizes them into a [`SessionSnapshot`].
///
/// - No panics
/// - Never fails: any problem degrades to the unauthenticated snapshot
#[derive(Debug, Clone)]
pub struct SessionStoreReader<S> {
    store: S,
    keys: SessionKeys,
}

impl<S: SessionStore> SessionStoreReader<S> {
    pub fn new(store: S) -> Self {
        Self::with_keys(store, SessionKeys::default())
    }

    pub fn with_keys(store: S, keys: SessionKeys) -> Self {
        Self { store, keys }
    }

    pub fn read(&self) -> SessionSnapshot {
        self.inspect().snapshot
    }

    /// Read the store and report which fault, if any, was recovered.
    pub fn inspect(&self) -> SessionRead {
        match self.try_read() {
            Ok(read) => read,
            Err(err) => {
                tracing::warn!(error = %err, "session store unreadable; treating as signed out");
                SessionRead::degraded(AuthFault::unreadable(err.to_string()))
            }
        }
    }

    fn try_read(&self) -> Result<SessionRead, StoreError> {
        let token = self.store.get(&self.keys.token)?;
        if token.as_deref().is_none_or(|t| t.is_empty()) {
            tracing::debug!("no session credential present");
            return Ok(SessionRead::degraded(AuthFault::MissingCredential));
        }

        let raw_role = self.store.get(&self.keys.role)?;
        let role = Role::normalize(raw_role.as_deref());
        if !role.is_recognized() {
            let raw = raw_role.unwrap_or_default();
            tracing::warn!(
                role = %raw,
                "unrecognized role in session store; treating as signed out"
            );
            return Ok(SessionRead::degraded(AuthFault::unrecognized_role(raw)));
        }

        let email = self.store.get(&self.keys.email)?.and_then(Email::parse);
        let employee_id = self
            .store
            .get(&self.keys.employee_id)?
            .and_then(EmployeeId::parse);

        tracing::debug!(%role, "session read");
        Ok(SessionRead {
            snapshot: SessionSnapshot::new(role, email, employee_id),
            fault: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in(role: &str) -> InMemorySessionStore {
        InMemorySessionStore::with_entries([
            ("token", "abc"),
            ("role", role),
            ("email", "d@x.com"),
            ("employeeId", "EMP-7"),
        ])
    }

    #[test]
    fn reads_recognized_session() {
        let reader = SessionStoreReader::new(signed_in("DOCTOR"));
        let read = reader.inspect();

        assert_eq!(read.fault, None);
        assert_eq!(read.snapshot.role(), Role::Doctor);
        assert_eq!(read.snapshot.email().map(Email::as_str), Some("d@x.com"));
        assert_eq!(read.snapshot.employee_id().map(EmployeeId::as_str), Some("EMP-7"));
        assert!(read.snapshot.is_authenticated());
    }

    #[test]
    fn missing_credential_reads_as_default() {
        let store = InMemorySessionStore::with_entries([("role", "ADMIN"), ("email", "a@x.com")]);
        let read = SessionStoreReader::new(store).inspect();

        assert_eq!(read.snapshot, SessionSnapshot::default());
        assert_eq!(read.fault, Some(AuthFault::MissingCredential));
    }

    #[test]
    fn empty_credential_reads_as_default() {
        let store = InMemorySessionStore::with_entries([("token", ""), ("role", "ADMIN")]);
        assert_eq!(SessionStoreReader::new(store).read(), SessionSnapshot::default());
    }

    #[test]
    fn unreadable_store_reads_as_default() {
        let read = SessionStoreReader::new(InMemorySessionStore::unavailable()).inspect();

        assert_eq!(read.snapshot, SessionSnapshot::default());
        assert!(matches!(read.fault, Some(AuthFault::UnreadableSession(_))));
    }

    #[test]
    fn lowercase_role_is_unrecognized() {
        let read = SessionStoreReader::new(signed_in("admin")).inspect();

        assert_eq!(read.snapshot, SessionSnapshot::default());
        assert_eq!(read.fault, Some(AuthFault::UnrecognizedRole("admin".to_string())));
    }

    #[test]
    fn missing_role_is_unrecognized() {
        let store = InMemorySessionStore::with_entries([("token", "abc")]);
        let read = SessionStoreReader::new(store).inspect();

        assert!(!read.snapshot.is_authenticated());
        assert_eq!(read.fault, Some(AuthFault::UnrecognizedRole(String::new())));
    }

    #[test]
    fn empty_identity_fields_read_as_absent() {
        let store = InMemorySessionStore::with_entries([
            ("token", "abc"),
            ("role", "PATIENT"),
            ("email", ""),
        ]);
        let snapshot = SessionStoreReader::new(store).read();

        assert_eq!(snapshot.role(), Role::Patient);
        assert!(snapshot.email().is_none());
        assert!(snapshot.employee_id().is_none());
    }

    #[test]
    fn custom_keys_are_honored() {
        let store = InMemorySessionStore::with_entries([("jwt", "abc"), ("userRole", "NURSE")]);
        let keys = SessionKeys {
            token: "jwt".to_string(),
            role: "userRole".to_string(),
            ..SessionKeys::default()
        };
        let snapshot = SessionStoreReader::with_keys(&store, keys).read();

        assert_eq!(snapshot.role(), Role::Nurse);
    }

    #[test]
    fn session_keys_deserialize_with_defaults() {
        let keys: SessionKeys = serde_json::from_str(r#"{"token":"accessToken"}"#).unwrap();
        assert_eq!(keys.token, "accessToken");
        assert_eq!(keys.employee_id, "employeeId");
    }
}
