//! Auth fault taxonomy.

use thiserror::Error;

/// A fault recovered while deriving or routing a session.
///
/// None of these are returned from the session/routing operations: every one
/// degrades to the unauthenticated state. They exist so the recovery can be
/// logged and, where the login flow asks for it, surfaced as a notice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFault {
    /// The session store could not be read (no window, storage disabled).
    #[error("session store unreadable: {0}")]
    UnreadableSession(String),

    /// No credential is present in the session store.
    #[error("no session credential present")]
    MissingCredential,

    /// The stored role is outside the recognized set.
    #[error("unrecognized role '{0}'")]
    UnrecognizedRole(String),

    /// A recognized role has no landing route.
    #[error("no destination for role '{0}'")]
    NoDestinationForRole(String),
}

impl AuthFault {
    pub fn unreadable(msg: impl Into<String>) -> Self {
        Self::UnreadableSession(msg.into())
    }

    pub fn unrecognized_role(raw: impl Into<String>) -> Self {
        Self::UnrecognizedRole(raw.into())
    }
}
