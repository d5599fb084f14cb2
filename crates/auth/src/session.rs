use serde::Serialize;

use medportal_core::{Email, EmployeeId, ValueObject};

use crate::Role;

/// Immutable read of the current identity/role state.
///
/// Snapshots are replaced wholesale, never updated field-by-field; the
/// fields are private so the only way to "change" one is to build another.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    email: Option<Email>,
    role: Role,
    employee_id: Option<EmployeeId>,
}

impl SessionSnapshot {
    /// Build an authenticated snapshot for a recognized role.
    ///
    /// An unrecognized role yields the unauthenticated default: identity
    /// fields are never carried alongside `Role::Unknown`.
    pub fn new(role: Role, email: Option<Email>, employee_id: Option<EmployeeId>) -> Self {
        if !role.is_recognized() {
            return Self::default();
        }
        Self {
            email,
            role,
            employee_id,
        }
    }

    /// The unauthenticated snapshot.
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn employee_id(&self) -> Option<&EmployeeId> {
        self.employee_id.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_recognized()
    }
}

impl ValueObject for SessionSnapshot {}
