use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use medportal_core::AuthFault;

/// Role of the signed-in user.
///
/// This is a closed set. Raw role strings from the session store are
/// normalized into it on read (see [`Role::normalize`]); nothing downstream
/// ever compares against an unnormalized string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Admin,
    Doctor,
    Patient,
    Receptionist,
    Nurse,
    /// Absent, empty or unrecognized.
    #[default]
    Unknown,
}

impl Role {
    /// The whitelisted roles, in storage order.
    pub const ALL_RECOGNIZED: [Role; 5] = [
        Role::Admin,
        Role::Doctor,
        Role::Patient,
        Role::Receptionist,
        Role::Nurse,
    ];

    /// Normalize a raw stored role.
    ///
    /// Exact, case-sensitive match against the whitelist; anything else
    /// (including `None`, `""`, `"admin"`, `" ADMIN"` and `"UNKNOWN"`) maps to
    /// [`Role::Unknown`].
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or(Role::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Doctor => "DOCTOR",
            Role::Patient => "PATIENT",
            Role::Receptionist => "RECEPTIONIST",
            Role::Nurse => "NURSE",
            Role::Unknown => "UNKNOWN",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unknown)
    }
}

impl FromStr for Role {
    type Err = AuthFault;

    /// Strict parse of a recognized role. `"UNKNOWN"` is not a valid input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "DOCTOR" => Ok(Role::Doctor),
            "PATIENT" => Ok(Role::Patient),
            "RECEPTIONIST" => Ok(Role::Receptionist),
            "NURSE" => Ok(Role::Nurse),
            other => Err(AuthFault::unrecognized_role(other)),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Role::normalize(raw.as_deref()))
    }
}
