//! The caller of a request.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Permission class assigned to a caller by the auth collaborator.
///
/// Classes carry no ordering: what each class may do is listed per operation
/// in [`crate::access::gate::allowed_classes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionClass {
    Unauthenticated,
    Standard,
    Admin,
    Superuser,
    Sync,
}

impl PermissionClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionClass::Unauthenticated => "unauthenticated",
            PermissionClass::Standard => "standard",
            PermissionClass::Admin => "admin",
            PermissionClass::Superuser => "superuser",
            PermissionClass::Sync => "sync",
        }
    }

    /// Parse a class name as sent by the host. Unknown names resolve to
    /// `Unauthenticated`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => PermissionClass::Standard,
            "admin" => PermissionClass::Admin,
            "superuser" => PermissionClass::Superuser,
            "sync" => PermissionClass::Sync,
            _ => PermissionClass::Unauthenticated,
        }
    }
}

impl fmt::Display for PermissionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated or anonymous caller. Immutable for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub identity: String,
    pub permission: PermissionClass,
    /// Device models this caller may act on or view.
    pub authorized_models: BTreeSet<String>,
}

impl Principal {
    pub fn new<I, S>(identity: &str, permission: PermissionClass, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identity: identity.to_string(),
            permission,
            authorized_models: models.into_iter().map(Into::into).collect(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            identity: String::new(),
            permission: PermissionClass::Unauthenticated,
            authorized_models: BTreeSet::new(),
        }
    }

    pub fn can_view_model(&self, model: &str) -> bool {
        self.authorized_models.contains(model)
    }
}
