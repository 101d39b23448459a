//! Authorization decisions.
//!
//! A pure function over (principal, operation). Runs before key resolution,
//! decoding or any store call.

use thiserror::Error;

use crate::access::principal::{PermissionClass, Principal};
use crate::logging::structured::LogContext;

/// Operations exposed by the test log surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ingest,
    List,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Ingest => "ingest",
            Operation::List => "list",
        }
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("permission class {permission} may not {operation}")]
    Forbidden {
        permission: PermissionClass,
        operation: &'static str,
    },
}

/// Authorization decision for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(AccessError),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn into_result(self) -> Result<(), AccessError> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(err) => Err(err),
        }
    }
}

/// Permission classes allowed to perform each operation.
pub fn allowed_classes(operation: Operation) -> &'static [PermissionClass] {
    match operation {
        Operation::Ingest => &[PermissionClass::Sync],
        Operation::List => &[
            PermissionClass::Standard,
            PermissionClass::Admin,
            PermissionClass::Superuser,
            PermissionClass::Sync,
        ],
    }
}

/// Decide whether `principal` may perform `operation`.
pub fn authorize(principal: &Principal, operation: Operation, ctx: &LogContext) -> Decision {
    if allowed_classes(operation).contains(&principal.permission) {
        log::debug!(
            "{} ACCESS_ALLOWED operation={} identity={} permission={}",
            ctx,
            operation.as_str(),
            principal.identity,
            principal.permission
        );
        return Decision::Allowed;
    }

    log::warn!(
        "{} ACCESS_DENIED operation={} identity={} permission={}",
        ctx,
        operation.as_str(),
        principal.identity,
        principal.permission
    );
    Decision::Denied(AccessError::Forbidden {
        permission: principal.permission,
        operation: operation.as_str(),
    })
}
