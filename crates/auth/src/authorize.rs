//! Standing authorization policies.
//!
//! These are pure policy checks over an already-authenticated principal.
//! They never perform IO and never decide HTTP codes; the API layer maps a
//! denial to 403, which is distinct from the 401 an authentication failure
//! produces.

use thiserror::Error;

use mebel_core::UserId;

use crate::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: {0}")]
    Forbidden(String),
}

/// Admin-only policy.
pub fn require_admin(principal: &Principal) -> Result<(), AuthzError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(AuthzError::Forbidden("admin role required".to_string()))
    }
}

/// Self-or-admin policy: the caller must own the target record or be an
/// admin.
pub fn require_self_or_admin(principal: &Principal, target: UserId) -> Result<(), AuthzError> {
    if principal.is_admin() || principal.user_id == target {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(
            "not the owner of this resource".to_string(),
        ))
    }
}
