use mebel_core::UserId;

use crate::{Role, TokenClaims, TokenError};

/// Authenticated identity attached to a request after token verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl Principal {
    /// Build a principal from verified claims.
    ///
    /// A subject that does not parse as a user id counts as a malformed
    /// token.
    pub fn from_claims(claims: &TokenClaims) -> Result<Self, TokenError> {
        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenError::Malformed)?;

        Ok(Self {
            user_id,
            username: claims.username.clone(),
            role: claims.role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
