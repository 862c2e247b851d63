//! `mebel-auth` — credential and access-control domain.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! to validate account records, hash/verify passwords, issue/verify session
//! tokens, and decide the two standing access policies. Transport and
//! persistence live elsewhere.

pub mod account;
pub mod authorize;
pub mod password;
pub mod principal;
pub mod roles;
pub mod token;

pub use account::{NewUser, UserAccount, UserStatus, UserUpdate};
pub use authorize::{AuthzError, require_admin, require_self_or_admin};
pub use password::{HASH_COST, PasswordError, hash_password, hash_with_cost, verify_password};
pub use principal::Principal;
pub use roles::Role;
pub use token::{Hs256TokenService, TokenClaims, TokenError, TokenVerifier};
