//! User account records and their validation rules.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mebel_core::{DomainError, DomainResult, UserId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Account Status
// ─────────────────────────────────────────────────────────────────────────────

/// Account status.
///
/// Inactive accounts exist but cannot authenticate; soft-deleting an account
/// means flipping it to `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    /// New accounts start inactive until an administrator activates them.
    #[default]
    Inactive,
}

impl core::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UserStatus::Active => f.write_str("active"),
            UserStatus::Inactive => f.write_str("inactive"),
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(DomainError::validation(format!(
                "status must be one of: active, inactive (got '{other}')"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Account Record
// ─────────────────────────────────────────────────────────────────────────────

/// A stored user account.
///
/// # Invariants
/// - `password_hash` always holds a one-way hash, never a plaintext password.
/// - `username` and `email` are unique across live records (case-insensitive);
///   the store enforces this as the final backstop.
/// - `role` and `status` are closed enums; invalid members cannot be
///   represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone: String,
    pub image_url: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone: String,
    pub image_url: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl UserUpdate {
    /// Role and status changes are reserved for administrators.
    pub fn touches_privileged_fields(&self) -> bool {
        self.role.is_some() || self.status.is_some()
    }
}

impl UserAccount {
    /// Validate and build a new account record.
    ///
    /// Defaults: role `user`, status `inactive`, empty image URL.
    pub fn create(new: NewUser, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = require_field("name", &new.name)?;
        let username = validate_username(&new.username)?;
        if new.password_hash.is_empty() {
            return Err(DomainError::validation("password is required"));
        }
        let email = validate_email(&new.email)?;
        let phone = validate_phone(&new.phone)?;

        Ok(Self {
            id: UserId::new(),
            name,
            username,
            password_hash: new.password_hash,
            email,
            phone,
            image_url: new.image_url.unwrap_or_default(),
            role: new.role.unwrap_or_default(),
            status: new.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial profile update, validating each present field.
    pub fn apply_update(&mut self, update: UserUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = update.name {
            self.name = require_field("name", &name)?;
        }
        if let Some(username) = update.username {
            self.username = validate_username(&username)?;
        }
        if let Some(email) = update.email {
            self.email = validate_email(&email)?;
        }
        if let Some(phone) = update.phone {
            self.phone = validate_phone(&phone)?;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn set_status(&mut self, status: UserStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    pub fn set_password_hash(&mut self, hash: String, now: DateTime<Utc>) {
        self.password_hash = hash;
        self.updated_at = now;
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field Validation
// ─────────────────────────────────────────────────────────────────────────────

fn require_field(field: &'static str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn validate_username(value: &str) -> DomainResult<String> {
    let username = require_field("username", value)?;
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::validation("username must not contain whitespace"));
    }
    Ok(username)
}

/// Pragmatic shape check; stored lowercased so uniqueness comparisons are
/// stable.
fn validate_email(value: &str) -> DomainResult<String> {
    let email = require_field("email", value)?.to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(email)
}

/// Accepts an optional leading `+` and common separators; 8 to 15 digits.
fn validate_phone(value: &str) -> DomainResult<String> {
    let phone = require_field("phone", value)?;
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::validation("invalid phone format"));
    }
    if !(8..=15).contains(&digits.len()) {
        return Err(DomainError::validation("phone must be 8 to 15 digits"));
    }
    Ok(phone)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
