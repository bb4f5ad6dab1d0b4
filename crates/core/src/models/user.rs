use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CarportError, CarportResult};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_PHONE_LEN: usize = 10;
pub const MAX_PHONE_LEN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CarportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(CarportError::validation(format!("unknown role: {}", other))),
        }
    }
}

/// A registered account. The password hash never leaves the database crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
}

impl RegisterRequest {
    pub fn validate(&self) -> CarportResult<()> {
        validate_profile(&self.name, &self.email, &self.phone)?;
        validate_password(&self.password, &self.confirm_password)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Profile edit. A password change requires both password fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditProfileRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl EditProfileRequest {
    pub fn validate(&self) -> CarportResult<()> {
        validate_profile(&self.name, &self.email, &self.phone)?;
        match (&self.password, &self.confirm_password) {
            (Some(password), Some(confirm)) => validate_password(password, confirm),
            (Some(_), None) => Err(CarportError::validation("confirm_password is required")),
            _ => Ok(()),
        }
    }
}

/// Staff edit of any account, optionally changing its role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUpdateUserRequest {
    #[serde(flatten)]
    pub profile: EditProfileRequest,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckEmailQuery {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQuery {
    pub user_id: i64,
}

fn validate_profile(name: &str, email: &str, phone: &str) -> CarportResult<()> {
    if name.trim().is_empty() {
        return Err(CarportError::validation("name is required"));
    }
    validate_email(email)?;
    validate_phone(phone)
}

pub(crate) fn validate_email(email: &str) -> CarportResult<()> {
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };
    if !valid_email {
        return Err(CarportError::validation("email is not a valid address"));
    }
    Ok(())
}

pub(crate) fn validate_phone(phone: &str) -> CarportResult<()> {
    let phone_len = phone.chars().count();
    if !(MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&phone_len) {
        return Err(CarportError::validation(format!(
            "phone must be between {} and {} characters",
            MIN_PHONE_LEN, MAX_PHONE_LEN
        )));
    }
    Ok(())
}

fn validate_password(password: &str, confirm: &str) -> CarportResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CarportError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password != confirm {
        return Err(CarportError::validation(
            "Password and Confirm Password do not match",
        ));
    }
    Ok(())
}
