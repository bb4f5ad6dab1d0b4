use serde::{Deserialize, Serialize};

use super::user::validate_email;
use crate::errors::CarportResult;

/// An address on the staff mailing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminEmail {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminEmailRequest {
    pub email: String,
}

impl AdminEmailRequest {
    /// Trimmed and lowercased, so the unique constraint catches case variants.
    pub fn normalized(&self) -> CarportResult<String> {
        let email = self.email.trim().to_lowercase();
        validate_email(&email)?;
        Ok(email)
    }
}
