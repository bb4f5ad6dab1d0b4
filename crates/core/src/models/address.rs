use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CarportError, CarportResult};

/// A saved pick-up location. Home-service orders can copy one into their
/// `address` instead of typing it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Body of both the create and the edit call; edits replace both fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressRequest {
    pub title: String,
    pub location: String,
}

impl AddressRequest {
    pub fn validate(&self) -> CarportResult<()> {
        if self.title.trim().is_empty() {
            return Err(CarportError::validation("title is required"));
        }
        if self.location.trim().is_empty() {
            return Err(CarportError::validation("location is required"));
        }
        Ok(())
    }
}
