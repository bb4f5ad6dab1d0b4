//! STNK (vehicle registration certificate) uploads.
//!
//! A customer submits a photo of the document, staff verify it and may leave
//! a note explaining what is wrong with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CarportError, CarportResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stnk {
    pub id: i64,
    pub user_id: i64,
    pub photo_url: String,
    /// Set once staff have checked the document
    pub verified: bool,
    /// Staff note, empty when there is none
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StnkPhotoRequest {
    pub photo_url: String,
}

impl StnkPhotoRequest {
    pub fn validate(&self) -> CarportResult<()> {
        if self.photo_url.trim().is_empty() {
            return Err(CarportError::validation("photo_url is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StnkNoteRequest {
    #[serde(default)]
    pub description: String,
}
